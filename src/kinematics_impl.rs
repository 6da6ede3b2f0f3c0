//! Closed-form inverse kinematics of the rotary 6-6 Stewart platform.
//!
//! Each of the six legs is a two-link chain: a servo horn rotating in a fixed
//! motor plane, and a rigid rod from the horn tip to a ball joint on the
//! moving platform. For a requested platform pose the horn angle of every leg
//! is found by solving one scalar trigonometric equation; a pose is reachable
//! for a leg only when that equation has a real solution with the horn inside
//! its mechanical range.

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::{Translation3, UnitQuaternion, Vector3};

use crate::kinematic_traits::{JointPositions, Pose, ServoAngles, LEGS};
use crate::parameter_error::ParameterError;
use crate::parameters::stewart_kinematics::Parameters;
use crate::workspace::{self, WorkspaceLimits};

/// Horn angles are accepted within this many degrees of the horizontal
/// rest position, in both directions.
const SERVO_RANGE: f64 = 90.0;

/// Below this, the horn equation coefficients are treated as degenerate
/// (the leg vector has no component in the motor plane).
const DEGENERATE_EPSILON: f64 = 1e-10;

/// Constants of one leg, derived once from the parameters.
#[derive(Debug, Clone, Copy)]
struct LegGeometry {
    /// Servo shaft anchor on the base plate. Lies in the base plane z = 0.
    base_joint: Vector3<f64>,

    /// Rod anchor on the platform plate, in the platform's local frame.
    platform_joint: Vector3<f64>,

    /// Orientation of the motor plane around the base normal ("beta"),
    /// stored as sine and cosine.
    sin_beta: f64,
    cos_beta: f64,
}

/// The solver. Owns the mechanism parameters and the joint geometry derived
/// from them; both are fixed for the lifetime of the instance (build a new
/// instance to change the mechanism). The last requested pose and the six
/// horn tip positions are retained so a renderer can read back the complete
/// linkage after every solve.
#[derive(Debug, Clone)]
pub struct StewartKinematics {
    parameters: Parameters,
    legs: [LegGeometry; LEGS],

    /// Platform height above the base at which leg 0 reaches its geometric
    /// rest length with the horn horizontal. Anchors the Z of every pose.
    home_height: f64,

    /// Pose applied by the most recent solve (identity before the first).
    pose: Pose,

    /// Horn tip per leg from the most recent solve; the origin marks a leg
    /// the pose was not reachable for.
    horn_positions: JointPositions,
}

impl StewartKinematics {
    /// Creates a solver for the given mechanism, deriving the six base
    /// joints, platform joints and motor plane orientations.
    pub fn new(parameters: Parameters) -> Result<Self, ParameterError> {
        parameters.validate()?;
        let legs: [LegGeometry; LEGS] = std::array::from_fn(|i| derive_leg(&parameters, i));

        // Home height from leg 0: the vertical leg of the right triangle
        // whose hypotenuse is the rest length sqrt(rod² + horn²).
        let dx = legs[0].platform_joint.x - legs[0].base_joint.x;
        let dy = legs[0].platform_joint.y - legs[0].base_joint.y;
        let reach_sq =
            parameters.rod_length * parameters.rod_length
                + parameters.horn_length * parameters.horn_length;
        let height_sq = reach_sq - dx * dx - dy * dy;
        if height_sq < 0.0 {
            return Err(ParameterError::UnreachableGeometry {
                span: dx.hypot(dy),
                reach: reach_sq.sqrt(),
            });
        }

        Ok(StewartKinematics {
            parameters,
            legs,
            home_height: height_sq.sqrt(),
            pose: Pose::identity(),
            horn_positions: [Vector3::zeros(); LEGS],
        })
    }

    /// Solves the pose for all six legs, returning the servo horn angle in
    /// degrees per leg. A leg the pose is not reachable for yields `None` and
    /// its horn tip is reset to the origin; the remaining legs are still
    /// solved. The pose is stored even when some legs fail, so the readback
    /// accessors reflect the attempted pose. This call never panics.
    pub fn solve(&mut self, pose: &Pose) -> ServoAngles {
        self.pose = *pose;
        let rod = self.parameters.rod_length;
        let horn = self.parameters.horn_length;
        let lift = Vector3::new(0.0, 0.0, self.home_height);

        let mut angles: ServoAngles = [None; LEGS];
        for (i, leg) in self.legs.iter().enumerate() {
            self.horn_positions[i] = Vector3::zeros();

            // World position of the platform joint, then the leg vector
            // from the base joint to it.
            let q = pose.rotation * leg.platform_joint + pose.translation.vector + lift;
            let l = q - leg.base_joint;

            let gk = l.norm_squared() - rod * rod + horn * horn;
            let ek = 2.0 * horn * l.z;
            let fk = 2.0 * horn * (leg.cos_beta * l.x + leg.sin_beta * l.y);
            let sq_sum = ek * ek + fk * fk;

            // The leg vector is parallel to the motor shaft; the horn angle
            // equation degenerates.
            if sq_sum < DEGENERATE_EPSILON {
                continue;
            }

            // No real horn angle: the platform joint is outside the shell
            // the horn tip plus rod can reach.
            let sqrt_term = 1.0 - gk * gk / sq_sum;
            if sqrt_term < 0.0 {
                continue;
            }

            let sqrt1 = sqrt_term.sqrt();
            let sqrt2 = sq_sum.sqrt();
            let sin_alpha = gk * ek / sq_sum - fk * sqrt1 / sqrt2;
            let cos_alpha = gk * fk / sq_sum + ek * sqrt1 / sqrt2;

            // Guards against float rounding at the shell boundary, where
            // sin_alpha can land just outside [-1, 1] and asin would be NaN.
            if sin_alpha.abs() > 1.0 {
                continue;
            }

            let alpha = sin_alpha.asin();
            if alpha.to_degrees().abs() > SERVO_RANGE {
                continue;
            }

            self.horn_positions[i] = leg.base_joint
                + horn * Vector3::new(cos_alpha * leg.cos_beta, cos_alpha * leg.sin_beta, sin_alpha);
            angles[i] = Some(alpha.to_degrees());
        }
        angles
    }

    /// Solves for a translation and roll/pitch/yaw in radians (intrinsic
    /// Z-Y-X: yaw about Z, then pitch about Y, then roll about X).
    pub fn solve_rpy(
        &mut self,
        translation: &Vector3<f64>,
        roll: f64,
        pitch: f64,
        yaw: f64,
    ) -> ServoAngles {
        let pose = Pose::from_parts(
            Translation3::from(*translation),
            UnitQuaternion::from_euler_angles(roll, pitch, yaw),
        );
        self.solve(&pose)
    }

    /// World positions of the six platform joints under the last stored pose.
    /// Derived from the stored pose only; reachability is not rechecked.
    pub fn platform_joints_world(&self) -> JointPositions {
        let lift = Vector3::new(0.0, 0.0, self.home_height);
        std::array::from_fn(|i| {
            self.pose.rotation * self.legs[i].platform_joint
                + self.pose.translation.vector
                + lift
        })
    }

    /// The six base joints. Fixed once the solver is constructed.
    pub fn base_joints(&self) -> JointPositions {
        std::array::from_fn(|i| self.legs[i].base_joint)
    }

    /// Horn tips from the most recent solve, the origin where that solve
    /// found the leg unreachable.
    pub fn horn_positions(&self) -> JointPositions {
        self.horn_positions
    }

    /// Distance from each base joint to its platform joint under the last
    /// stored pose. At the home pose this is the geometric rest length
    /// sqrt(rod² + horn²) for every leg.
    pub fn leg_lengths(&self) -> [f64; LEGS] {
        let joints = self.platform_joints_world();
        std::array::from_fn(|i| (joints[i] - self.legs[i].base_joint).norm())
    }

    /// Platform height above the base plane at the home pose.
    pub fn home_height(&self) -> f64 {
        self.home_height
    }

    /// The pose applied by the most recent solve.
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// The mechanism parameters this solver was built from.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Conservative per-axis motion envelope for this mechanism. See
    /// [workspace] for what this box does and does not promise.
    pub fn workspace_limits(&self) -> WorkspaceLimits {
        workspace::estimate(&self.parameters, self.home_height)
    }
}

/// Joint anchors and motor plane of leg `i`. The six legs form three pairs;
/// within a pair the members differ by the index-derived sign `pm` and the
/// half-turn added to odd betas.
fn derive_leg(parameters: &Parameters, i: usize) -> LegGeometry {
    let pm = if i % 2 == 0 { 1.0 } else { -1.0 };
    let odd = (i % 2) as f64;
    let phi_cut = (1 + i - i % 2) as f64 * PI / 3.0;

    let phi_base = (i + i % 2) as f64 * PI / 3.0
        + pm * parameters.shaft_distance / (2.0 * parameters.base_radius);
    let phi_platform =
        phi_cut - pm * parameters.anchor_distance / (2.0 * parameters.platform_radius);
    let beta = phi_base + odd * PI + FRAC_PI_2;

    LegGeometry {
        base_joint: Vector3::new(
            phi_base.cos() * parameters.base_radius,
            phi_base.sin() * parameters.base_radius,
            0.0,
        ),
        platform_joint: Vector3::new(
            phi_platform.cos() * parameters.platform_radius,
            phi_platform.sin() * parameters.platform_radius,
            0.0,
        ),
        sin_beta: beta.sin(),
        cos_beta: beta.cos(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Quaternion;

    fn solver() -> StewartKinematics {
        StewartKinematics::new(Parameters::simulator_default())
            .expect("default build must be constructible")
    }

    fn pose_xyz_rpy(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Pose {
        Pose::from_parts(
            Translation3::new(x, y, z),
            UnitQuaternion::from_euler_angles(roll, pitch, yaw),
        )
    }

    #[test]
    fn test_identity_rotation_keeps_vectors() {
        let v = Vector3::new(3.0, -7.0, 11.0);
        let rotated = UnitQuaternion::identity() * v;
        assert_relative_eq!(rotated, v, epsilon = 1e-12);
    }

    #[test]
    fn test_euler_convention_is_intrinsic_zyx() {
        // nalgebra's from_euler_angles must reproduce the standard Z-Y-X
        // half-angle product the platform geometry is specified in.
        let (roll, pitch, yaw): (f64, f64, f64) = (0.31, -0.22, 0.47);
        let (sr, cr) = (0.5 * roll).sin_cos();
        let (sp, cp) = (0.5 * pitch).sin_cos();
        let (sy, cy) = (0.5 * yaw).sin_cos();
        let expected = Quaternion::new(
            cr * cp * cy + sr * sp * sy,
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
        );
        let actual = UnitQuaternion::from_euler_angles(roll, pitch, yaw);
        assert_relative_eq!(actual.into_inner(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_home_height_of_default_build() {
        let solver = solver();
        // rod² + horn² = 19400; the leg 0 anchor offset takes the rest.
        // The stored pose is the identity before the first solve, so the
        // world joints are directly above the local ones.
        let legs = solver.base_joints();
        let platform = solver.platform_joints_world();
        let dx = platform[0].x - legs[0].x;
        let dy = platform[0].y - legs[0].y;
        let expected = (130.0_f64.powi(2) + 50.0_f64.powi(2) - dx * dx - dy * dy).sqrt();
        assert_relative_eq!(solver.home_height(), expected, epsilon = 1e-9);
        assert!(solver.home_height() > 0.0);
    }

    #[test]
    fn test_joint_geometry_is_invariant_across_solves() {
        let mut solver = solver();
        let base_before = solver.base_joints();
        solver.solve(&pose_xyz_rpy(10.0, -5.0, 8.0, 0.1, -0.05, 0.2));
        solver.solve(&pose_xyz_rpy(-20.0, 15.0, -10.0, -0.2, 0.1, 0.0));
        let base_after = solver.base_joints();
        for i in 0..LEGS {
            assert_relative_eq!(base_before[i], base_after[i], epsilon = 0.0);
            // All base joints lie in the base plane on the base circle.
            assert_eq!(base_before[i].z, 0.0);
            assert_relative_eq!(base_before[i].x.hypot(base_before[i].y), 80.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_centered_pose_is_reachable_and_symmetric() {
        let mut solver = solver();
        let angles = solver.solve(&Pose::identity());
        let degrees: Vec<f64> = angles
            .iter()
            .map(|a| a.expect("centered pose must be reachable for all legs"))
            .collect();

        for angle in &degrees {
            assert!(angle.abs() <= 90.0, "servo angle {} out of range", angle);
        }
        // Pair symmetry: the two legs of each pair mirror each other.
        for pair in 0..3 {
            assert_relative_eq!(
                degrees[2 * pair].abs(),
                degrees[2 * pair + 1].abs(),
                epsilon = 1e-6
            );
        }
        // 3-fold symmetry: rotating the mechanism by 120° maps even legs
        // onto even legs and odd onto odd.
        assert_relative_eq!(degrees[0], degrees[2], epsilon = 1e-9);
        assert_relative_eq!(degrees[2], degrees[4], epsilon = 1e-9);
        assert_relative_eq!(degrees[1], degrees[3], epsilon = 1e-9);
        assert_relative_eq!(degrees[3], degrees[5], epsilon = 1e-9);
    }

    #[test]
    fn test_solve_is_idempotent() {
        let mut solver = solver();
        let pose = pose_xyz_rpy(12.0, -8.0, 5.0, 0.15, 0.1, -0.2);
        let first = solver.solve(&pose);
        let first_horns = solver.horn_positions();
        let second = solver.solve(&pose);
        assert_eq!(first, second);
        for i in 0..LEGS {
            assert_relative_eq!(first_horns[i], solver.horn_positions()[i], epsilon = 0.0);
        }
    }

    #[test]
    fn test_platform_joints_round_trip() {
        let mut solver = solver();
        let pose = pose_xyz_rpy(7.0, 3.0, -4.0, 0.1, -0.08, 0.12);
        let angles = solver.solve(&pose);
        assert!(angles.iter().all(|a| a.is_some()));

        let home = solver.home_height();
        let world = solver.platform_joints_world();
        let local = {
            let clean = StewartKinematics::new(Parameters::simulator_default()).unwrap();
            std::array::from_fn::<_, LEGS, _>(|i| clean.legs[i].platform_joint)
        };
        for i in 0..LEGS {
            let expected =
                pose.rotation * local[i] + pose.translation.vector + Vector3::new(0.0, 0.0, home);
            assert_relative_eq!(world[i], expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_leg_lengths_at_home_equal_rest_length() {
        let mut solver = solver();
        solver.solve(&Pose::identity());
        let rest = (130.0_f64.powi(2) + 50.0_f64.powi(2)).sqrt();
        for length in solver.leg_lengths() {
            assert_relative_eq!(length, rest, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_horn_tips_sit_on_the_horn_circle() {
        let mut solver = solver();
        let angles = solver.solve(&pose_xyz_rpy(5.0, -5.0, 10.0, 0.1, 0.1, 0.1));
        let base = solver.base_joints();
        let world = solver.platform_joints_world();
        for (i, angle) in angles.iter().enumerate() {
            assert!(angle.is_some());
            let horn = solver.horn_positions()[i];
            // Horn tip is horn_length from the shaft and rod_length from
            // the platform joint.
            assert_relative_eq!((horn - base[i]).norm(), 50.0, epsilon = 1e-9);
            assert_relative_eq!((world[i] - horn).norm(), 130.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_vanishing_horn_is_degenerate_for_every_leg() {
        // With a near-zero horn, the horn angle equation coefficients
        // ek and fk vanish and every leg must fail the degeneracy guard
        // instead of dividing by ~zero.
        let mut solver = StewartKinematics::new(Parameters {
            horn_length: 1e-8,
            ..Parameters::simulator_default()
        })
        .unwrap();
        let angles = solver.solve(&Pose::identity());
        assert!(angles.iter().all(|a| a.is_none()));
        for horn in solver.horn_positions() {
            assert_relative_eq!(horn, Vector3::zeros(), epsilon = 0.0);
        }
    }

    #[test]
    fn test_extreme_pose_yields_all_unreachable() {
        let mut solver = solver();
        let far = solver.home_height() * 100.0;
        let angles = solver.solve(&pose_xyz_rpy(0.0, 0.0, far, 0.0, 0.0, 0.0));
        assert!(angles.iter().all(|a| a.is_none()));
        for horn in solver.horn_positions() {
            assert_relative_eq!(horn, Vector3::zeros(), epsilon = 0.0);
        }
    }

    #[test]
    fn test_partial_reachability_keeps_other_legs() {
        // Large lateral shift with tilt: some legs drop out before others.
        let mut solver = solver();
        let mut seen_mixed = false;
        for x in 30..=120 {
            let angles = solver.solve(&pose_xyz_rpy(x as f64, 0.0, 0.0, 0.0, 0.35, 0.0));
            let reachable = angles.iter().filter(|a| a.is_some()).count();
            if reachable > 0 && reachable < LEGS {
                seen_mixed = true;
            }
        }
        assert!(seen_mixed, "expected at least one pose with mixed per-leg reachability");
    }

    #[test]
    fn test_solve_recovers_after_unreachable_pose() {
        let mut solver = solver();
        let far = solver.home_height() * 100.0;
        solver.solve(&pose_xyz_rpy(0.0, 0.0, far, 0.0, 0.0, 0.0));
        let angles = solver.solve(&Pose::identity());
        assert!(angles.iter().all(|a| a.is_some()));
    }

    #[test]
    fn test_solve_rpy_matches_quaternion_solve() {
        let mut a = solver();
        let mut b = solver();
        let translation = Vector3::new(4.0, -6.0, 3.0);
        let (roll, pitch, yaw) = (0.12, -0.08, 0.25);
        let via_rpy = a.solve_rpy(&translation, roll, pitch, yaw);
        let via_pose = b.solve(&Pose::from_parts(
            Translation3::from(translation),
            UnitQuaternion::from_euler_angles(roll, pitch, yaw),
        ));
        assert_eq!(via_rpy, via_pose);
    }

    #[test]
    fn test_rotation_limit_never_affects_solve() {
        let mut narrow = StewartKinematics::new(Parameters {
            rotation_limit: 5.0,
            ..Parameters::simulator_default()
        })
        .unwrap();
        let mut wide = StewartKinematics::new(Parameters {
            rotation_limit: 60.0,
            ..Parameters::simulator_default()
        })
        .unwrap();

        let pose = pose_xyz_rpy(10.0, 5.0, -8.0, 0.3, -0.2, 0.4);
        assert_eq!(narrow.solve(&pose), wide.solve(&pose));

        let narrow_box = narrow.workspace_limits();
        let wide_box = wide.workspace_limits();
        assert_eq!(narrow_box.rotation_range, (-5.0, 5.0));
        assert_eq!(wide_box.rotation_range, (-60.0, 60.0));
        assert_eq!(narrow_box.x_range, wide_box.x_range);
        assert_eq!(narrow_box.z_range, wide_box.z_range);
    }

    #[test]
    fn test_unreachable_geometry_is_rejected_at_construction() {
        // 80/50 mm plates put the leg 0 anchors ~54 mm apart; a 10+5 mm
        // leg cannot span that and must never produce a NaN home height.
        let stubby = Parameters {
            rod_length: 10.0,
            horn_length: 5.0,
            ..Parameters::simulator_default()
        };
        match StewartKinematics::new(stubby) {
            Err(ParameterError::UnreachableGeometry { span, reach }) => {
                assert!(span > reach);
            }
            other => panic!("expected UnreachableGeometry, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_parameters_are_rejected_at_construction() {
        let negative = Parameters {
            horn_length: -50.0,
            ..Parameters::simulator_default()
        };
        assert!(StewartKinematics::new(negative).is_err());
    }
}
