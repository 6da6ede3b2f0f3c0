//! Shared type aliases and constants of the Stewart platform kinematics API.

extern crate nalgebra as na;

use na::{Isometry3, Vector3};

/// Number of legs (and servos) of the 6-6 platform.
pub const LEGS: usize = 6;

/// Pose of the moving platform relative to its home position. It contains both
/// the Cartesian translation and the rotation quaternion.
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(5.0, 0.0, 10.0);
/// // Roll, pitch, yaw in radians; applied in intrinsic Z-Y-X order.
/// let rotation = UnitQuaternion::from_euler_angles(0.1, 0.0, 0.2);
/// let pose = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Positions of the six joints of one plate, in fixed leg order 0..5.
pub type JointPositions = [Vector3<f64>; LEGS];

/// Result of one inverse kinematics solve: servo horn angle in degrees per
/// leg, `None` where the requested pose is not reachable for that leg.
/// Use `all_feasible` in utils.rs to check if the whole pose is reachable.
pub type ServoAngles = [Option<f64>; LEGS];
