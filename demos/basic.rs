use anyhow::Context;
use nalgebra::{Translation3, UnitQuaternion, Vector3};
use rs_stewart_kinematics::kinematic_traits::Pose;
use rs_stewart_kinematics::kinematics_impl::StewartKinematics;
use rs_stewart_kinematics::parameters::stewart_kinematics::Parameters;
use rs_stewart_kinematics::utils::{all_feasible, as_radians, dump_angles};

fn main() -> anyhow::Result<()> {
    let parameters = Parameters::simulator_default();
    println!("{}", parameters.to_yaml());

    let mut platform =
        StewartKinematics::new(parameters).context("platform geometry is not buildable")?;
    println!("Home height: {:.2} mm", platform.home_height());

    println!("\nCentered pose:");
    let angles = platform.solve(&Pose::identity()); // ServoAngles is alias of [Option<f64>; 6]
    dump_angles(&angles);

    println!("\nShifted 20 mm along X, raised 10 mm, tilted 10 degrees in roll:");
    let [roll, pitch, yaw] = as_radians([10, 0, 0]);
    let pose = Pose::from_parts(
        Translation3::new(20.0, 0.0, 10.0),
        UnitQuaternion::from_euler_angles(roll, pitch, yaw),
    );
    let angles = platform.solve(&pose);
    dump_angles(&angles);

    println!("\nFar outside the envelope; every leg reports unreachable:");
    let angles = platform.solve_rpy(&Vector3::new(0.0, 0.0, 500.0), 0.0, 0.0, 0.0);
    dump_angles(&angles);
    assert!(!all_feasible(&angles));

    let limits = platform.workspace_limits();
    println!("\nSuggested input ranges (advisory, per axis):");
    println!("  x: {:.1} .. {:.1} mm", limits.x_range.0, limits.x_range.1);
    println!("  y: {:.1} .. {:.1} mm", limits.y_range.0, limits.y_range.1);
    println!("  z: {:.1} .. {:.1} mm", limits.z_range.0, limits.z_range.1);
    println!(
        "  roll/pitch/yaw: {:.1} .. {:.1} degrees",
        limits.rotation_range.0, limits.rotation_range.1
    );
    Ok(())
}
