//! Helper functions

use crate::kinematic_traits::ServoAngles;

/// True when the last solve reached all six legs.
pub fn all_feasible(angles: &ServoAngles) -> bool {
    angles.iter().all(|angle| angle.is_some())
}

/// Print servo angles of one solve in degrees, marking unreachable legs.
#[allow(dead_code)]
pub fn dump_angles(angles: &ServoAngles) {
    let mut row_str = String::new();
    for angle in angles {
        match angle {
            Some(degrees) => row_str.push_str(&format!("{:7.2} ", degrees)),
            None => row_str.push_str("   ---- "),
        }
    }
    println!("[{}]", row_str.trim_end());
}

/// Allows to specify roll, pitch and yaw in degrees (converts to radians)
#[allow(dead_code)]
pub fn as_radians(degrees: [i32; 3]) -> [f64; 3] {
    std::array::from_fn(|i| (degrees[i] as f64).to_radians())
}
