//! Conservative motion envelope of the mechanism.
//!
//! The envelope is an independent per-axis box derived from the lengths
//! alone, meant to bound slider ranges of a control surface. It is not a
//! reachability computation: the axes are decoupled, so individual legs may
//! still reject poses inside the box, and off-center builds may be under- or
//! over-estimated. Treat it as a range hint, never as a safety guarantee.

use crate::parameters::stewart_kinematics::Parameters;

/// Never suggest a degenerate X/Y slider range, whatever the build.
const MIN_XY_RANGE: f64 = 10.0;

/// Independent per-axis motion ranges, each a closed `(min, max)` interval.
/// Translations are relative to the home pose, rotations in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkspaceLimits {
    /// Translation range along X.
    pub x_range: (f64, f64),

    /// Translation range along Y.
    pub y_range: (f64, f64),

    /// Translation range along Z, relative to the home height. The lower
    /// bound is clamped so the platform never drops below the base plane.
    pub z_range: (f64, f64),

    /// Roll/pitch/yaw range, taken directly from the configured rotation
    /// limit rather than derived from the geometry.
    pub rotation_range: (f64, f64),
}

impl WorkspaceLimits {
    /// Fixed box reported when the derived estimate is not finite.
    pub fn fallback() -> Self {
        WorkspaceLimits {
            x_range: (-50.0, 50.0),
            y_range: (-50.0, 50.0),
            z_range: (-30.0, 30.0),
            rotation_range: (-30.0, 30.0),
        }
    }

    fn is_finite(&self) -> bool {
        [self.x_range, self.y_range, self.z_range, self.rotation_range]
            .iter()
            .all(|(min, max)| min.is_finite() && max.is_finite())
    }
}

/// Derives the envelope from the parameters and the home height. Falls back
/// to [WorkspaceLimits::fallback] instead of propagating numeric failures,
/// since the box is advisory.
pub(crate) fn estimate(parameters: &Parameters, home_height: f64) -> WorkspaceLimits {
    let max_extension = parameters.rod_length + parameters.horn_length;
    let min_extension = (parameters.rod_length - parameters.horn_length).abs();
    let radius_diff = (parameters.base_radius - parameters.platform_radius).abs();

    let z_min = (home_height - min_extension).max(0.0) - home_height;
    let z_max = max_extension;

    let xy_max = max_extension
        .min(parameters.base_radius - radius_diff)
        .max(MIN_XY_RANGE);

    let limits = WorkspaceLimits {
        x_range: (-xy_max, xy_max),
        y_range: (-xy_max, xy_max),
        z_range: (z_min, z_max),
        rotation_range: (-parameters.rotation_limit, parameters.rotation_limit),
    };
    if limits.is_finite() {
        limits
    } else {
        WorkspaceLimits::fallback()
    }
}
