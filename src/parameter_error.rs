//! Error handling for invalid platform geometry

use std::error::Error;
use std::fmt;

/// Reports a set of mechanism parameters from which the platform cannot be
/// built. Raised at construction time only; solve-time infeasibility is
/// always reported per leg, not through this type.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A required parameter is NaN or infinite.
    NonFinite { name: &'static str, value: f64 },
    /// A length, radius or spacing that must be strictly positive is not.
    NonPositive { name: &'static str, value: f64 },
    /// The rotation limit is advisory, but must still be a finite,
    /// non-negative angle in degrees.
    NegativeRotationLimit(f64),
    /// Rod and horn together are too short to span the horizontal offset
    /// between the two anchors of leg 0, so no real home height exists.
    UnreachableGeometry { span: f64, reach: f64 },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParameterError::NonFinite { name, value } =>
                write!(f, "Parameter {} must be finite, got {}", name, value),
            ParameterError::NonPositive { name, value } =>
                write!(f, "Parameter {} must be positive, got {}", name, value),
            ParameterError::NegativeRotationLimit(value) =>
                write!(f, "Rotation limit must be a non-negative angle in degrees, got {}", value),
            ParameterError::UnreachableGeometry { span, reach } =>
                write!(f, "Leg anchors are {:.3} apart in the base plane but rod and horn \
                       only reach {:.3}; the platform has no real home height", span, reach),
        }
    }
}

impl Error for ParameterError {}
