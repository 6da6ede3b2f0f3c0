//! Defines the Stewart platform parameter data structure

pub mod stewart_kinematics {
    use crate::parameter_error::ParameterError;

    /// Mechanism parameters of a rotary-actuator 6-6 Stewart platform.
    /// All six base joints lie on a circle of `base_radius`, all six platform
    /// joints on a circle of `platform_radius`; legs are servo horn + rod
    /// linkages. Lengths share one unit (millimeters for the presets below).
    #[derive(Debug, Clone, Copy)]
    pub struct Parameters {
        /// Radius of the circle the six base joints lie on.
        pub base_radius: f64,

        /// Radius of the circle the six platform joints lie on, in the
        /// platform's local frame.
        pub platform_radius: f64,

        /// Length of the rigid rod connecting the horn tip to the platform joint.
        pub rod_length: f64,

        /// Length of the servo horn from the shaft to the rod attachment.
        pub horn_length: f64,

        /// Spacing between the two base anchors of a leg pair, measured along
        /// the base circle.
        pub shaft_distance: f64,

        /// Spacing between the two platform anchors of a leg pair, measured
        /// along the platform circle.
        pub anchor_distance: f64,

        /// Suggested roll/pitch/yaw range in degrees. Advisory only: it feeds
        /// the workspace estimate and never constrains the solver.
        pub rotation_limit: f64,
    }

    impl Parameters {
        /// The desktop simulator build: 80/50 mm plates, 130 mm rods,
        /// 50 mm horns, 20 mm anchor spacing.
        pub fn simulator_default() -> Self {
            Parameters {
                base_radius: 80.0,
                platform_radius: 50.0,
                rod_length: 130.0,
                horn_length: 50.0,
                shaft_distance: 20.0,
                anchor_distance: 20.0,
                rotation_limit: 30.0,
            }
        }

        /// Checks that every parameter can produce a buildable mechanism.
        /// The geometric reachability of leg 0 is checked separately when the
        /// solver is constructed, as it needs the derived joint positions.
        pub fn validate(&self) -> Result<(), ParameterError> {
            let required = [
                ("base_radius", self.base_radius),
                ("platform_radius", self.platform_radius),
                ("rod_length", self.rod_length),
                ("horn_length", self.horn_length),
                ("shaft_distance", self.shaft_distance),
                ("anchor_distance", self.anchor_distance),
            ];
            for (name, value) in required {
                if !value.is_finite() {
                    return Err(ParameterError::NonFinite { name, value });
                }
                if value <= 0.0 {
                    return Err(ParameterError::NonPositive { name, value });
                }
            }
            if !self.rotation_limit.is_finite() {
                return Err(ParameterError::NonFinite {
                    name: "rotation_limit",
                    value: self.rotation_limit,
                });
            }
            if self.rotation_limit < 0.0 {
                return Err(ParameterError::NegativeRotationLimit(self.rotation_limit));
            }
            Ok(())
        }

        /// Convert to string yaml representation (quick viewing, etc).
        pub fn to_yaml(&self) -> String {
            format!(
                "stewart_kinematics_geometric_parameters:\n  \
              base_radius: {}\n  \
              platform_radius: {}\n  \
              rod_length: {}\n  \
              horn_length: {}\n  \
              shaft_distance: {}\n  \
              anchor_distance: {}\n\
            stewart_kinematics_rotation_limit_degrees: {}\n",
                self.base_radius,
                self.platform_radius,
                self.rod_length,
                self.horn_length,
                self.shaft_distance,
                self.anchor_distance,
                self.rotation_limit
            )
        }
    }

    impl Default for Parameters {
        fn default() -> Self {
            Self::simulator_default()
        }
    }
}
