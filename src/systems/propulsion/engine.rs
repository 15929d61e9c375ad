use nalgebra::Vector3;

use crate::components::{ControlInput, ForceTorquePair, PropulsionConfig};
use crate::resources::EnvironmentSample;
use crate::systems::aerodynamics::Vehicle;
use crate::systems::propulsion::PropulsionModel;

/// Electric motor driving a fixed-pitch propeller.
///
/// Thrust is the momentum change between the freestream and a propeller exit
/// speed proportional to throttle, so it falls off with airspeed and turns
/// negative once the aircraft outruns the propwash.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotorPropeller;

impl MotorPropeller {
    pub fn thrust(config: &PropulsionConfig, density: f64, airspeed: f64, throttle: f64) -> f64 {
        let exit_speed = config.k_motor * throttle;
        0.5 * density * config.prop_area * config.c_prop * (exit_speed.powi(2) - airspeed.powi(2))
    }

    pub fn torque(config: &PropulsionConfig, throttle: f64) -> f64 {
        -config.k_tp * (config.k_omega * throttle).powi(2)
    }
}

impl PropulsionModel for MotorPropeller {
    fn evaluate(
        &self,
        vehicle: &Vehicle,
        env: &EnvironmentSample,
        control: &ControlInput,
    ) -> ForceTorquePair {
        let config = &vehicle.config.propulsion;
        ForceTorquePair::new(
            Vector3::new(
                Self::thrust(
                    config,
                    env.density,
                    vehicle.air_data.true_airspeed,
                    control.throttle,
                ),
                0.0,
                0.0,
            ),
            Vector3::new(Self::torque(config, control.throttle), 0.0, 0.0),
        )
    }
}
