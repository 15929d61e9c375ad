mod engine;

pub use engine::MotorPropeller;

use crate::components::{ControlInput, ForceTorquePair};
use crate::resources::EnvironmentSample;
use crate::systems::aerodynamics::Vehicle;

/// Thrust and propeller torque from the throttle channel.
pub trait PropulsionModel {
    fn evaluate(
        &self,
        vehicle: &Vehicle,
        env: &EnvironmentSample,
        control: &ControlInput,
    ) -> ForceTorquePair;
}
