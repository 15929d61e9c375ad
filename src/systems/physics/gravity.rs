use nalgebra::Vector3;

use crate::components::ForceTorquePair;
use crate::systems::aerodynamics::Vehicle;
use crate::utils::GRAVITY;

/// Weight expressed in body axes.
pub trait GravityModel {
    fn evaluate(&self, vehicle: &Vehicle) -> ForceTorquePair;
}

/// Flat-earth gravity of constant magnitude along NED down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformGravity {
    pub g: f64,
}

impl Default for UniformGravity {
    fn default() -> Self {
        Self { g: GRAVITY }
    }
}

impl GravityModel for UniformGravity {
    fn evaluate(&self, vehicle: &Vehicle) -> ForceTorquePair {
        let weight = vehicle.config.mass.mass * self.g;
        let (sin_phi, cos_phi) = vehicle.state.attitude.x.sin_cos();
        let (sin_theta, cos_theta) = vehicle.state.attitude.y.sin_cos();
        ForceTorquePair::new(
            weight * Vector3::new(-sin_theta, cos_theta * sin_phi, cos_theta * cos_phi),
            Vector3::zeros(),
        )
    }
}
