use nalgebra::Matrix3;

use crate::components::{ForceTorquePair, MassModel, StateVector};
use crate::utils::{body_to_inertial, euler_rate_matrix, Result};

/// Mass properties in the form the equations of motion consume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    pub mass: f64,
    pub inertia: Matrix3<f64>,
    pub inertia_inv: Matrix3<f64>,
}

impl RigidBody {
    pub fn from_mass_model(mass: &MassModel) -> Result<Self> {
        Ok(Self {
            mass: mass.mass,
            inertia: mass.inertia(),
            inertia_inv: mass.inertia_inv()?,
        })
    }
}

/// Time derivative of the 12-state Euler-angle rigid body under body-frame loads.
pub fn rigid_body_derivative(
    body: &RigidBody,
    state: &StateVector,
    loads: &ForceTorquePair,
) -> StateVector {
    let velocity = state.velocity;
    let omega = state.angular_velocity;

    let position_rate = body_to_inertial(&state.attitude) * velocity;
    let attitude_rate = euler_rate_matrix(&state.attitude) * omega;

    // Transport term: [rv - qw, pw - ru, qu - pv]
    let acceleration = -omega.cross(&velocity) + loads.force / body.mass;

    let gyro_term = omega.cross(&(body.inertia * omega));
    let angular_acceleration = body.inertia_inv * (loads.torque - gyro_term);

    StateVector::new(
        position_rate,
        attitude_rate,
        acceleration,
        angular_acceleration,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use std::f64::consts::PI;

    fn transport(velocity: &Vector3<f64>, omega: &Vector3<f64>) -> Vector3<f64> {
        Vector3::new(
            omega.z * velocity.y - omega.y * velocity.z,
            omega.x * velocity.z - omega.z * velocity.x,
            omega.y * velocity.x - omega.x * velocity.y,
        )
    }

    fn body() -> RigidBody {
        RigidBody::from_mass_model(&MassModel::aerosonde()).unwrap()
    }

    #[test]
    fn test_unloaded_level_flight_coasts() {
        let state = StateVector::new(
            Vector3::new(0.0, 0.0, -100.0),
            Vector3::zeros(),
            Vector3::new(25.0, 0.0, 0.0),
            Vector3::zeros(),
        );
        let derivative = rigid_body_derivative(&body(), &state, &ForceTorquePair::zero());

        assert_relative_eq!(derivative.position, Vector3::new(25.0, 0.0, 0.0));
        assert_relative_eq!(derivative.attitude, Vector3::zeros());
        assert_relative_eq!(derivative.velocity, Vector3::zeros());
        assert_relative_eq!(derivative.angular_velocity, Vector3::zeros());
    }

    #[test]
    fn test_position_rate_follows_heading() {
        let state = StateVector::new(
            Vector3::zeros(),
            Vector3::new(0.0, 0.0, PI / 2.0),
            Vector3::new(20.0, 0.0, 0.0),
            Vector3::zeros(),
        );
        let derivative = rigid_body_derivative(&body(), &state, &ForceTorquePair::zero());
        assert_relative_eq!(derivative.position, Vector3::new(0.0, 20.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_transport_term() {
        let velocity = Vector3::new(20.0, 1.0, 2.0);
        let omega = Vector3::new(0.1, 0.2, -0.3);
        let state = StateVector::new(Vector3::zeros(), Vector3::zeros(), velocity, omega);
        let derivative = rigid_body_derivative(&body(), &state, &ForceTorquePair::zero());
        assert_relative_eq!(derivative.velocity, transport(&velocity, &omega), epsilon = 1e-12);
    }

    #[test]
    fn test_force_and_torque_response() {
        let body = body();
        let loads = ForceTorquePair::new(Vector3::new(27.0, 0.0, -13.5), Vector3::new(0.0, 1.135, 0.0));
        let derivative = rigid_body_derivative(&body, &StateVector::default(), &loads);

        assert_relative_eq!(derivative.velocity, Vector3::new(2.0, 0.0, -1.0), epsilon = 1e-12);
        // Pure pitch torque on a body with no ixy/iyz coupling
        assert_relative_eq!(derivative.angular_velocity.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(derivative.angular_velocity.x, 0.0, epsilon = 1e-12);
    }
}
