use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::StateVector;
use crate::utils::body_to_inertial;

/// Air-relative flight condition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AirData {
    /// True airspeed (m/s)
    pub true_airspeed: f64,
    /// Angle of attack (rad)
    pub alpha: f64,
    /// Sideslip angle (rad)
    pub beta: f64,
    /// Air-relative velocity in body axes (m/s)
    pub relative_velocity: Vector3<f64>,
}

impl AirData {
    /// Air data for a state flying through an inertial (NED) wind.
    pub fn from_state(state: &StateVector, wind: &Vector3<f64>) -> Self {
        let wind_body = body_to_inertial(&state.attitude).inverse() * wind;
        Self::from_relative_velocity(state.velocity - wind_body)
    }

    pub fn from_relative_velocity(relative_velocity: Vector3<f64>) -> Self {
        let airspeed = relative_velocity.norm();
        if airspeed == 0.0 {
            return Self::default();
        }

        Self {
            true_airspeed: airspeed,
            alpha: relative_velocity.z.atan2(relative_velocity.x),
            beta: (relative_velocity.y / airspeed).clamp(-1.0, 1.0).asin(),
            relative_velocity,
        }
    }
}
