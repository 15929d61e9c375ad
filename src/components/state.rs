use nalgebra::{DVector, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::STATE_DIM;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("Expected {expected} state scalars, got {actual}")]
    Length { expected: usize, actual: usize },
}

/// Twelve-state rigid-body description of the aircraft.
///
/// The same layout doubles as a state derivative, where every field holds the
/// time derivative of its counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    /// Position in the NED frame (m): north, east, down.
    pub position: Vector3<f64>,
    /// Euler angles (rad): roll, pitch, yaw.
    pub attitude: Vector3<f64>,
    /// Body-frame velocity (m/s): u, v, w.
    pub velocity: Vector3<f64>,
    /// Body-frame angular rates (rad/s): p, q, r.
    pub angular_velocity: Vector3<f64>,
}

impl Default for StateVector {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            attitude: Vector3::zeros(),
            velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

impl StateVector {
    pub fn new(
        position: Vector3<f64>,
        attitude: Vector3<f64>,
        velocity: Vector3<f64>,
        angular_velocity: Vector3<f64>,
    ) -> Self {
        Self {
            position,
            attitude,
            velocity,
            angular_velocity,
        }
    }

    /// Flattens the state into `[pn, pe, pd, φ, θ, ψ, u, v, w, p, q, r]`.
    pub fn serialize(&self) -> [f64; STATE_DIM] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.attitude.x,
            self.attitude.y,
            self.attitude.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
            self.angular_velocity.x,
            self.angular_velocity.y,
            self.angular_velocity.z,
        ]
    }

    /// Rebuilds a state from the layout produced by [`StateVector::serialize`].
    pub fn deserialize(values: &[f64]) -> Result<Self, StateError> {
        if values.len() != STATE_DIM {
            return Err(StateError::Length {
                expected: STATE_DIM,
                actual: values.len(),
            });
        }

        Ok(Self {
            position: Vector3::new(values[0], values[1], values[2]),
            attitude: Vector3::new(values[3], values[4], values[5]),
            velocity: Vector3::new(values[6], values[7], values[8]),
            angular_velocity: Vector3::new(values[9], values[10], values[11]),
        })
    }

    pub fn to_dvector(&self) -> DVector<f64> {
        DVector::from_row_slice(&self.serialize())
    }

    pub fn from_dvector(values: &DVector<f64>) -> Result<Self, StateError> {
        Self::deserialize(values.as_slice())
    }

    /// Altitude above the NED origin (m).
    pub fn altitude(&self) -> f64 {
        -self.position.z
    }

    pub fn is_finite(&self) -> bool {
        self.serialize().iter().all(|v| v.is_finite())
    }
}
