use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::utils::{Result, SimError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassModel {
    /// Total mass of the aircraft (Kg).
    pub mass: f64,
    /// Moment of inertia about the x-axis (kg·m²).
    pub ixx: f64,
    /// Moment of inertia about the y-axis (kg·m²).
    pub iyy: f64,
    /// Moment of inertia about the z-axis (kg·m²).
    pub izz: f64,
    /// Product of inertia between the x and z axes (kg·m²).
    pub ixz: f64,
}

impl MassModel {
    /// Creates a new `MassModel` instance with specified mass and inertia components.
    ///
    /// # Arguments
    /// * `mass` - Total mass of the aircraft (kg).
    /// * `ixx` - Moment of inertia about the x-axis (kg·m²).
    /// * `iyy` - Moment of inertia about the y-axis (kg·m²).
    /// * `izz` - Moment of inertia about the z-axis (kg·m²).
    /// * `ixz` - Product of inertia between the x and z axes (kg·m²).
    pub fn new(mass: f64, ixx: f64, iyy: f64, izz: f64, ixz: f64) -> Self {
        Self {
            mass,
            ixx,
            iyy,
            izz,
            ixz,
        }
    }

    /// The inertia matrix (3x3) representing the moments and products of inertia.
    pub fn inertia(&self) -> Matrix3<f64> {
        Matrix3::from_columns(&[
            Vector3::new(self.ixx, 0.0, -self.ixz),
            Vector3::new(0.0, self.iyy, 0.0),
            Vector3::new(-self.ixz, 0.0, self.izz),
        ])
    }

    /// Inverse of the inertia matrix, or an error for a non-physical tensor.
    pub fn inertia_inv(&self) -> Result<Matrix3<f64>> {
        self.inertia().try_inverse().ok_or_else(|| {
            SimError::InvalidConfig(format!(
                "inertia matrix is not invertible (ixx={}, iyy={}, izz={}, ixz={})",
                self.ixx, self.iyy, self.izz, self.ixz
            ))
        })
    }

    pub fn aerosonde() -> Self {
        Self::new(13.5, 0.8244, 1.135, 1.759, 0.1204)
    }
}

impl Default for MassModel {
    fn default() -> Self {
        Self::aerosonde()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_inertia_inverse() {
        let mass = MassModel::aerosonde();
        let product = mass.inertia() * mass.inertia_inv().unwrap();
        assert_relative_eq!(product, Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_singular_inertia_rejected() {
        let mass = MassModel::new(1.0, 0.0, 1.0, 1.0, 0.0);
        assert!(mass.inertia_inv().is_err());
    }
}
