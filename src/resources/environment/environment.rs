use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::config::{AtmosphereConfig, AtmosphereType, EnvironmentConfig, WindConfig};
use crate::utils::{AIR_GAS_CONSTANT, GRAVITY, ISA_LAPSE_RATE, ISA_TROPOPAUSE_ALTITUDE};

/// Air properties at one point of the trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSample {
    /// Air density (kg/m³)
    pub density: f64,
    /// Inertial (NED) wind velocity (m/s)
    pub wind: Vector3<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct EnvironmentModel {
    atmosphere: AtmosphereConfig,
    wind: WindConfig,
}

impl EnvironmentModel {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            atmosphere: config.atmosphere_config,
            wind: config.wind_model_config,
        }
    }

    /// Wind at an NED position.
    pub fn get_wind(&self, _position: &Vector3<f64>) -> Vector3<f64> {
        match self.wind {
            WindConfig::Constant { velocity } => velocity,
        }
    }

    /// Density at an NED position. Altitude is `-down`.
    pub fn get_density(&self, position: &Vector3<f64>) -> f64 {
        match self.atmosphere.model_type {
            AtmosphereType::Constant => self.atmosphere.sea_level_density,
            AtmosphereType::Standard => {
                let altitude = (-position.z).min(ISA_TROPOPAUSE_ALTITUDE);
                let t0 = self.atmosphere.sea_level_temperature;
                let ratio = (t0 + ISA_LAPSE_RATE * altitude) / t0;
                let exponent = -GRAVITY / (AIR_GAS_CONSTANT * ISA_LAPSE_RATE) - 1.0;
                self.atmosphere.sea_level_density * ratio.powf(exponent)
            }
        }
    }

    pub fn sample(&self, position: &Vector3<f64>) -> EnvironmentSample {
        EnvironmentSample {
            density: self.get_density(position),
            wind: self.get_wind(position),
        }
    }
}
