use serde::{Deserialize, Serialize};

use crate::utils::{ISA_SEA_LEVEL_TEMP, UAV_REFERENCE_DENSITY};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereConfig {
    pub model_type: AtmosphereType,
    /// Density at zero altitude, or everywhere for `Constant` (kg/m³)
    pub sea_level_density: f64,
    /// Temperature at zero altitude (K), `Standard` only
    pub sea_level_temperature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AtmosphereType {
    Constant,
    Standard,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            model_type: AtmosphereType::Constant,
            sea_level_density: UAV_REFERENCE_DENSITY,
            sea_level_temperature: ISA_SEA_LEVEL_TEMP,
        }
    }
}

impl AtmosphereConfig {
    pub fn constant(density: f64) -> Self {
        Self {
            model_type: AtmosphereType::Constant,
            sea_level_density: density,
            ..Self::default()
        }
    }

    pub fn standard() -> Self {
        Self {
            model_type: AtmosphereType::Standard,
            sea_level_density: crate::utils::ISA_SEA_LEVEL_DENSITY,
            sea_level_temperature: ISA_SEA_LEVEL_TEMP,
        }
    }
}
