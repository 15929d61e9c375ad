mod atmosphere;
mod wind;

pub use atmosphere::{AtmosphereConfig, AtmosphereType};
pub use wind::WindConfig;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::utils::deg_to_rad;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    #[serde(rename = "wind")]
    pub wind_model_config: WindConfig,
    #[serde(rename = "atmosphere")]
    pub atmosphere_config: AtmosphereConfig,
}

impl EnvironmentConfig {
    pub fn new(wind_config: WindConfig, atmosphere_config: AtmosphereConfig) -> Self {
        Self {
            wind_model_config: wind_config,
            atmosphere_config,
        }
    }

    /// Horizontal wind blowing towards `wind_direction` (degrees from north).
    pub fn with_constant_wind(wind_speed: f64, wind_direction: f64) -> Self {
        let angle_rad = deg_to_rad(wind_direction);
        let velocity = Vector3::new(
            wind_speed * angle_rad.cos(),
            wind_speed * angle_rad.sin(),
            0.0,
        );

        Self {
            wind_model_config: WindConfig::Constant { velocity },
            atmosphere_config: AtmosphereConfig::default(),
        }
    }
}
