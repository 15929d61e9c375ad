use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WindConfig {
    /// Uniform wind in the NED frame (m/s).
    Constant { velocity: Vector3<f64> },
}

impl Default for WindConfig {
    fn default() -> Self {
        WindConfig::Constant {
            velocity: Vector3::zeros(),
        }
    }
}
