use serde::{Deserialize, Serialize};

/// Constants of the electric motor / propeller model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropulsionConfig {
    /// Propeller disc area (m²)
    pub prop_area: f64,
    /// Propeller efficiency coefficient
    pub c_prop: f64,
    /// Motor constant: exit airspeed at full throttle (m/s)
    pub k_motor: f64,
    /// Propeller torque constant
    pub k_tp: f64,
    /// Propeller speed constant
    pub k_omega: f64,
}

impl PropulsionConfig {
    pub fn aerosonde() -> Self {
        Self {
            prop_area: 0.2027,
            c_prop: 1.0,
            k_motor: 80.0,
            k_tp: 0.0,
            k_omega: 0.0,
        }
    }
}

impl Default for PropulsionConfig {
    fn default() -> Self {
        Self::aerosonde()
    }
}
