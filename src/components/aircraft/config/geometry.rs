use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Configuration for the geometry of an aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftGeometry {
    /// The total wing area of the aircraft (m²).
    pub wing_area: f64,
    /// The wingspan of the aircraft (m).
    pub wing_span: f64,
    /// The mean aerodynamic chord of the aircraft (m).
    pub mac: f64,
}

impl AircraftGeometry {
    /// Creates a new `AircraftGeometry` instance with the specified parameters.
    ///
    /// # Arguments
    /// * `wing_area` - The total wing area of the aircraft (m²).
    /// * `wing_span` - The wing span of the aircraft (m).
    /// * `mac` - The mean aerodynamic chord (m).
    pub fn new(wing_area: f64, wing_span: f64, mac: f64) -> Self {
        AircraftGeometry {
            wing_area,
            wing_span,
            mac,
        }
    }

    /// Wing aspect ratio `b² / S`.
    pub fn aspect_ratio(&self) -> f64 {
        self.wing_span * self.wing_span / self.wing_area
    }

    pub fn aerosonde() -> Self {
        Self::new(0.55, 2.90, 0.19)
    }
}

impl Default for AircraftGeometry {
    fn default() -> Self {
        Self::aerosonde()
    }
}

/// Maximum physical deflection for a full-scale (±1) surface command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlLimits {
    /// Aileron deflection at a unit command (rad).
    pub max_aileron: f64,
    /// Elevator deflection at a unit command (rad).
    pub max_elevator: f64,
    /// Rudder deflection at a unit command (rad).
    pub max_rudder: f64,
}

impl Default for ControlLimits {
    fn default() -> Self {
        Self {
            max_aileron: PI / 4.0,
            max_elevator: PI / 4.0,
            max_rudder: PI / 4.0,
        }
    }
}

/// Parameters of the pre-stall / post-stall lift blend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StallModel {
    /// Stall angle of attack α0 (rad).
    pub alpha_0: f64,
    /// Transition steepness M.
    pub steepness: f64,
}

impl Default for StallModel {
    fn default() -> Self {
        Self {
            alpha_0: 0.4712,
            steepness: 50.0,
        }
    }
}
