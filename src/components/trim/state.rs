use serde::{Deserialize, Serialize};

use crate::components::{ControlInput, StateVector};

/// Steady flight condition the trimmer searches for.
///
/// A `turn_radius` of `None` means straight flight. A positive radius turns
/// right, a negative one turns left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimCondition {
    /// True airspeed (m/s)
    pub airspeed: f64,
    /// Flight path angle γ (rad), positive climbing
    pub flight_path_angle: f64,
    /// Turn radius (m)
    pub turn_radius: Option<f64>,
}

impl TrimCondition {
    pub fn straight_and_level(airspeed: f64) -> Self {
        Self {
            airspeed,
            flight_path_angle: 0.0,
            turn_radius: None,
        }
    }

    pub fn steady_climb(airspeed: f64, gamma: f64) -> Self {
        Self {
            airspeed,
            flight_path_angle: gamma,
            turn_radius: None,
        }
    }

    pub fn coordinated_turn(airspeed: f64, radius: f64) -> Self {
        Self {
            airspeed,
            flight_path_angle: 0.0,
            turn_radius: Some(radius),
        }
    }

    /// Desired heading rate ψ̇ = V/R, zero for straight flight.
    pub fn turn_rate(&self) -> f64 {
        match self.turn_radius {
            Some(radius) if radius != 0.0 => self.airspeed / radius,
            _ => 0.0,
        }
    }

    pub fn is_turning(&self) -> bool {
        self.turn_rate() != 0.0
    }
}

impl Default for TrimCondition {
    fn default() -> Self {
        Self::straight_and_level(25.0)
    }
}

/// Results from the trim calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimResult {
    /// Equilibrium state. Position and heading carry the caller's initial values.
    pub state: StateVector,
    pub control: ControlInput,
    pub cost: f64,
    pub iterations: u64,
    pub converged: bool,
}
