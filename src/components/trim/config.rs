use serde::{Deserialize, Serialize};

use crate::components::trim::TrimCondition;
use crate::utils::deg_to_rad;

/// Symmetric interval in degrees, stored in radians.
fn degrees_band(limit_deg: f64) -> (f64, f64) {
    (deg_to_rad(-limit_deg), deg_to_rad(limit_deg))
}

/// Nelder-Mead settings plus the box every trim parameter is clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimSolverConfig {
    pub max_iterations: u64,
    /// Search stops once the residual cost falls below this; also the convergence test.
    pub cost_tolerance: f64,
    /// Simplex spread at which the search is considered collapsed.
    pub sd_tolerance: f64,
    pub lateral_bounds: LateralBounds,
    pub longitudinal_bounds: LongitudinalBounds,
}

impl Default for TrimSolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            cost_tolerance: 1e-6,
            sd_tolerance: 1e-12,
            lateral_bounds: LateralBounds::default(),
            longitudinal_bounds: LongitudinalBounds::default(),
        }
    }
}

/// Pitch-plane limits. Surface ranges are normalised commands, angles are radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongitudinalBounds {
    pub elevator_range: (f64, f64),
    pub throttle_range: (f64, f64),
    pub alpha_range: (f64, f64),
}

impl Default for LongitudinalBounds {
    fn default() -> Self {
        Self {
            elevator_range: (-1.0, 1.0),
            throttle_range: (0.0, 1.0),
            alpha_range: degrees_band(20.0),
        }
    }
}

/// Roll/yaw limits, only consulted by the coordinated-turn search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LateralBounds {
    pub aileron_range: (f64, f64),
    pub rudder_range: (f64, f64),
    pub beta_range: (f64, f64),
    pub phi_range: (f64, f64),
}

impl Default for LateralBounds {
    fn default() -> Self {
        Self {
            aileron_range: (-1.0, 1.0),
            rudder_range: (-1.0, 1.0),
            beta_range: degrees_band(20.0),
            phi_range: degrees_band(80.0),
        }
    }
}

/// The `trim` section of the simulation options.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimConfig {
    pub condition: TrimCondition,
    pub solver: TrimSolverConfig,
}
