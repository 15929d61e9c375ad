pub const GRAVITY: f64 = 9.81; // m/s^2
pub const AIR_GAS_CONSTANT: f64 = 287.05287; // J/(kg·K)
pub const ISA_SEA_LEVEL_TEMP: f64 = 288.15; // K
pub const ISA_SEA_LEVEL_DENSITY: f64 = 1.225; // kg/m^3
pub const ISA_LAPSE_RATE: f64 = -0.0065; // K/m
pub const ISA_TROPOPAUSE_ALTITUDE: f64 = 11_000.0; // m

/// Density used by the small-UAV presets (kg/m^3)
pub const UAV_REFERENCE_DENSITY: f64 = 1.2682;

/// Number of scalars in a serialized state vector
pub const STATE_DIM: usize = 12;
