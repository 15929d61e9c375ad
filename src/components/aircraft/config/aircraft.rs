use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::components::aircraft::config::{
    AircraftAeroCoefficients, AircraftGeometry, ControlLimits, MassModel, PropulsionConfig,
    StallModel,
};
use crate::utils::{Result, SimError};

/// The full aircraft configuration, including mass, geometry, and aerodynamic coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftConfig {
    /// Name of the aircraft, defaults to type name.
    pub name: String,
    /// Aerodynamics model selector, resolved when the dynamics are built.
    pub aero_model: i64,
    /// Mass model of the aircraft, including weight and inertia properties.
    pub mass: MassModel,
    /// The geometric properties of the aircraft, such as wing span and chord.
    pub geometry: AircraftGeometry,
    /// Aerodynamic coefficients for calculating forces and moments on the aircraft.
    pub aero_coef: AircraftAeroCoefficients,
    /// Surface deflection at full-scale command.
    pub limits: ControlLimits,
    /// Stall-blend parameters.
    pub stall: StallModel,
    /// Motor and propeller constants.
    pub propulsion: PropulsionConfig,
}

/// Where an aircraft configuration comes from.
#[derive(Debug, Clone)]
pub enum AircraftSource {
    Programmed(AircraftType),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AircraftType {
    Aerosonde,
    Custom(String),
}

impl Default for AircraftConfig {
    /// The `Aerosonde` configuration is chosen as the default for convenience.
    fn default() -> Self {
        Self::aerosonde()
    }
}

impl AircraftConfig {
    /// Creates a new aircraft configuration from a given source.
    ///
    /// # Arguments
    /// * `source` - An `AircraftSource` enum specifying if the configuration is hardcoded
    ///              (`Programmed`) or loaded from a file (`File`).
    pub fn new(source: AircraftSource) -> Result<Self> {
        match source {
            AircraftSource::Programmed(aircraft_type) => Self::from_programmed(aircraft_type),
            AircraftSource::File(path) => Self::from_yaml_file(path),
        }
    }

    fn from_programmed(aircraft_type: AircraftType) -> Result<Self> {
        match aircraft_type {
            AircraftType::Aerosonde => Ok(Self::aerosonde()),
            AircraftType::Custom(name) => Err(SimError::InvalidConfig(format!(
                "no programmed configuration for custom aircraft '{}', load it from a file",
                name
            ))),
        }
    }

    pub fn aerosonde() -> Self {
        Self {
            name: "Aerosonde".to_string(),
            aero_model: 0,
            mass: MassModel::aerosonde(),
            geometry: AircraftGeometry::aerosonde(),
            aero_coef: AircraftAeroCoefficients::aerosonde(),
            limits: ControlLimits::default(),
            stall: StallModel::default(),
            propulsion: PropulsionConfig::aerosonde(),
        }
    }
}
