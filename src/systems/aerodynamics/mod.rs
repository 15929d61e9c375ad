mod air_data;
mod coefficients;
mod force_calculator;

pub use air_data::AirData;
pub use coefficients::{drag_coefficient, linear_lift, lift_coefficient, stall_blend};
pub use force_calculator::{calculate_aerodynamic_forces_moments, ClassicStallBlend};

use serde::{Deserialize, Serialize};

use crate::components::{AircraftConfig, ControlInput, ForceTorquePair, StateVector};
use crate::resources::EnvironmentSample;
use crate::utils::{Result, SimError};

/// Aircraft parameters and the state they are evaluated at.
#[derive(Debug, Clone, Copy)]
pub struct Vehicle<'a> {
    pub config: &'a AircraftConfig,
    pub state: &'a StateVector,
    pub air_data: AirData,
}

impl<'a> Vehicle<'a> {
    pub fn new(config: &'a AircraftConfig, state: &'a StateVector, env: &EnvironmentSample) -> Self {
        Self {
            config,
            state,
            air_data: AirData::from_state(state, &env.wind),
        }
    }
}

/// A body-frame aerodynamic force and torque model.
///
/// Implementations are pure: the same inputs always give the same output.
pub trait AerodynamicsModel {
    fn evaluate(
        &self,
        vehicle: &Vehicle,
        env: &EnvironmentSample,
        control: &ControlInput,
    ) -> ForceTorquePair;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AeroModelType {
    Classic = 0,
}

impl TryFrom<i64> for AeroModelType {
    type Error = SimError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(AeroModelType::Classic),
            other => Err(SimError::UnsupportedAeroModel(other)),
        }
    }
}

/// Available aerodynamics models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AeroModel {
    Classic(ClassicStallBlend),
}

impl AeroModel {
    pub fn from_type(model_type: i64) -> Result<Self> {
        Ok(match AeroModelType::try_from(model_type)? {
            AeroModelType::Classic => AeroModel::Classic(ClassicStallBlend),
        })
    }

    pub fn model_type(&self) -> AeroModelType {
        match self {
            AeroModel::Classic(_) => AeroModelType::Classic,
        }
    }
}

impl AerodynamicsModel for AeroModel {
    fn evaluate(
        &self,
        vehicle: &Vehicle,
        env: &EnvironmentSample,
        control: &ControlInput,
    ) -> ForceTorquePair {
        match self {
            AeroModel::Classic(model) => model.evaluate(vehicle, env, control),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_selection() {
        assert_eq!(
            AeroModel::from_type(0).unwrap().model_type(),
            AeroModelType::Classic
        );
        assert!(matches!(
            AeroModel::from_type(7),
            Err(SimError::UnsupportedAeroModel(7))
        ));
    }
}
