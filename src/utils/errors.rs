use std::io;
use thiserror::Error;

use crate::components::StateError;
use crate::solvers::IntegrationError;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Unsupported solver type: {0} (expected 0 = fixed-step, 1 = adaptive non-stiff, 2 = adaptive stiff)")]
    UnsupportedSolver(i64),

    #[error("Unsupported controller type: {0} (expected 0 = predefined sequence, 1 = trim-seeking)")]
    UnsupportedController(i64),

    #[error("Unsupported aerodynamics model: {0}")]
    UnsupportedAeroModel(i64),

    #[error("Config error: {0}")]
    InvalidConfig(String),

    #[error("Invalid control input: {0}")]
    InvalidControl(String),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Integration error: {0}")]
    Integration(#[from] IntegrationError),

    #[error("Trim error: {0}")]
    Trim(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
