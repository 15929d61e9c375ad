pub mod config;
pub mod environment;

pub use config::{
    ControllerConfig, InitialConditions, SimulationOptions, SolverConfig, VisualizationConfig,
};
pub use environment::{
    AtmosphereConfig, AtmosphereType, EnvironmentConfig, EnvironmentModel, EnvironmentSample,
    WindConfig,
};
