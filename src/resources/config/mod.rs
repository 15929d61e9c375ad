pub mod simulation;

pub use simulation::{
    ControllerConfig, InitialConditions, SimulationOptions, SolverConfig, VisualizationConfig,
};
