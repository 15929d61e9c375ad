pub mod config;

pub use config::{
    AircraftAeroCoefficients, AircraftConfig, AircraftGeometry, AircraftSource, AircraftType,
    ControlLimits, DragCoefficients, LiftCoefficients, MassModel, PitchCoefficients,
    PropulsionConfig, RollCoefficients, SideForceCoefficients, StallModel, YawCoefficients,
};
