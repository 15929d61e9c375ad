pub mod aerodynamics;
pub mod controller;
pub mod physics;
pub mod propulsion;
pub mod trim;

pub use aerodynamics::{AeroModel, AeroModelType, AerodynamicsModel, AirData, Vehicle};
pub use controller::{ControlSequence, Controller, ControllerType, StaticController};
pub use physics::{FlightDynamics, GravityModel, UniformGravity};
pub use propulsion::{MotorPropeller, PropulsionModel};
pub use trim::{NelderMeadTrimmer, Trimmer};
