//! Fixed-wing flight dynamics simulation.
//!
//! A run is described by [`SimulationOptions`] and executed by [`simulate`]
//! (or a [`Simulation`] with replaced collaborators). The aircraft is
//! advanced with one of three integrators: fixed-step explicit,
//! Dormand–Prince 5(4) or variable-order BDF.

pub mod components;
pub mod resources;
pub mod simulation;
pub mod solvers;
pub mod systems;
pub mod utils;

pub use components::{ControlInput, ForceTorquePair, StateVector, TrimCondition, TrimResult};
pub use resources::SimulationOptions;
pub use simulation::{simulate, Simulation, SimulationOutput, Trajectory};
pub use solvers::{Integrator, SolverType};
pub use utils::{Result, SimError};
