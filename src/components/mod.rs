pub mod aircraft;
pub mod controls;
pub mod physics;
pub mod state;
pub mod trim;

pub use aircraft::*;
pub use controls::{ControlInput, ControlKeyframe};
pub use physics::{ForceBreakdown, ForceTorquePair};
pub use state::{StateError, StateVector};
pub use trim::{
    LateralBounds, LongitudinalBounds, TrimCondition, TrimConfig, TrimResult, TrimSolverConfig,
};
