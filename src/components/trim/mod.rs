mod config;
mod state;

pub use config::{LateralBounds, LongitudinalBounds, TrimConfig, TrimSolverConfig};
pub use state::{TrimCondition, TrimResult};
