//! Run orchestration: validation, trim pre-roll, integration and recording.

mod diagnostics;
mod driver;
mod output;
mod visualization;

pub use diagnostics::DiagnosticsScope;
pub use driver::{simulate, Simulation};
pub use output::{SimulationOutput, Trajectory};
pub use visualization::{NullVisualizer, TraceVisualizer, Visualizer};
