use serde::{Deserialize, Serialize};

use crate::components::{ControlInput, StateVector, TrimResult};
use crate::solvers::{SolverStats, SolverType};

/// Time-stamped samples in simulation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory<T> {
    pub time: Vec<f64>,
    pub samples: Vec<T>,
}

impl<T> Default for Trajectory<T> {
    fn default() -> Self {
        Self {
            time: Vec::new(),
            samples: Vec::new(),
        }
    }
}

impl<T> Trajectory<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, t: f64, sample: T) {
        self.time.push(t);
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn first(&self) -> Option<(f64, &T)> {
        Some((*self.time.first()?, self.samples.first()?))
    }

    pub fn last(&self) -> Option<(f64, &T)> {
        Some((*self.time.last()?, self.samples.last()?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &T)> {
        self.time.iter().copied().zip(self.samples.iter())
    }
}

/// Result of a completed run.
///
/// `states` and `inputs` are present only when the matching recording flag was
/// set. Under an adaptive solver the recorded times are the accepted step
/// times and the input samples are best-effort (see `warnings`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub solver: SolverType,
    pub states: Option<Trajectory<StateVector>>,
    pub inputs: Option<Trajectory<ControlInput>>,
    pub trim: Option<TrimResult>,
    pub final_time: f64,
    pub final_state: StateVector,
    pub stats: SolverStats,
    pub warnings: Vec<String>,
}

impl SimulationOutput {
    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> crate::utils::Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
