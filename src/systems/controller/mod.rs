mod sequence;

pub use sequence::{ControlSequence, StaticController};

use serde::{Deserialize, Serialize};

use crate::components::{ControlInput, StateVector};
use crate::utils::{Result, SimError};

/// Source of control inputs during a run.
///
/// `output` must depend only on its arguments: integrators may evaluate it at
/// trial points that are later rejected.
pub trait Controller {
    fn output(&self, t: f64, state: &StateVector) -> ControlInput;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerType {
    /// Replays `controller.sequence`
    Sequence = 0,
    /// Trims first, then holds the trim control
    Trim = 1,
}

impl TryFrom<i64> for ControllerType {
    type Error = SimError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(ControllerType::Sequence),
            1 => Ok(ControllerType::Trim),
            other => Err(SimError::UnsupportedController(other)),
        }
    }
}
