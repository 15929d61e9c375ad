use crate::components::{ControlInput, ControlKeyframe, StateVector};
use crate::systems::controller::Controller;

/// Zero-order hold over time-stamped keyframes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlSequence {
    keyframes: Vec<ControlKeyframe>,
}

impl ControlSequence {
    /// Keyframes are sorted by time; equal times keep their given order.
    pub fn new(mut keyframes: Vec<ControlKeyframe>) -> Self {
        keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keyframes }
    }

    pub fn keyframes(&self) -> &[ControlKeyframe] {
        &self.keyframes
    }
}

impl Controller for ControlSequence {
    fn output(&self, t: f64, _state: &StateVector) -> ControlInput {
        // Index of the first keyframe strictly after t
        let next = self.keyframes.partition_point(|k| k.time <= t);
        match next {
            0 => self
                .keyframes
                .first()
                .map(|k| k.input)
                .unwrap_or_default(),
            n => self.keyframes[n - 1].input,
        }
    }
}

/// Holds one input for the whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StaticController {
    input: ControlInput,
}

impl StaticController {
    pub fn new(input: ControlInput) -> Self {
        Self { input }
    }
}

impl Controller for StaticController {
    fn output(&self, _t: f64, _state: &StateVector) -> ControlInput {
        self.input
    }
}
