use tracing::{debug, trace};

use crate::components::{ControlInput, ForceBreakdown, StateVector};

/// Per-frame hooks into a rendering or plotting front end.
///
/// The driver calls each enabled hook once per recorded frame and `finish`
/// once after the integration loop exits.
pub trait Visualizer {
    fn draw_graphics(&mut self, _t: f64, _state: &StateVector) {}

    fn draw_forces(&mut self, _t: f64, _state: &StateVector, _forces: &ForceBreakdown) {}

    fn draw_states(&mut self, _t: f64, _state: &StateVector, _input: &ControlInput) {}

    fn finish(&mut self) {}
}

/// Ignores every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullVisualizer;

impl Visualizer for NullVisualizer {}

/// Writes frames to the `tracing` output.
#[derive(Debug, Default, Clone)]
pub struct TraceVisualizer {
    frames: usize,
    last_time: Option<f64>,
}

impl TraceVisualizer {
    /// Distinct frame times seen so far, whichever hooks were enabled.
    pub fn frames(&self) -> usize {
        self.frames
    }

    fn mark_frame(&mut self, t: f64) {
        if self.last_time != Some(t) {
            self.frames += 1;
            self.last_time = Some(t);
        }
    }
}

impl Visualizer for TraceVisualizer {
    fn draw_graphics(&mut self, t: f64, state: &StateVector) {
        self.mark_frame(t);
        trace!(
            t,
            north = state.position.x,
            east = state.position.y,
            altitude = state.altitude(),
            "frame"
        );
    }

    fn draw_forces(&mut self, t: f64, _state: &StateVector, forces: &ForceBreakdown) {
        self.mark_frame(t);
        let total = forces.total();
        trace!(
            t,
            aero = ?forces.aerodynamic.force,
            thrust = ?forces.propulsive.force,
            total = ?total.force,
            "forces"
        );
    }

    fn draw_states(&mut self, t: f64, state: &StateVector, input: &ControlInput) {
        self.mark_frame(t);
        trace!(t, state = ?state.serialize(), input = ?input.to_array(), "states");
    }

    fn finish(&mut self) {
        debug!(frames = self.frames, "visualization finished");
    }
}
