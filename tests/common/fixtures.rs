use std::cell::Cell;
use std::rc::Rc;

use flyer_sim::components::{
    AircraftConfig, ControlInput, ControlKeyframe, StateVector, TrimCondition, TrimResult,
};
use flyer_sim::resources::SimulationOptions;
use flyer_sim::systems::{FlightDynamics, Trimmer};
use flyer_sim::Result;
use nalgebra::Vector3;

/// Short fixed-step run of the default aircraft with every recorder on
pub fn create_test_options(solver_type: i64) -> SimulationOptions {
    let mut options = SimulationOptions::default();
    options.solver.solver_type = solver_type;
    options.solver.t_0 = 0.0;
    options.solver.t_f = 1.0;
    options.solver.dt = 0.1;
    options.solver.t_eps = 1e-9;
    options.record_states = true;
    options.record_inputs = true;
    options.aircraft = AircraftConfig::aerosonde();
    options.controller.sequence = vec![
        ControlKeyframe::new(0.0, ControlInput::new(0.0, -0.05, 0.7, 0.0)),
        ControlKeyframe::new(0.5, ControlInput::new(0.1, -0.05, 0.7, 0.0)),
    ];
    options
}

/// Equilibrium handed out by [`MockTrimmer`]
pub fn create_trim_result() -> TrimResult {
    TrimResult {
        state: StateVector::new(
            Vector3::zeros(),
            Vector3::new(0.0, 0.0421, 0.0),
            Vector3::new(24.98, 0.0, 1.05),
            Vector3::zeros(),
        ),
        control: ControlInput::new(0.0, -0.118, 0.52, 0.0),
        cost: 1e-9,
        iterations: 42,
        converged: true,
    }
}

/// Trimmer that returns a fixed result and counts its calls
#[derive(Clone)]
pub struct MockTrimmer {
    pub result: TrimResult,
    pub calls: Rc<Cell<usize>>,
}

impl MockTrimmer {
    pub fn new(result: TrimResult) -> Self {
        Self {
            result,
            calls: Rc::new(Cell::new(0)),
        }
    }
}

impl Trimmer for MockTrimmer {
    fn trim(
        &self,
        _dynamics: &FlightDynamics,
        _condition: &TrimCondition,
        initial: &StateVector,
    ) -> Result<TrimResult> {
        self.calls.set(self.calls.get() + 1);
        let mut result = self.result;
        result.state.position = initial.position;
        result.state.attitude.z = initial.attitude.z;
        Ok(result)
    }
}
