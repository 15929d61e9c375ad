use std::cell::RefCell;
use std::rc::Rc;

use crate::common::*;
use flyer_sim::components::{ControlInput, ForceBreakdown, ForceTorquePair, StateVector};
use flyer_sim::resources::SimulationOptions;
use flyer_sim::simulation::Visualizer;
use flyer_sim::systems::{GravityModel, Vehicle};
use flyer_sim::{simulate, SimError, Simulation, SolverType};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

#[derive(Debug, Default, Clone, PartialEq)]
struct FrameCounts {
    graphics: usize,
    forces: usize,
    states: usize,
    finished: usize,
}

struct CountingVisualizer(Rc<RefCell<FrameCounts>>);

impl Visualizer for CountingVisualizer {
    fn draw_graphics(&mut self, _t: f64, _state: &StateVector) {
        self.0.borrow_mut().graphics += 1;
    }

    fn draw_forces(&mut self, _t: f64, _state: &StateVector, forces: &ForceBreakdown) {
        assert!(forces.total().is_finite());
        self.0.borrow_mut().forces += 1;
    }

    fn draw_states(&mut self, _t: f64, _state: &StateVector, _input: &ControlInput) {
        self.0.borrow_mut().states += 1;
    }

    fn finish(&mut self) {
        self.0.borrow_mut().finished += 1;
    }
}

struct NoGravity;

impl GravityModel for NoGravity {
    fn evaluate(&self, _vehicle: &Vehicle) -> ForceTorquePair {
        ForceTorquePair::zero()
    }
}

#[test]
fn test_fixed_step_loop_boundary() {
    let output = simulate(&create_test_options(0)).unwrap();

    assert_eq!(output.solver, SolverType::FixedStep);
    assert_eq!(output.stats.accepted_steps, 10);
    let states = output.states.unwrap();
    assert_eq!(states.len(), 11);
    assert_eq!(states.time[0], 0.0);
    assert!((states.time[10] - 1.0).abs() < 1e-9);
    for (_, state) in states.iter() {
        assert_state_valid(state);
    }
}

#[test]
fn test_fixed_step_inputs_follow_sequence() {
    let output = simulate(&create_test_options(0)).unwrap();
    let inputs = output.inputs.unwrap();

    for (t, input) in inputs.iter() {
        let expected_aileron = if t < 0.5 - 1e-12 { 0.0 } else { 0.1 };
        assert_eq!(input.aileron, expected_aileron, "aileron at t = {}", t);
        assert_eq!(input.throttle, 0.7);
    }
}

#[test]
fn test_invalid_solver_fails_before_trim() {
    let trimmer = MockTrimmer::new(create_trim_result());
    let calls = trimmer.calls.clone();
    let counts = Rc::new(RefCell::new(FrameCounts::default()));

    let mut options = create_test_options(99);
    options.controller.controller_type = 1;
    options.visualization.draw_graphics = true;

    let result = Simulation::new(options)
        .with_trimmer(Box::new(trimmer))
        .with_visualizer(Box::new(CountingVisualizer(counts.clone())))
        .run();

    assert!(matches!(result, Err(SimError::UnsupportedSolver(99))));
    assert_eq!(calls.get(), 0);
    assert_eq!(*counts.borrow(), FrameCounts::default());
}

#[test]
fn test_selectors_outside_byte_range_reported() {
    let result = simulate(&create_test_options(300));
    assert!(matches!(result, Err(SimError::UnsupportedSolver(300))));

    let mut options = create_test_options(0);
    options.controller.controller_type = -1;
    let result = simulate(&options);
    assert!(matches!(result, Err(SimError::UnsupportedController(-1))));
}

#[test]
fn test_trim_result_reaches_first_frame() {
    let trim = create_trim_result();
    let trimmer = MockTrimmer::new(trim);
    let calls = trimmer.calls.clone();

    let mut options = create_test_options(0);
    options.controller.controller_type = 1;
    let initial = options.init.to_state();

    let output = Simulation::new(options)
        .with_trimmer(Box::new(trimmer))
        .run()
        .unwrap();

    assert_eq!(calls.get(), 1);
    let states = output.states.unwrap();
    let (t0, first) = states.first().unwrap();
    assert_eq!(t0, 0.0);
    assert_eq!(first.position, initial.position);
    assert_eq!(first.attitude, trim.state.attitude);
    assert_eq!(first.velocity, trim.state.velocity);
    assert_eq!(first.angular_velocity, trim.state.angular_velocity);

    let inputs = output.inputs.unwrap();
    assert!(inputs.samples.iter().all(|input| *input == trim.control));
    assert_eq!(output.trim.unwrap().control, trim.control);
    assert!(output.warnings.is_empty());
}

#[test]
fn test_unconverged_trim_warns_and_continues() {
    let mut trim = create_trim_result();
    trim.converged = false;
    trim.cost = 0.3;

    let mut options = create_test_options(0);
    options.controller.controller_type = 1;
    let output = Simulation::new(options)
        .with_trimmer(Box::new(MockTrimmer::new(trim)))
        .run()
        .unwrap();

    assert_eq!(output.warnings.len(), 1);
    assert!(output.warnings[0].contains("trim did not converge"));
    assert_eq!(output.stats.accepted_steps, 10);
}

#[test]
fn test_adaptive_solvers_warn_on_input_recording() {
    for solver_type in [1, 2] {
        let output = simulate(&create_test_options(solver_type)).unwrap();
        assert_eq!(output.warnings.len(), 1, "solver {}", solver_type);

        let states = output.states.unwrap();
        let inputs = output.inputs.unwrap();
        assert_eq!(states.time, inputs.time);
        assert_eq!(states.last().unwrap().0, 1.0);
        assert!(states.time.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(states.len(), output.stats.accepted_steps + 1);
    }
}

#[test]
fn test_adaptive_without_input_recording_is_silent() {
    let mut options = create_test_options(1);
    options.record_inputs = false;
    let output = simulate(&options).unwrap();
    assert!(output.warnings.is_empty());
    assert!(output.inputs.is_none());
}

#[test]
fn test_solvers_agree_on_short_run() {
    let mut fine = create_test_options(0);
    fine.solver.dt = 1e-4;
    let reference = simulate(&fine).unwrap().final_state;

    for solver_type in [1, 2] {
        let mut options = create_test_options(solver_type);
        options.solver.rtol = 1e-8;
        options.solver.atol = 1e-10;
        let output = simulate(&options).unwrap();
        // fixed-step reference carries O(dt) error
        assert_state_eq(&output.final_state, &reference, 1e-2);
    }
}

#[test]
fn test_visualizer_called_per_frame() {
    let counts = Rc::new(RefCell::new(FrameCounts::default()));
    let mut options = create_test_options(0);
    options.visualization.draw_graphics = true;
    options.visualization.draw_forces = true;

    let output = Simulation::new(options)
        .with_visualizer(Box::new(CountingVisualizer(counts.clone())))
        .run()
        .unwrap();

    let frames = output.states.unwrap().len();
    assert_eq!(
        *counts.borrow(),
        FrameCounts {
            graphics: frames,
            forces: frames,
            states: 0,
            finished: 1,
        }
    );
}

#[test]
fn test_replaced_gravity_changes_trajectory() {
    let options = create_test_options(0);
    let with_gravity = simulate(&options).unwrap().final_state;
    let without_gravity = Simulation::new(options)
        .with_gravity(Box::new(NoGravity))
        .run()
        .unwrap()
        .final_state;

    assert!(without_gravity.altitude() > with_gravity.altitude());
}

#[test]
fn test_trimmed_straight_and_level_holds_altitude() {
    let mut options = create_test_options(0);
    options.controller.controller_type = 1;
    options.solver.dt = 0.01;
    let start = options.init.to_state();

    let output = simulate(&options).unwrap();
    let trim = output.trim.unwrap();
    assert!(trim.converged, "trim cost {}", trim.cost);
    assert!((output.final_state.altitude() - start.altitude()).abs() < 2.0);
    assert_state_valid(&output.final_state);
}

#[test]
fn test_run_from_yaml_file() -> flyer_sim::Result<()> {
    let yaml = r#"
solver:
  solver_type: 1
  t_f: 0.5
  dt: 0.05
record_states: true
controller:
  type: 0
  sequence:
    - time: 0.0
      input: {elevator: -0.05, throttle: 0.6}
init:
  position: [0.0, 0.0, -200.0]
  velocity: [20.0, 0.0, 0.0]
"#;
    let file = NamedTempFile::new()?;
    std::fs::write(file.path(), yaml)?;

    let options = SimulationOptions::from_yaml_file(file.path())?;
    let output = simulate(&options)?;

    let states = output.states.unwrap();
    assert_eq!(states.first().unwrap().1.velocity.x, 20.0);
    assert_eq!(states.last().unwrap().0, 0.5);
    assert!(output.inputs.is_none());
    Ok(())
}

#[test]
fn test_output_serializes_to_json() {
    let output = simulate(&create_test_options(0)).unwrap();
    let file = NamedTempFile::new().unwrap();
    output.save_json(file.path()).unwrap();

    let text = std::fs::read_to_string(file.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["stats"]["accepted_steps"], 10);
    assert_eq!(value["states"]["time"].as_array().unwrap().len(), 11);
}
