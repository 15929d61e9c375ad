use std::cell::Cell;

use nalgebra::DVector;
use tracing::{debug, info};

use crate::components::{StateVector, TrimResult};
use crate::resources::SimulationOptions;
use crate::simulation::{
    DiagnosticsScope, NullVisualizer, SimulationOutput, TraceVisualizer, Trajectory, Visualizer,
};
use crate::solvers::SolverType;
use crate::systems::aerodynamics::AeroModelType;
use crate::systems::controller::{ControlSequence, Controller, ControllerType, StaticController};
use crate::systems::physics::{FlightDynamics, GravityModel};
use crate::systems::propulsion::PropulsionModel;
use crate::systems::trim::{NelderMeadTrimmer, Trimmer};
use crate::utils::{Result, SimError};

/// One configured simulation run.
///
/// Collaborators default to the Nelder–Mead trimmer, the motor/propeller
/// model, uniform gravity and a visualizer that writes to `tracing` when any
/// drawing flag is set.
pub struct Simulation {
    options: SimulationOptions,
    trimmer: Box<dyn Trimmer>,
    visualizer: Box<dyn Visualizer>,
    propulsion: Option<Box<dyn PropulsionModel>>,
    gravity: Option<Box<dyn GravityModel>>,
}

impl Simulation {
    pub fn new(options: SimulationOptions) -> Self {
        let trimmer = Box::new(NelderMeadTrimmer::new(options.trim.solver));
        let visualizer: Box<dyn Visualizer> = if options.visualization.any() {
            Box::new(TraceVisualizer::default())
        } else {
            Box::new(NullVisualizer)
        };
        Self {
            options,
            trimmer,
            visualizer,
            propulsion: None,
            gravity: None,
        }
    }

    pub fn with_trimmer(mut self, trimmer: Box<dyn Trimmer>) -> Self {
        self.trimmer = trimmer;
        self
    }

    pub fn with_visualizer(mut self, visualizer: Box<dyn Visualizer>) -> Self {
        self.visualizer = visualizer;
        self
    }

    pub fn with_propulsion(mut self, propulsion: Box<dyn PropulsionModel>) -> Self {
        self.propulsion = Some(propulsion);
        self
    }

    pub fn with_gravity(mut self, gravity: Box<dyn GravityModel>) -> Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    /// Rejects unsupported selectors and an unusable time span.
    ///
    /// Runs before the trimmer or any integration step.
    fn validate(&self) -> Result<(SolverType, ControllerType)> {
        let solver_type = SolverType::try_from(self.options.solver.solver_type)?;
        let controller_type = ControllerType::try_from(self.options.controller.controller_type)?;
        AeroModelType::try_from(self.options.aircraft.aero_model)?;

        let solver = &self.options.solver;
        if !(solver.t_0.is_finite() && solver.t_f.is_finite()) || solver.t_f <= solver.t_0 {
            return Err(SimError::InvalidConfig(format!(
                "t_f must be greater than t_0, got t_0 = {}, t_f = {}",
                solver.t_0, solver.t_f
            )));
        }
        if solver_type == SolverType::FixedStep && !(solver.dt.is_finite() && solver.dt > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "fixed-step dt must be positive, got {}",
                solver.dt
            )));
        }
        Ok((solver_type, controller_type))
    }

    fn build_dynamics(&mut self) -> Result<FlightDynamics> {
        let mut dynamics =
            FlightDynamics::new(self.options.aircraft.clone(), &self.options.environment)?;
        if let Some(propulsion) = self.propulsion.take() {
            dynamics = dynamics.with_propulsion(propulsion);
        }
        if let Some(gravity) = self.gravity.take() {
            dynamics = dynamics.with_gravity(gravity);
        }
        Ok(dynamics)
    }

    /// Executes the run: validation, optional trim pre-roll, integration and
    /// recording.
    pub fn run(mut self) -> Result<SimulationOutput> {
        let (solver_type, controller_type) = self.validate()?;
        let mut diagnostics = DiagnosticsScope::enter(solver_type, controller_type);

        let dynamics = self.build_dynamics()?;
        let mut initial = self.options.init.to_state();
        let mut trim = None;

        let controller: Box<dyn Controller> = match controller_type {
            ControllerType::Sequence => Box::new(ControlSequence::new(
                self.options.controller.sequence.clone(),
            )),
            ControllerType::Trim => {
                let result =
                    self.trimmer
                        .trim(&dynamics, &self.options.trim.condition, &initial)?;
                if !result.converged {
                    diagnostics.warn(format!(
                        "trim did not converge (cost {:.3e} after {} iterations), continuing from the best solution",
                        result.cost, result.iterations
                    ));
                }
                apply_trim(&mut initial, &result);
                trim = Some(result);
                Box::new(StaticController::new(result.control))
            }
        };

        let adaptive = solver_type.is_adaptive();
        if self.options.record_inputs && adaptive {
            diagnostics.warn(
                "record_inputs with an adaptive solver: inputs are the last values evaluated by the solver, not exact samples at the accepted step times",
            );
        }

        let solver = self.options.solver;
        let integrator = solver_type.integrator(&solver);
        info!(t_0 = solver.t_0, t_f = solver.t_f, "starting integration");

        let last_input = Cell::new(controller.output(solver.t_0, &initial));
        let rhs = |t: f64, y: &DVector<f64>| -> Result<DVector<f64>> {
            let state = StateVector::from_dvector(y)?;
            let control = controller.output(t, &state);
            last_input.set(control);
            Ok(dynamics.derivative(&state, &control).to_dvector())
        };

        let mut states = self.options.record_states.then(Trajectory::new);
        let mut inputs = self.options.record_inputs.then(Trajectory::new);
        let draw = self.options.visualization;
        let visualizer = &mut self.visualizer;

        let result = {
            let mut output = |t: f64, y: &DVector<f64>| -> Result<()> {
                let state = StateVector::from_dvector(y)?;
                let control = if adaptive {
                    last_input.get()
                } else {
                    controller.output(t, &state)
                };

                if let Some(states) = states.as_mut() {
                    states.push(t, state);
                }
                if let Some(inputs) = inputs.as_mut() {
                    inputs.push(t, control);
                }

                if draw.draw_graphics {
                    visualizer.draw_graphics(t, &state);
                }
                if draw.draw_forces {
                    visualizer.draw_forces(t, &state, &dynamics.forces(&state, &control));
                }
                if draw.draw_states {
                    visualizer.draw_states(t, &state, &control);
                }
                Ok(())
            };
            integrator.integrate(&rhs, &mut output, solver.t_0, solver.t_f, &initial.to_dvector())
        };
        visualizer.finish();
        let summary = result?;

        let final_state = StateVector::from_dvector(&summary.y_final)?;
        info!(
            t_final = summary.t_final,
            accepted = summary.stats.accepted_steps,
            rejected = summary.stats.rejected_steps,
            evaluations = summary.stats.rhs_evaluations,
            "simulation finished"
        );

        Ok(SimulationOutput {
            solver: solver_type,
            states,
            inputs,
            trim,
            final_time: summary.t_final,
            final_state,
            stats: summary.stats,
            warnings: diagnostics.take_warnings(),
        })
    }
}

/// Runs the simulation described by `options` with the default collaborators.
pub fn simulate(options: &SimulationOptions) -> Result<SimulationOutput> {
    Simulation::new(options.clone()).run()
}

/// Takes roll, pitch and both velocities from the trim solution. Position and
/// heading stay as configured.
fn apply_trim(initial: &mut StateVector, trim: &TrimResult) {
    initial.attitude.x = trim.state.attitude.x;
    initial.attitude.y = trim.state.attitude.y;
    initial.velocity = trim.state.velocity;
    initial.angular_velocity = trim.state.angular_velocity;
    debug!(
        roll = initial.attitude.x,
        pitch = initial.attitude.y,
        u = initial.velocity.x,
        w = initial.velocity.z,
        "initial state taken from trim"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ControlInput, ControlKeyframe};
    use crate::solvers::IntegrationError;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn options(solver_type: i64) -> SimulationOptions {
        let mut options = SimulationOptions::default();
        options.solver.solver_type = solver_type;
        options.solver.t_f = 1.0;
        options.solver.dt = 0.1;
        options.record_states = true;
        options.record_inputs = true;
        options.controller.sequence = vec![ControlKeyframe::new(
            0.0,
            ControlInput::new(0.0, -0.05, 0.6, 0.0),
        )];
        options
    }

    #[test]
    fn test_fixed_step_records_every_step() {
        let output = simulate(&options(0)).unwrap();
        let states = output.states.unwrap();
        let inputs = output.inputs.unwrap();

        assert_eq!(output.stats.accepted_steps, 10);
        assert_eq!(states.len(), 11);
        assert_eq!(inputs.len(), 11);
        assert_eq!(states.time, inputs.time);
        assert_eq!(states.first().unwrap().1, &SimulationOptions::default().init.to_state());
        assert_eq!(inputs.samples[3].throttle, 0.6);
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_recording_flags_off() {
        let mut options = options(0);
        options.record_states = false;
        options.record_inputs = false;
        let output = simulate(&options).unwrap();
        assert!(output.states.is_none());
        assert!(output.inputs.is_none());
        assert_relative_eq!(output.final_time, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_adaptive_input_recording_warns() {
        for solver_type in [1, 2] {
            let output = simulate(&options(solver_type)).unwrap();
            assert_eq!(output.warnings.len(), 1);
            assert!(output.warnings[0].contains("record_inputs"));
            let states = output.states.unwrap();
            assert_eq!(states.last().unwrap().0, 1.0);
            assert_eq!(output.inputs.unwrap().len(), states.len());
        }
    }

    #[test]
    fn test_invalid_span_rejected() {
        let mut options = options(1);
        options.solver.t_f = 0.0;
        assert!(matches!(simulate(&options), Err(SimError::InvalidConfig(_))));

        let mut options = self::options(0);
        options.solver.dt = -0.1;
        assert!(matches!(simulate(&options), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_unsupported_selectors() {
        let mut options = options(0);
        options.controller.controller_type = 7;
        assert!(matches!(
            simulate(&options),
            Err(SimError::UnsupportedController(7))
        ));

        let mut options = self::options(0);
        options.aircraft.aero_model = 4;
        assert!(matches!(
            simulate(&options),
            Err(SimError::UnsupportedAeroModel(4))
        ));
    }

    #[test]
    fn test_integration_failure_propagates() {
        let mut options = options(1);
        options.solver.max_steps = 2;
        options.solver.dt = 1e-4;
        assert!(matches!(
            simulate(&options),
            Err(SimError::Integration(IntegrationError::MaxStepsExceeded { .. }))
        ));
    }

    #[test]
    fn test_apply_trim_keeps_position_and_heading() {
        let mut initial = StateVector::new(
            Vector3::new(5.0, 6.0, -300.0),
            Vector3::new(0.0, 0.0, 1.2),
            Vector3::new(20.0, 0.0, 0.0),
            Vector3::zeros(),
        );
        let trim = TrimResult {
            state: StateVector::new(
                Vector3::zeros(),
                Vector3::new(0.1, 0.05, 0.0),
                Vector3::new(24.9, 0.0, 1.2),
                Vector3::new(0.0, 0.0, 0.01),
            ),
            control: ControlInput::default(),
            cost: 0.0,
            iterations: 1,
            converged: true,
        };
        apply_trim(&mut initial, &trim);
        assert_eq!(initial.position, Vector3::new(5.0, 6.0, -300.0));
        assert_eq!(initial.attitude, Vector3::new(0.1, 0.05, 1.2));
        assert_eq!(initial.velocity, trim.state.velocity);
        assert_eq!(initial.angular_velocity, trim.state.angular_velocity);
    }
}
