use argmin::core::Executor;
use argmin::solver::neldermead::NelderMead;
use tracing::{debug, info};

use crate::components::{StateVector, TrimCondition, TrimResult, TrimSolverConfig};
use crate::systems::physics::FlightDynamics;
use crate::systems::trim::{TrimProblem, Trimmer};
use crate::utils::{Result, SimError};

/// Derivative-free trim search with argmin's Nelder-Mead.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NelderMeadTrimmer {
    pub settings: TrimSolverConfig,
}

impl NelderMeadTrimmer {
    pub fn new(settings: TrimSolverConfig) -> Self {
        Self { settings }
    }

    fn initial_simplex(problem: &TrimProblem) -> Vec<Vec<f64>> {
        let guess = problem.initial_guess();
        let steps = problem.simplex_steps();
        let mut simplex = Vec::with_capacity(guess.len() + 1);
        simplex.push(guess.clone());
        for (i, step) in steps.iter().enumerate() {
            let mut vertex = guess.clone();
            vertex[i] += step;
            simplex.push(vertex);
        }
        simplex
    }
}

impl Trimmer for NelderMeadTrimmer {
    fn trim(
        &self,
        dynamics: &FlightDynamics,
        condition: &TrimCondition,
        initial: &StateVector,
    ) -> Result<TrimResult> {
        if !condition.airspeed.is_finite() || condition.airspeed <= 0.0 {
            return Err(SimError::Trim(format!(
                "trim airspeed must be positive, got {}",
                condition.airspeed
            )));
        }

        let problem = TrimProblem::new(dynamics, *condition, &self.settings, *initial);
        let mode = problem.mode;
        let simplex = Self::initial_simplex(&problem);
        debug!(?mode, vertices = simplex.len(), "starting trim search");

        let solver = NelderMead::new(simplex)
            .with_sd_tolerance(self.settings.sd_tolerance)
            .map_err(|e| SimError::Trim(e.to_string()))?;

        let result = Executor::new(problem.clone(), solver)
            .configure(|state| {
                state
                    .max_iters(self.settings.max_iterations)
                    .target_cost(self.settings.cost_tolerance)
            })
            .run()
            .map_err(|e| SimError::Trim(e.to_string()))?;

        let best_param = result
            .state
            .best_param
            .ok_or_else(|| SimError::Trim("trim search produced no parameters".to_string()))?;
        let cost = result.state.best_cost;
        let iterations = result.state.iter;
        let (state, control) = problem.build(&best_param)?;
        let converged = cost < self.settings.cost_tolerance;

        info!(
            elevator = control.elevator,
            throttle = control.throttle,
            alpha_deg = best_param[0].to_degrees(),
            cost,
            iterations,
            converged,
            "trim search finished"
        );

        Ok(TrimResult {
            state,
            control: control.clamped(),
            cost,
            iterations,
            converged,
        })
    }
}
