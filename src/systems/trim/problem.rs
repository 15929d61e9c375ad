use argmin::core::{CostFunction, Error as ArgminError};
use nalgebra::Vector3;

use crate::components::{ControlInput, StateVector, TrimCondition, TrimSolverConfig};
use crate::systems::physics::FlightDynamics;
use crate::utils::{Result, SimError, GRAVITY};

const PENALTY_WEIGHT: f64 = 100.0;

/// Which variables the search moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimMode {
    /// `[alpha, elevator, throttle]`, lateral variables held at zero
    Longitudinal,
    /// `[alpha, beta, phi, elevator, throttle, aileron, rudder]`
    Combined,
}

impl TrimMode {
    pub fn for_condition(condition: &TrimCondition) -> Self {
        if condition.is_turning() {
            TrimMode::Combined
        } else {
            TrimMode::Longitudinal
        }
    }

    pub fn dimension(&self) -> usize {
        match self {
            TrimMode::Longitudinal => 3,
            TrimMode::Combined => 7,
        }
    }
}

/// Decoded search variables.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct TrimVariables {
    alpha: f64,
    beta: f64,
    phi: f64,
    control: ControlInput,
}

/// Squared derivative residual of a candidate trim point.
#[derive(Clone)]
pub struct TrimProblem<'a> {
    pub dynamics: &'a FlightDynamics,
    pub condition: TrimCondition,
    pub settings: &'a TrimSolverConfig,
    /// Supplies position and heading, which trim leaves untouched.
    pub initial: StateVector,
    pub mode: TrimMode,
}

impl<'a> TrimProblem<'a> {
    pub fn new(
        dynamics: &'a FlightDynamics,
        condition: TrimCondition,
        settings: &'a TrimSolverConfig,
        initial: StateVector,
    ) -> Self {
        Self {
            dynamics,
            condition,
            settings,
            initial,
            mode: TrimMode::for_condition(&condition),
        }
    }

    /// Starting point of the search.
    pub fn initial_guess(&self) -> Vec<f64> {
        match self.mode {
            TrimMode::Longitudinal => vec![0.05, 0.0, 0.5],
            TrimMode::Combined => {
                let v = self.condition.airspeed;
                let bank = (v * self.condition.turn_rate() / GRAVITY).atan();
                vec![0.05, 0.0, bank, 0.0, 0.5, 0.0, 0.0]
            }
        }
    }

    /// Per-variable edge length of the initial simplex.
    pub fn simplex_steps(&self) -> Vec<f64> {
        match self.mode {
            TrimMode::Longitudinal => vec![0.05, 0.1, 0.1],
            TrimMode::Combined => vec![0.05, 0.02, 0.05, 0.1, 0.1, 0.05, 0.05],
        }
    }

    fn decode(&self, param: &[f64]) -> TrimVariables {
        let lon = &self.settings.longitudinal_bounds;
        let lat = &self.settings.lateral_bounds;
        let clamp = |value: f64, range: (f64, f64)| value.clamp(range.0, range.1);

        match self.mode {
            TrimMode::Longitudinal => TrimVariables {
                alpha: clamp(param[0], lon.alpha_range),
                control: ControlInput::new(
                    0.0,
                    clamp(param[1], lon.elevator_range),
                    clamp(param[2], lon.throttle_range),
                    0.0,
                ),
                ..TrimVariables::default()
            },
            TrimMode::Combined => TrimVariables {
                alpha: clamp(param[0], lon.alpha_range),
                beta: clamp(param[1], lat.beta_range),
                phi: clamp(param[2], lat.phi_range),
                control: ControlInput::new(
                    clamp(param[5], lat.aileron_range),
                    clamp(param[3], lon.elevator_range),
                    clamp(param[4], lon.throttle_range),
                    clamp(param[6], lat.rudder_range),
                ),
            },
        }
    }

    fn penalty(&self, param: &[f64]) -> f64 {
        let lon = &self.settings.longitudinal_bounds;
        let lat = &self.settings.lateral_bounds;
        let bounded: Vec<(f64, (f64, f64))> = match self.mode {
            TrimMode::Longitudinal => vec![
                (param[0], lon.alpha_range),
                (param[1], lon.elevator_range),
                (param[2], lon.throttle_range),
            ],
            TrimMode::Combined => vec![
                (param[0], lon.alpha_range),
                (param[1], lat.beta_range),
                (param[2], lat.phi_range),
                (param[3], lon.elevator_range),
                (param[4], lon.throttle_range),
                (param[5], lat.aileron_range),
                (param[6], lat.rudder_range),
            ],
        };
        bounded
            .into_iter()
            .map(|(value, range)| calculate_constraint_penalty(value, range, PENALTY_WEIGHT))
            .sum()
    }

    fn check_dimension(&self, param: &[f64]) -> Result<()> {
        if param.len() == self.mode.dimension() {
            Ok(())
        } else {
            Err(SimError::Trim(format!(
                "trim parameter vector must have length {}, got {}",
                self.mode.dimension(),
                param.len()
            )))
        }
    }

    /// The state and (clamped) control described by a parameter vector.
    pub fn build(&self, param: &[f64]) -> Result<(StateVector, ControlInput)> {
        self.check_dimension(param)?;
        let vars = self.decode(param);
        let airspeed = self.condition.airspeed;
        let gamma = self.condition.flight_path_angle;
        let turn_rate = self.condition.turn_rate();

        let theta = vars.alpha + gamma;
        let (sin_alpha, cos_alpha) = vars.alpha.sin_cos();
        let (sin_beta, cos_beta) = vars.beta.sin_cos();
        let (sin_phi, cos_phi) = vars.phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();

        let state = StateVector::new(
            self.initial.position,
            Vector3::new(vars.phi, theta, self.initial.attitude.z),
            Vector3::new(
                airspeed * cos_alpha * cos_beta,
                airspeed * sin_beta,
                airspeed * sin_alpha * cos_beta,
            ),
            Vector3::new(
                -turn_rate * sin_theta,
                turn_rate * sin_phi * cos_theta,
                turn_rate * cos_phi * cos_theta,
            ),
        );
        Ok((state, vars.control))
    }

    /// Sum of squared differences between actual and desired derivatives.
    pub fn residual(&self, state: &StateVector, control: &ControlInput) -> f64 {
        let derivative = self.dynamics.derivative(state, control);
        let desired_down_rate = -self.condition.airspeed * self.condition.flight_path_angle.sin();
        let desired_attitude_rate = Vector3::new(0.0, 0.0, self.condition.turn_rate());

        (derivative.position.z - desired_down_rate).powi(2)
            + (derivative.attitude - desired_attitude_rate).norm_squared()
            + derivative.velocity.norm_squared()
            + derivative.angular_velocity.norm_squared()
    }
}

/// Quadratic penalty for leaving `range`.
pub(crate) fn calculate_constraint_penalty(value: f64, range: (f64, f64), weight: f64) -> f64 {
    let (min, max) = range;
    let below_min = if value < min { (min - value).powi(2) } else { 0.0 };
    let above_max = if value > max { (value - max).powi(2) } else { 0.0 };
    weight * (below_min + above_max)
}

impl CostFunction for TrimProblem<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> std::result::Result<Self::Output, ArgminError> {
        let (state, control) = self.build(param).map_err(|e| ArgminError::msg(e.to_string()))?;
        let cost = self.residual(&state, &control) + self.penalty(param);
        if cost.is_finite() {
            Ok(cost)
        } else {
            Ok(f64::MAX)
        }
    }
}
