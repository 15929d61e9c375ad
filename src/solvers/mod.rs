//! Time integrators behind one [`Integrator`] interface.
//!
//! All three take a pure right-hand side `f(t, y)` and report each accepted
//! point through an output callback, starting with `(t0, y0)`.

mod bdf;
mod dormand_prince;
mod fixed_step;

pub use bdf::Bdf;
pub use dormand_prince::DormandPrince45;
pub use fixed_step::FixedStepExplicit;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resources::SolverConfig;
use crate::utils::{Result, SimError};

/// Right-hand side `dy/dt = f(t, y)`.
pub type Rhs<'a> = dyn Fn(f64, &DVector<f64>) -> Result<DVector<f64>> + 'a;
/// Called once per accepted point.
pub type OutputFn<'a> = dyn FnMut(f64, &DVector<f64>) -> Result<()> + 'a;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrationError {
    #[error("Step size underflow at t = {t} (h = {h:e})")]
    StepSizeUnderflow { t: f64, h: f64 },

    #[error("Exceeded {max_steps} steps before reaching t = {tf} (stopped at t = {t})")]
    MaxStepsExceeded { max_steps: usize, t: f64, tf: f64 },

    #[error("Non-finite value in {what} at t = {t}")]
    NonFinite { what: &'static str, t: f64 },

    #[error("Singular Newton iteration matrix at t = {t}")]
    SingularMatrix { t: f64 },

    #[error("Newton iteration failed to converge at t = {t} (h = {h:e})")]
    NewtonDiverged { t: f64, h: f64 },

    #[error("Invalid integrator setting: {0}")]
    InvalidSetting(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverType {
    FixedStep = 0,
    AdaptiveNonStiff = 1,
    AdaptiveStiff = 2,
}

impl SolverType {
    pub fn is_adaptive(&self) -> bool {
        !matches!(self, SolverType::FixedStep)
    }

    /// Builds the integrator for this strategy from the run's solver settings.
    pub fn integrator(&self, config: &SolverConfig) -> Box<dyn Integrator> {
        match self {
            SolverType::FixedStep => Box::new(FixedStepExplicit::new(config.dt, config.t_eps)),
            SolverType::AdaptiveNonStiff => Box::new(DormandPrince45::new(
                AdaptiveOptions::from_solver_config(config),
            )),
            SolverType::AdaptiveStiff => Box::new(Bdf::new(
                AdaptiveOptions::from_solver_config(config),
                config.max_order,
            )),
        }
    }
}

impl TryFrom<i64> for SolverType {
    type Error = SimError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(SolverType::FixedStep),
            1 => Ok(SolverType::AdaptiveNonStiff),
            2 => Ok(SolverType::AdaptiveStiff),
            other => Err(SimError::UnsupportedSolver(other)),
        }
    }
}

/// Work counters of one integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SolverStats {
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    pub rhs_evaluations: usize,
    pub jacobian_evaluations: usize,
    pub lu_decompositions: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationSummary {
    pub t_final: f64,
    pub y_final: DVector<f64>,
    pub stats: SolverStats,
}

pub trait Integrator {
    /// Advances `y0` from `t0` to `tf`, calling `output` at `t0` and after
    /// every accepted step.
    fn integrate(
        &self,
        rhs: &Rhs,
        output: &mut OutputFn,
        t0: f64,
        tf: f64,
        y0: &DVector<f64>,
    ) -> Result<IntegrationSummary>;
}

/// Tolerances and limits shared by the adaptive integrators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveOptions {
    pub rtol: f64,
    pub atol: f64,
    /// Initial step; estimated from the problem when `None`.
    pub first_step: Option<f64>,
    pub max_step: f64,
    /// Limit on attempted (accepted plus rejected) steps.
    pub max_steps: usize,
}

impl Default for AdaptiveOptions {
    fn default() -> Self {
        Self {
            rtol: 1e-6,
            atol: 1e-8,
            first_step: None,
            max_step: f64::INFINITY,
            max_steps: 100_000,
        }
    }
}

impl AdaptiveOptions {
    pub fn from_solver_config(config: &SolverConfig) -> Self {
        Self {
            rtol: config.rtol,
            atol: config.atol,
            first_step: (config.dt > 0.0).then_some(config.dt),
            max_step: f64::INFINITY,
            max_steps: config.max_steps,
        }
    }

    fn validate(&self) -> std::result::Result<(), IntegrationError> {
        if !(self.rtol >= 0.0 && self.atol >= 0.0) || (self.rtol == 0.0 && self.atol == 0.0) {
            return Err(IntegrationError::InvalidSetting(format!(
                "tolerances must be non-negative and not both zero (rtol = {}, atol = {})",
                self.rtol, self.atol
            )));
        }
        if !(self.max_step > 0.0) {
            return Err(IntegrationError::InvalidSetting(format!(
                "max_step must be positive, got {}",
                self.max_step
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_span(t0: f64, tf: f64) -> std::result::Result<(), IntegrationError> {
    if !(t0.is_finite() && tf.is_finite()) || tf <= t0 {
        return Err(IntegrationError::InvalidSetting(format!(
            "integration span must satisfy t0 < tf, got [{}, {}]",
            t0, tf
        )));
    }
    Ok(())
}

pub(crate) fn ensure_finite(
    what: &'static str,
    t: f64,
    values: &DVector<f64>,
) -> std::result::Result<(), IntegrationError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(IntegrationError::NonFinite { what, t })
    }
}

/// Weighted RMS norm of `error` with per-component scale `atol + rtol·max(|y|, |y_new|)`.
pub(crate) fn error_norm(
    error: &DVector<f64>,
    y: &DVector<f64>,
    y_new: &DVector<f64>,
    atol: f64,
    rtol: f64,
) -> f64 {
    let n = error.len().max(1) as f64;
    let sum: f64 = error
        .iter()
        .zip(y.iter().zip(y_new.iter()))
        .map(|(e, (a, b))| {
            let scale = atol + rtol * a.abs().max(b.abs());
            (e / scale).powi(2)
        })
        .sum();
    (sum / n).sqrt()
}

/// Starting step from the derivative scale of the problem (Hairer, Nørsett & Wanner).
pub(crate) fn initial_step(
    rhs: &Rhs,
    t0: f64,
    y0: &DVector<f64>,
    f0: &DVector<f64>,
    order: usize,
    options: &AdaptiveOptions,
    stats: &mut SolverStats,
) -> Result<f64> {
    let d0 = error_norm(y0, y0, y0, options.atol, options.rtol);
    let d1 = error_norm(f0, y0, y0, options.atol, options.rtol);
    let h0 = if d0 < 1e-5 || d1 < 1e-5 {
        1e-6
    } else {
        0.01 * d0 / d1
    };

    let y1 = y0 + f0 * h0;
    let f1 = rhs(t0 + h0, &y1)?;
    stats.rhs_evaluations += 1;
    let d2 = error_norm(&(&f1 - f0), y0, y0, options.atol, options.rtol) / h0;

    let h1 = if d1.max(d2) <= 1e-15 {
        (h0 * 1e-3).max(1e-6)
    } else {
        (0.01 / d1.max(d2)).powf(1.0 / (order as f64 + 1.0))
    };

    Ok((100.0 * h0).min(h1).min(options.max_step))
}

/// Smallest step distinguishable from `t` in floating point.
pub(crate) fn min_step(t: f64, tf: f64) -> f64 {
    10.0 * f64::EPSILON * t.abs().max(tf.abs()).max(f64::MIN_POSITIVE)
}
