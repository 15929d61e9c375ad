use nalgebra::DVector;

use crate::solvers::{
    ensure_finite, validate_span, IntegrationError, IntegrationSummary, Integrator, OutputFn, Rhs,
    SolverStats,
};
use crate::utils::Result;

/// Forward Euler with a constant step.
///
/// Steps are taken while `tf - t > t_eps`, so the final time is `t0 + n·dt`
/// and may fall short of or overshoot `tf` by less than one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepExplicit {
    pub dt: f64,
    pub t_eps: f64,
}

impl FixedStepExplicit {
    pub fn new(dt: f64, t_eps: f64) -> Self {
        Self { dt, t_eps }
    }

    /// One explicit step `y + dt·f(t, y)`.
    pub fn step(&self, rhs: &Rhs, t: f64, y: &DVector<f64>) -> Result<DVector<f64>> {
        let derivative = rhs(t, y)?;
        Ok(y + derivative * self.dt)
    }
}

impl Integrator for FixedStepExplicit {
    fn integrate(
        &self,
        rhs: &Rhs,
        output: &mut OutputFn,
        t0: f64,
        tf: f64,
        y0: &DVector<f64>,
    ) -> Result<IntegrationSummary> {
        validate_span(t0, tf)?;
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(IntegrationError::InvalidSetting(format!(
                "fixed step must be positive, got {}",
                self.dt
            ))
            .into());
        }

        let mut stats = SolverStats::default();
        let mut t = t0;
        let mut y = y0.clone();
        output(t, &y)?;

        while tf - t > self.t_eps {
            y = self.step(rhs, t, &y)?;
            stats.rhs_evaluations += 1;
            t += self.dt;
            ensure_finite("state", t, &y)?;
            stats.accepted_steps += 1;
            output(t, &y)?;
        }

        Ok(IntegrationSummary {
            t_final: t,
            y_final: y,
            stats,
        })
    }
}
