use nalgebra::DVector;
use tracing::trace;

use crate::solvers::{
    ensure_finite, error_norm, initial_step, min_step, validate_span, AdaptiveOptions,
    IntegrationError, IntegrationSummary, Integrator, OutputFn, Rhs, SolverStats,
};
use crate::utils::Result;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;
const ERROR_EXPONENT: f64 = -1.0 / 5.0;

const C: [f64; 7] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];

const A: [[f64; 6]; 7] = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
        0.0,
    ],
    [
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
    ],
];

/// Fifth-order weights; identical to the last stage row so `k7 = f(t + h, y_new)`.
const B: [f64; 7] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
    0.0,
];

/// Difference between the fifth- and embedded fourth-order weights.
const E: [f64; 7] = [
    71.0 / 57600.0,
    0.0,
    -71.0 / 16695.0,
    71.0 / 1920.0,
    -17253.0 / 339200.0,
    22.0 / 525.0,
    -1.0 / 40.0,
];

/// Dormand–Prince 5(4) with error control on the embedded fourth-order solution.
///
/// The solution is propagated with the fifth-order weights and the final stage
/// is reused as the first stage of the next step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DormandPrince45 {
    pub options: AdaptiveOptions,
}

struct Attempt {
    y_new: DVector<f64>,
    f_new: DVector<f64>,
    error: DVector<f64>,
}

impl DormandPrince45 {
    pub fn new(options: AdaptiveOptions) -> Self {
        Self { options }
    }

    fn attempt(
        &self,
        rhs: &Rhs,
        t: f64,
        y: &DVector<f64>,
        f: &DVector<f64>,
        h: f64,
    ) -> Result<Attempt> {
        let mut k: Vec<DVector<f64>> = Vec::with_capacity(7);
        k.push(f.clone());

        for stage in 1..7 {
            let mut y_stage = y.clone();
            for (j, kj) in k.iter().enumerate() {
                let a = A[stage][j];
                if a != 0.0 {
                    y_stage.axpy(h * a, kj, 1.0);
                }
            }
            k.push(rhs(t + C[stage] * h, &y_stage)?);
        }

        let mut y_new = y.clone();
        let mut error = DVector::zeros(y.len());
        for (i, ki) in k.iter().enumerate() {
            if B[i] != 0.0 {
                y_new.axpy(h * B[i], ki, 1.0);
            }
            error.axpy(h * E[i], ki, 1.0);
        }

        let f_new = k.pop().unwrap_or_else(|| f.clone());
        Ok(Attempt {
            y_new,
            f_new,
            error,
        })
    }
}

impl Integrator for DormandPrince45 {
    fn integrate(
        &self,
        rhs: &Rhs,
        output: &mut OutputFn,
        t0: f64,
        tf: f64,
        y0: &DVector<f64>,
    ) -> Result<IntegrationSummary> {
        validate_span(t0, tf)?;
        self.options.validate()?;
        let options = &self.options;

        let mut stats = SolverStats::default();
        let mut t = t0;
        let mut y = y0.clone();
        let mut f = rhs(t, &y)?;
        stats.rhs_evaluations += 1;
        ensure_finite("derivative", t, &f)?;
        output(t, &y)?;

        let mut h = match options.first_step {
            Some(h) if h > 0.0 => h.min(options.max_step),
            _ => initial_step(rhs, t, &y, &f, 4, options, &mut stats)?,
        };
        let mut previous_rejected = false;

        while t < tf {
            if stats.accepted_steps + stats.rejected_steps >= options.max_steps {
                return Err(IntegrationError::MaxStepsExceeded {
                    max_steps: options.max_steps,
                    t,
                    tf,
                }
                .into());
            }

            let h_min = min_step(t, tf);
            if h < h_min {
                return Err(IntegrationError::StepSizeUnderflow { t, h }.into());
            }
            let last = t + h >= tf - h_min;
            if last {
                h = tf - t;
            }

            let attempt = self.attempt(rhs, t, &y, &f, h)?;
            stats.rhs_evaluations += 6;

            let norm = if attempt.y_new.iter().all(|v| v.is_finite()) {
                error_norm(&attempt.error, &y, &attempt.y_new, options.atol, options.rtol)
            } else {
                f64::INFINITY
            };

            if norm <= 1.0 {
                t = if last { tf } else { t + h };
                y = attempt.y_new;
                f = attempt.f_new;
                stats.accepted_steps += 1;
                output(t, &y)?;

                let mut factor = if norm == 0.0 {
                    MAX_FACTOR
                } else {
                    (SAFETY * norm.powf(ERROR_EXPONENT)).clamp(MIN_FACTOR, MAX_FACTOR)
                };
                if previous_rejected {
                    factor = factor.min(1.0);
                }
                h = (h * factor).min(options.max_step);
                previous_rejected = false;
            } else {
                stats.rejected_steps += 1;
                let factor = if norm.is_finite() {
                    (SAFETY * norm.powf(ERROR_EXPONENT)).max(MIN_FACTOR)
                } else {
                    MIN_FACTOR
                };
                trace!(t, h, norm, "step rejected");
                h *= factor;
                previous_rejected = true;
            }
        }

        Ok(IntegrationSummary {
            t_final: t,
            y_final: y,
            stats,
        })
    }
}
