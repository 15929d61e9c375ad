use std::collections::VecDeque;

use nalgebra::{DMatrix, DVector};
use tracing::trace;

use crate::solvers::{
    ensure_finite, error_norm, initial_step, min_step, validate_span, AdaptiveOptions,
    IntegrationError, IntegrationSummary, Integrator, OutputFn, Rhs, SolverStats,
};
use crate::utils::Result;

pub const MAX_ORDER: usize = 5;
const NEWTON_MAX_ITER: usize = 4;
const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const NEWTON_FAILURE_FACTOR: f64 = 0.25;

/// Variable-order, variable-step backward differentiation formulas.
///
/// The corrector is built directly on the stored solution points, so step
/// changes need no history rescaling. Each step solves the implicit equation
/// with a simplified Newton iteration on `a0·I - J`, where `J` is a
/// finite-difference Jacobian taken at the predicted point. The local error is
/// estimated from the predictor–corrector difference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bdf {
    pub options: AdaptiveOptions,
    pub max_order: usize,
}

impl Default for Bdf {
    fn default() -> Self {
        Self {
            options: AdaptiveOptions::default(),
            max_order: MAX_ORDER,
        }
    }
}

type History = VecDeque<(f64, DVector<f64>)>;

impl Bdf {
    pub fn new(options: AdaptiveOptions, max_order: usize) -> Self {
        Self { options, max_order }
    }

    /// Converged corrector value, or `None` when the iteration diverges.
    fn solve_corrector(
        &self,
        rhs: &Rhs,
        t_new: f64,
        y_pred: &DVector<f64>,
        a0: f64,
        history_term: &DVector<f64>,
        stats: &mut SolverStats,
    ) -> Result<Option<DVector<f64>>> {
        let n = y_pred.len();
        let mut f = rhs(t_new, y_pred)?;
        stats.rhs_evaluations += 1;
        if !f.iter().all(|v| v.is_finite()) {
            return Ok(None);
        }

        let jac = jacobian(rhs, t_new, y_pred, &f, stats)?;
        let lu = (DMatrix::identity(n, n) * a0 - jac).lu();
        stats.lu_decompositions += 1;

        let AdaptiveOptions { rtol, atol, .. } = self.options;
        let scale = y_pred.map(|v| atol + rtol * v.abs());
        let tol = (10.0 * f64::EPSILON / rtol.max(f64::EPSILON)).max(rtol.sqrt().min(0.03));

        let mut y = y_pred.clone();
        let mut dy_norm_old: Option<f64> = None;
        for iteration in 0..NEWTON_MAX_ITER {
            if iteration > 0 {
                f = rhs(t_new, &y)?;
                stats.rhs_evaluations += 1;
                if !f.iter().all(|v| v.is_finite()) {
                    return Ok(None);
                }
            }

            let residual = &y * a0 + history_term - &f;
            let dy = lu
                .solve(&(-residual))
                .ok_or(IntegrationError::SingularMatrix { t: t_new })?;
            let dy_norm = (dy.component_div(&scale).norm_squared() / n.max(1) as f64).sqrt();

            let rate = dy_norm_old.map(|old| dy_norm / old);
            if rate.map_or(false, |r| r >= 1.0) {
                return Ok(None);
            }
            y += &dy;

            if dy_norm == 0.0 || rate.map_or(false, |r| r / (1.0 - r) * dy_norm < tol) {
                return Ok(Some(y));
            }
            dy_norm_old = Some(dy_norm);
        }

        Ok(None)
    }
}

impl Integrator for Bdf {
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
        if self.max_order == 0 || self.max_order > MAX_ORDER {
            return Err(IntegrationError::InvalidSetting(format!(
                "BDF order must be within 1..={}, got {}",
                MAX_ORDER, self.max_order
            ))
            .into());
        }
        let options = &self.options;

        let mut stats = SolverStats::default();
        let mut t = t0;
        let mut y = y0.clone();
        let f0 = rhs(t, &y)?;
        stats.rhs_evaluations += 1;
        ensure_finite("derivative", t, &f0)?;
        output(t, &y)?;

        let mut h = match options.first_step {
            Some(h) if h > 0.0 => h.min(options.max_step),
            _ => initial_step(rhs, t, &y, &f0, 1, options, &mut stats)?,
        };

        let mut history: History = VecDeque::with_capacity(self.max_order + 2);
        history.push_front((t, y.clone()));
        let mut order = 1;
        let mut steps_at_order = 0;
        let mut consecutive_rejections = 0;

        while t < tf {
            if stats.accepted_steps + stats.rejected_steps >= options.max_steps {
                return Err(IntegrationError::MaxStepsExceeded {
                    max_steps: options.max_steps,
                    t,
                    tf,
                }
                .into());
            }

            h = h.min(options.max_step);
            let h_min = min_step(t, tf);
            if h < h_min {
                return Err(IntegrationError::StepSizeUnderflow { t, h }.into());
            }
            let last = t + h >= tf - h_min;
            if last {
                h = tf - t;
            }
            let t_new = if last { tf } else { t + h };

            let k = order.min(history.len());
            let (y_pred, error_constant) = if history.len() > k {
                let points: Vec<&(f64, DVector<f64>)> = history.iter().take(k + 1).collect();
                (
                    extrapolate(&points, t_new),
                    1.0 / ((k as f64 + 1.0) * harmonic(k) + 1.0),
                )
            } else {
                // Only the initial point is stored; predict with an Euler step.
                (&y + &f0 * h, 0.5)
            };

            let mut nodes = Vec::with_capacity(k + 1);
            nodes.push(t_new);
            nodes.extend(history.iter().take(k).map(|(tj, _)| *tj));
            let weights = derivative_weights(&nodes);
            let mut history_term = DVector::zeros(y.len());
            for (w, (_, yj)) in weights[1..].iter().zip(history.iter()) {
                history_term.axpy(*w, yj, 1.0);
            }

            let corrected =
                self.solve_corrector(rhs, t_new, &y_pred, weights[0], &history_term, &mut stats)?;
            let y_new = match corrected {
                Some(y_new) => y_new,
                None => {
                    stats.rejected_steps += 1;
                    trace!(t, h, order, "newton iteration failed");
                    h *= NEWTON_FAILURE_FACTOR;
                    if h < min_step(t, tf) {
                        return Err(IntegrationError::NewtonDiverged { t, h }.into());
                    }
                    continue;
                }
            };

            let error = (&y_new - &y_pred) * error_constant;
            let norm = error_norm(&error, &y, &y_new, options.atol, options.rtol);
            let exponent = -1.0 / (k as f64 + 1.0);

            if norm <= 1.0 {
                t = t_new;
                y = y_new;
                history.push_front((t, y.clone()));
                history.truncate(self.max_order + 2);
                stats.accepted_steps += 1;
                output(t, &y)?;

                steps_at_order += 1;
                consecutive_rejections = 0;

                let growth_cap = if k <= 2 { 2.0 } else { 1.5 };
                let factor = if norm == 0.0 {
                    growth_cap
                } else {
                    (SAFETY * norm.powf(exponent)).clamp(MIN_FACTOR, growth_cap)
                };
                h *= factor;

                if order < self.max_order
                    && steps_at_order > order
                    && history.len() > order + 1
                    && norm < 0.5
                {
                    order += 1;
                    steps_at_order = 0;
                    trace!(t, order, "order increased");
                }
            } else {
                stats.rejected_steps += 1;
                consecutive_rejections += 1;
                trace!(t, h, norm, order, "step rejected");
                h *= (SAFETY * norm.powf(exponent)).max(MIN_FACTOR);

                if consecutive_rejections >= 2 && order > 1 {
                    order -= 1;
                    steps_at_order = 0;
                    consecutive_rejections = 0;
                    trace!(t, order, "order decreased");
                }
            }
        }

        Ok(IntegrationSummary {
            t_final: t,
            y_final: y,
            stats,
        })
    }
}

fn harmonic(k: usize) -> f64 {
    (1..=k).map(|j| 1.0 / j as f64).sum()
}

/// Weights `w` with `p'(x0) = Σ w_j·y_j` for the polynomial through `(x_j, y_j)`.
fn derivative_weights(nodes: &[f64]) -> Vec<f64> {
    let x0 = nodes[0];
    let mut weights = vec![0.0; nodes.len()];
    weights[0] = nodes[1..].iter().map(|xm| 1.0 / (x0 - xm)).sum();
    for j in 1..nodes.len() {
        let mut numerator = 1.0;
        let mut denominator = 1.0;
        for (m, xm) in nodes.iter().enumerate() {
            if m == j {
                continue;
            }
            denominator *= nodes[j] - xm;
            if m != 0 {
                numerator *= x0 - xm;
            }
        }
        weights[j] = numerator / denominator;
    }
    weights
}

/// Lagrange interpolation through `points`, evaluated at `x`.
fn extrapolate(points: &[&(f64, DVector<f64>)], x: f64) -> DVector<f64> {
    let mut result = DVector::zeros(points[0].1.len());
    for (j, (xj, yj)) in points.iter().map(|p| (p.0, &p.1)).enumerate() {
        let basis: f64 = points
            .iter()
            .enumerate()
            .filter(|(m, _)| *m != j)
            .map(|(_, p)| (x - p.0) / (xj - p.0))
            .product();
        result.axpy(basis, yj, 1.0);
    }
    result
}

fn jacobian(
    rhs: &Rhs,
    t: f64,
    y: &DVector<f64>,
    f: &DVector<f64>,
    stats: &mut SolverStats,
) -> Result<DMatrix<f64>> {
    let n = y.len();
    let mut jac = DMatrix::zeros(n, n);
    let mut perturbed = y.clone();
    for i in 0..n {
        let delta = f64::EPSILON.sqrt() * y[i].abs().max(1.0);
        perturbed[i] = y[i] + delta;
        let f_perturbed = rhs(t, &perturbed)?;
        jac.set_column(i, &((f_perturbed - f) / delta));
        perturbed[i] = y[i];
    }
    stats.rhs_evaluations += n;
    stats.jacobian_evaluations += 1;
    Ok(jac)
}
