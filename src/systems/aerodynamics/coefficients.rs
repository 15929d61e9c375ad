//! Stability-axis lift and drag coefficients of the stall-blending model.

use std::f64::consts::PI;

use crate::components::{AircraftAeroCoefficients, AircraftGeometry, StallModel};
use crate::utils::{logistic, sign};

/// Weight of the post-stall regime, rising from 0 well inside ±α0 to 1 beyond it.
///
/// Evaluated as `1 − ℓ(−M(α−α0))·ℓ(M(α+α0))`, which equals
/// `(1 + e^{−M(α−α0)} + e^{M(α+α0)}) / ((1 + e^{−M(α−α0)})(1 + e^{M(α+α0)}))`
/// but never forms the exponentials' ratio, so it stays finite at any α.
pub fn stall_blend(alpha: f64, stall: &StallModel) -> f64 {
    let m = stall.steepness;
    let alpha_0 = stall.alpha_0;
    1.0 - logistic(-m * (alpha - alpha_0)) * logistic(m * (alpha + alpha_0))
}

/// Pre-stall lift `c_L0 + c_Lα·α`.
#[inline]
pub fn linear_lift(alpha: f64, coeffs: &AircraftAeroCoefficients) -> f64 {
    coeffs.lift.c_l_0 + coeffs.lift.c_l_alpha * alpha
}

/// Lift blended between the linear regime and a flat plate.
pub fn lift_coefficient(alpha: f64, coeffs: &AircraftAeroCoefficients, stall: &StallModel) -> f64 {
    let sigma = stall_blend(alpha, stall);
    let flat_plate = 2.0 * sign(alpha) * alpha.sin().powi(2) * alpha.cos();
    (1.0 - sigma) * linear_lift(alpha, coeffs) + sigma * flat_plate
}

/// Parasitic plus induced drag.
pub fn drag_coefficient(
    alpha: f64,
    coeffs: &AircraftAeroCoefficients,
    geometry: &AircraftGeometry,
) -> f64 {
    let induced = linear_lift(alpha, coeffs).powi(2)
        / (PI * coeffs.drag.oswald_efficiency * geometry.aspect_ratio());
    coeffs.drag.c_d_p + induced
}
