use nalgebra::{Matrix3, Rotation3, Vector3};
use std::f64::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Sign function with `sign(0) = 0`, unlike `f64::signum`.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Logistic function `1 / (1 + e^-x)`, saturating cleanly for large |x|.
#[inline]
pub fn logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Body-to-inertial (NED) rotation for roll/pitch/yaw Euler angles.
pub fn body_to_inertial(attitude: &Vector3<f64>) -> Rotation3<f64> {
    Rotation3::from_euler_angles(attitude.x, attitude.y, attitude.z)
}

/// Maps body angular rates (p, q, r) to Euler angle rates.
///
/// Singular at pitch = ±90°, where the Euler representation breaks down.
pub fn euler_rate_matrix(attitude: &Vector3<f64>) -> Matrix3<f64> {
    let (s_phi, c_phi) = attitude.x.sin_cos();
    let (_, c_theta) = attitude.y.sin_cos();
    let t_theta = attitude.y.tan();

    Matrix3::new(
        1.0,
        s_phi * t_theta,
        c_phi * t_theta,
        0.0,
        c_phi,
        -s_phi,
        0.0,
        s_phi / c_theta,
        c_phi / c_theta,
    )
}
