use nalgebra::Vector3;

use crate::components::{AircraftConfig, ControlInput, ForceTorquePair};
use crate::resources::EnvironmentSample;
use crate::systems::aerodynamics::{
    drag_coefficient, lift_coefficient, AerodynamicsModel, AirData, Vehicle,
};

/// Linear stability-derivative model with a sigmoid blend into flat-plate
/// lift past the stall angle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClassicStallBlend;

impl AerodynamicsModel for ClassicStallBlend {
    fn evaluate(
        &self,
        vehicle: &Vehicle,
        env: &EnvironmentSample,
        control: &ControlInput,
    ) -> ForceTorquePair {
        calculate_aerodynamic_forces_moments(
            vehicle.config,
            &vehicle.air_data,
            &vehicle.state.angular_velocity,
            control,
            env.density,
        )
    }
}

/// Calculates aerodynamic forces and moments in the BODY frame.
///
/// # Arguments
/// * `config` - Aircraft geometry, coefficients, deflection limits and stall model.
/// * `air_data` - Airspeed, angle of attack and sideslip.
/// * `angular_velocity` - Body rates (p, q, r).
/// * `controls` - Normalized surface commands. Throttle is ignored.
/// * `density` - Air density (kg/m³).
///
/// Returns exactly zero at zero airspeed.
pub fn calculate_aerodynamic_forces_moments(
    config: &AircraftConfig,
    air_data: &AirData,
    angular_velocity: &Vector3<f64>,
    controls: &ControlInput,
    density: f64,
) -> ForceTorquePair {
    let airspeed = air_data.true_airspeed;
    if airspeed == 0.0 {
        return ForceTorquePair::zero();
    }

    let geometry = &config.geometry;
    let coeffs = &config.aero_coef;

    // Surface deflections (rad)
    let delta_a = controls.aileron * config.limits.max_aileron;
    let delta_e = controls.elevator * config.limits.max_elevator;
    let delta_r = controls.rudder * config.limits.max_rudder;

    let (p, q, r) = (angular_velocity.x, angular_velocity.y, angular_velocity.z);
    let alpha = air_data.alpha;
    let beta = air_data.beta;
    let (sin_alpha, cos_alpha) = alpha.sin_cos();

    let c_lift = lift_coefficient(alpha, coeffs, &config.stall);
    let c_drag = drag_coefficient(alpha, coeffs, geometry);

    // Stability to body axes
    let c_x = -c_drag * cos_alpha + c_lift * sin_alpha;
    let c_z = -c_drag * sin_alpha - c_lift * cos_alpha;
    let c_x_q = -coeffs.drag.c_d_q * cos_alpha + coeffs.lift.c_l_q * sin_alpha;
    let c_z_q = -coeffs.drag.c_d_q * sin_alpha - coeffs.lift.c_l_q * cos_alpha;

    let q_bar = 0.5 * density * airspeed * airspeed * geometry.wing_area;
    let b = geometry.wing_span;
    let c = geometry.mac;
    let p_hat = b * p / (2.0 * airspeed);
    let q_hat = c * q / (2.0 * airspeed);
    let r_hat = b * r / (2.0 * airspeed);

    let side = &coeffs.side_force;
    let force = Vector3::new(
        q_bar
            * (c_x + c_x_q * q_hat - coeffs.drag.c_d_deltae * cos_alpha * delta_e.abs()
                + coeffs.lift.c_l_deltae * sin_alpha * delta_e),
        q_bar
            * (side.c_y_0
                + side.c_y_beta * beta
                + side.c_y_p * p_hat
                + side.c_y_r * r_hat
                + side.c_y_deltaa * delta_a
                + side.c_y_deltar * delta_r),
        q_bar
            * (c_z + c_z_q * q_hat
                - coeffs.drag.c_d_deltae * sin_alpha * delta_e.abs()
                - coeffs.lift.c_l_deltae * cos_alpha * delta_e),
    );

    let roll = &coeffs.roll;
    let pitch = &coeffs.pitch;
    let yaw = &coeffs.yaw;
    let torque = Vector3::new(
        q_bar
            * b
            * (roll.c_l_0
                + roll.c_l_beta * beta
                + roll.c_l_p * p_hat
                + roll.c_l_r * r_hat
                + roll.c_l_deltaa * delta_a
                + roll.c_l_deltar * delta_r),
        q_bar
            * c
            * (pitch.c_m_0 + pitch.c_m_alpha * alpha + pitch.c_m_q * q_hat + pitch.c_m_deltae * delta_e),
        q_bar
            * b
            * (yaw.c_n_0
                + yaw.c_n_beta * beta
                + yaw.c_n_p * p_hat
                + yaw.c_n_r * r_hat
                + yaw.c_n_deltaa * delta_a
                + yaw.c_n_deltar * delta_r),
    );

    ForceTorquePair::new(force, torque)
}
