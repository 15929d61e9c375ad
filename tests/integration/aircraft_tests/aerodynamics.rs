use approx::assert_relative_eq;
use crate::common::assert_vector_eq;
use flyer_sim::components::{AircraftConfig, ControlInput, StallModel, StateVector};
use flyer_sim::resources::EnvironmentSample;
use flyer_sim::systems::aerodynamics::{lift_coefficient, stall_blend};
use flyer_sim::systems::{AeroModel, AerodynamicsModel, Vehicle};
use nalgebra::Vector3;

const RHO: f64 = 1.2682;

fn still_air() -> EnvironmentSample {
    EnvironmentSample {
        density: RHO,
        wind: Vector3::zeros(),
    }
}

fn level_state(airspeed: f64) -> StateVector {
    StateVector::new(
        Vector3::new(0.0, 0.0, -100.0),
        Vector3::zeros(),
        Vector3::new(airspeed, 0.0, 0.0),
        Vector3::zeros(),
    )
}

#[test]
fn test_straight_and_level_reference_forces() {
    let config = AircraftConfig::aerosonde();
    let state = level_state(15.0);
    let env = still_air();
    let vehicle = Vehicle::new(&config, &state, &env);

    let loads = AeroModel::from_type(0)
        .unwrap()
        .evaluate(&vehicle, &env, &ControlInput::default());

    let q_bar = 0.5 * RHO * 15.0 * 15.0 * 0.55;
    let aspect_ratio = 2.90 * 2.90 / 0.55;
    let c_drag = 0.03 + 0.28 * 0.28 / (std::f64::consts::PI * 0.9 * aspect_ratio);

    assert_relative_eq!(loads.force.x, -q_bar * c_drag, epsilon = 1e-9);
    assert_relative_eq!(loads.force.y, 0.0, epsilon = 1e-12);
    assert_relative_eq!(loads.force.z, -q_bar * 0.28, epsilon = 1e-6);
    assert_relative_eq!(loads.force.x, -2.496392, epsilon = 1e-5);
    assert_relative_eq!(loads.force.z, -21.971565, epsilon = 1e-5);
}

#[test]
fn test_flying_with_the_wind_gives_zero_loads() {
    let config = AircraftConfig::aerosonde();
    let state = StateVector::new(
        Vector3::zeros(),
        Vector3::zeros(),
        Vector3::new(10.0, 0.0, 0.0),
        Vector3::new(0.3, -0.2, 0.1),
    );
    let env = EnvironmentSample {
        density: RHO,
        wind: Vector3::new(10.0, 0.0, 0.0),
    };
    let vehicle = Vehicle::new(&config, &state, &env);
    let loads = AeroModel::from_type(0).unwrap().evaluate(
        &vehicle,
        &env,
        &ControlInput::new(1.0, -1.0, 1.0, 0.5),
    );

    assert_eq!(loads.force, Vector3::zeros());
    assert_eq!(loads.torque, Vector3::zeros());
}

#[test]
fn test_evaluation_is_repeatable() {
    let config = AircraftConfig::aerosonde();
    let state = StateVector::new(
        Vector3::zeros(),
        Vector3::new(0.1, 0.05, 0.0),
        Vector3::new(22.0, 1.5, 2.0),
        Vector3::new(0.2, 0.1, -0.05),
    );
    let env = still_air();
    let vehicle = Vehicle::new(&config, &state, &env);
    let model = AeroModel::from_type(0).unwrap();
    let control = ControlInput::new(0.2, -0.1, 0.8, 0.05);

    let first = model.evaluate(&vehicle, &env, &control);
    for _ in 0..5 {
        let again = model.evaluate(&vehicle, &env, &control);
        assert_eq!(again, first);
    }
}

#[test]
fn test_stall_blend_limits() {
    let stall = StallModel::default();

    assert!(stall_blend(0.0, &stall) < 1e-9);
    assert!(stall_blend(0.05, &stall) < 1e-7);
    assert!(stall_blend(1.2, &stall) > 1.0 - 1e-9);
    assert!(stall_blend(-1.2, &stall) > 1.0 - 1e-9);
    assert_relative_eq!(stall_blend(stall.alpha_0, &stall), 0.5, epsilon = 1e-6);

    // continuous through the stall angle
    let h = 1e-6;
    for alpha in [-stall.alpha_0, 0.0, stall.alpha_0] {
        let left = stall_blend(alpha - h, &stall);
        let right = stall_blend(alpha + h, &stall);
        assert!((right - left).abs() < 1e-3, "jump at alpha = {}", alpha);
    }
}

#[test]
fn test_post_stall_lift_is_flat_plate() {
    let config = AircraftConfig::aerosonde();
    let alpha: f64 = 1.0;
    let flat_plate = 2.0 * alpha.sin().powi(2) * alpha.cos();
    assert_relative_eq!(
        lift_coefficient(alpha, &config.aero_coef, &config.stall),
        flat_plate,
        epsilon = 1e-6
    );
    assert_relative_eq!(
        lift_coefficient(-alpha, &config.aero_coef, &config.stall),
        -flat_plate,
        epsilon = 1e-6
    );
}

#[test]
fn test_sideslip_produces_side_force_and_yaw() {
    let config = AircraftConfig::aerosonde();
    let env = still_air();
    let model = AeroModel::from_type(0).unwrap();

    let straight = level_state(25.0);
    let mut slipping = straight;
    slipping.velocity = Vector3::new(25.0, 3.0, 0.0);

    let base = model.evaluate(
        &Vehicle::new(&config, &straight, &env),
        &env,
        &ControlInput::default(),
    );
    let slip = model.evaluate(
        &Vehicle::new(&config, &slipping, &env),
        &env,
        &ControlInput::default(),
    );

    assert_vector_eq(&base.torque, &Vector3::new(0.0, base.torque.y, 0.0), 1e-12);
    assert!((slip.force.y - base.force.y).abs() > 1e-3);
    assert!((slip.torque.z - base.torque.z).abs() > 1e-3);
}
