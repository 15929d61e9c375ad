use approx::assert_relative_eq;
use flyer_sim::StateVector;
use nalgebra::Vector3;

/// Assert that every component of a state is finite
#[track_caller]
pub fn assert_state_valid(state: &StateVector) {
    assert!(
        state.position.iter().all(|x| x.is_finite()),
        "Position is not finite: {:?}",
        state.position
    );
    assert!(
        state.attitude.iter().all(|x| x.is_finite()),
        "Attitude is not finite: {:?}",
        state.attitude
    );
    assert!(
        state.velocity.iter().all(|x| x.is_finite()),
        "Velocity is not finite: {:?}",
        state.velocity
    );
    assert!(
        state.angular_velocity.iter().all(|x| x.is_finite()),
        "Angular velocity is not finite: {:?}",
        state.angular_velocity
    );
}

/// Assert that two vectors are approximately equal
#[track_caller]
pub fn assert_vector_eq(actual: &Vector3<f64>, expected: &Vector3<f64>, epsilon: f64) {
    for i in 0..3 {
        assert_relative_eq!(
            actual[i],
            expected[i],
            epsilon = epsilon,
            max_relative = epsilon
        );
    }
}

/// Assert that two states are approximately equal, field by field
#[track_caller]
pub fn assert_state_eq(actual: &StateVector, expected: &StateVector, epsilon: f64) {
    assert_vector_eq(&actual.position, &expected.position, epsilon);
    assert_vector_eq(&actual.attitude, &expected.attitude, epsilon);
    assert_vector_eq(&actual.velocity, &expected.velocity, epsilon);
    assert_vector_eq(&actual.angular_velocity, &expected.angular_velocity, epsilon);
}
