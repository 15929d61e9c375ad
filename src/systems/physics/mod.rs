mod force_calculator;
mod gravity;
mod kinematics;

pub use force_calculator::FlightDynamics;
pub use gravity::{GravityModel, UniformGravity};
pub use kinematics::{rigid_body_derivative, RigidBody};
