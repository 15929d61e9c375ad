use crate::components::{AircraftConfig, ControlInput, ForceBreakdown, StateVector};
use crate::resources::{EnvironmentConfig, EnvironmentModel};
use crate::systems::aerodynamics::{AeroModel, AerodynamicsModel, Vehicle};
use crate::systems::physics::{rigid_body_derivative, GravityModel, RigidBody, UniformGravity};
use crate::systems::propulsion::{MotorPropeller, PropulsionModel};
use crate::utils::Result;

/// Composes environment, air data, force models and kinematics into the
/// state derivative the integrators advance.
pub struct FlightDynamics {
    aircraft: AircraftConfig,
    environment: EnvironmentModel,
    aero: AeroModel,
    propulsion: Box<dyn PropulsionModel>,
    gravity: Box<dyn GravityModel>,
    body: RigidBody,
}

impl FlightDynamics {
    /// Builds the dynamics for an aircraft. Fails on an unknown aero model or
    /// a singular inertia tensor.
    pub fn new(aircraft: AircraftConfig, environment: &EnvironmentConfig) -> Result<Self> {
        let aero = AeroModel::from_type(aircraft.aero_model)?;
        let body = RigidBody::from_mass_model(&aircraft.mass)?;
        Ok(Self {
            aircraft,
            environment: EnvironmentModel::new(environment),
            aero,
            propulsion: Box::new(MotorPropeller),
            gravity: Box::new(UniformGravity::default()),
            body,
        })
    }

    pub fn with_propulsion(mut self, propulsion: Box<dyn PropulsionModel>) -> Self {
        self.propulsion = propulsion;
        self
    }

    pub fn with_gravity(mut self, gravity: Box<dyn GravityModel>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn aircraft(&self) -> &AircraftConfig {
        &self.aircraft
    }

    pub fn aero_model(&self) -> &AeroModel {
        &self.aero
    }

    /// Loads from each source at `state` under `control`.
    pub fn forces(&self, state: &StateVector, control: &ControlInput) -> ForceBreakdown {
        let env = self.environment.sample(&state.position);
        let vehicle = Vehicle::new(&self.aircraft, state, &env);
        ForceBreakdown {
            aerodynamic: self.aero.evaluate(&vehicle, &env, control),
            propulsive: self.propulsion.evaluate(&vehicle, &env, control),
            gravitational: self.gravity.evaluate(&vehicle),
        }
    }

    pub fn derivative(&self, state: &StateVector, control: &ControlInput) -> StateVector {
        let loads = self.forces(state, control).total();
        rigid_body_derivative(&self.body, state, &loads)
    }
}
