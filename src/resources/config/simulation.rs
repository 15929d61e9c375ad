use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::{AircraftConfig, ControlKeyframe, StateVector, TrimConfig};
use crate::resources::EnvironmentConfig;
use crate::utils::{Result, SimError};

/// Everything a single simulation run needs.
///
/// Selectors (`solver.solver_type`, `controller.type`, `aircraft.aero_model`)
/// are stored as plain `i64` integers so that any unsupported value survives loading
/// and is rejected by the driver before any work happens.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationOptions {
    pub controller: ControllerConfig,
    pub solver: SolverConfig,
    pub record_states: bool,
    pub record_inputs: bool,
    pub visualization: VisualizationConfig,
    pub init: InitialConditions,
    pub trim: TrimConfig,
    pub aircraft: AircraftConfig,
    pub environment: EnvironmentConfig,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// 0 = predefined sequence, 1 = trim-seeking
    #[serde(rename = "type")]
    pub controller_type: i64,
    /// Keyframes for the predefined sequence, ordered by time.
    pub sequence: Vec<ControlKeyframe>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// 0 = fixed-step explicit, 1 = adaptive non-stiff, 2 = adaptive stiff
    pub solver_type: i64,
    pub t_0: f64,
    pub t_f: f64,
    /// Fixed step, or the initial step hint for adaptive solvers (s)
    pub dt: f64,
    /// Termination tolerance of the fixed-step loop (s)
    pub t_eps: f64,
    pub rtol: f64,
    pub atol: f64,
    pub max_steps: usize,
    /// Highest BDF order (1..=5)
    pub max_order: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            solver_type: 0,
            t_0: 0.0,
            t_f: 10.0,
            dt: 0.01,
            t_eps: 1e-9,
            rtol: 1e-6,
            atol: 1e-8,
            max_steps: 100_000,
            max_order: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationConfig {
    pub draw_graphics: bool,
    pub draw_forces: bool,
    pub draw_states: bool,
}

impl VisualizationConfig {
    pub fn any(&self) -> bool {
        self.draw_graphics || self.draw_forces || self.draw_states
    }
}

/// Initial state of the run. Under a trim-seeking controller only position
/// and yaw survive; the rest comes from the trim solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    /// NED position (m)
    pub position: Vector3<f64>,
    /// Roll, pitch, yaw (rad)
    pub attitude: Vector3<f64>,
    /// Body-frame velocity (m/s)
    pub velocity: Vector3<f64>,
    /// Body-frame angular rates (rad/s)
    pub angular_velocity: Vector3<f64>,
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, -100.0),
            attitude: Vector3::zeros(),
            velocity: Vector3::new(25.0, 0.0, 0.0),
            angular_velocity: Vector3::zeros(),
        }
    }
}

impl InitialConditions {
    pub fn to_state(&self) -> StateVector {
        StateVector::new(
            self.position,
            self.attitude,
            self.velocity,
            self.angular_velocity,
        )
    }
}

impl SimulationOptions {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let options: SimulationOptions = serde_yaml::from_str(contents)?;
        options.validate_inputs()?;
        Ok(options)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let options: SimulationOptions = serde_json::from_str(contents)?;
        options.validate_inputs()?;
        Ok(options)
    }

    pub fn save_yaml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    /// Checks the data the loader can judge on its own: aircraft tables and
    /// control keyframes. Selector checks happen in the driver.
    pub fn validate_inputs(&self) -> Result<()> {
        self.aircraft.validate()?;
        let mut previous = f64::NEG_INFINITY;
        for keyframe in &self.controller.sequence {
            if keyframe.time.is_nan() || keyframe.time < previous {
                return Err(SimError::InvalidConfig(format!(
                    "control sequence keyframe at t={} is out of order",
                    keyframe.time
                )));
            }
            keyframe.input.validate()?;
            previous = keyframe.time;
        }
        Ok(())
    }
}
