use serde::{Deserialize, Serialize};

use crate::utils::{Result, SimError};

/// Normalized pilot/autopilot command.
///
/// Aileron, elevator and rudder live in [-1, 1]; throttle in [0, 1]. The
/// aerodynamics model consumes these values as-is, so range checks belong to
/// whoever produces them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlInput {
    pub aileron: f64,
    pub elevator: f64,
    pub throttle: f64,
    pub rudder: f64,
}

impl ControlInput {
    pub fn new(aileron: f64, elevator: f64, throttle: f64, rudder: f64) -> Self {
        Self {
            aileron,
            elevator,
            throttle,
            rudder,
        }
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.aileron, self.elevator, self.throttle, self.rudder]
    }

    pub fn from_array(values: [f64; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }

    pub fn validate(&self) -> Result<()> {
        let surfaces = [
            ("aileron", self.aileron),
            ("elevator", self.elevator),
            ("rudder", self.rudder),
        ];
        for (name, value) in surfaces {
            if !(-1.0..=1.0).contains(&value) {
                return Err(SimError::InvalidControl(format!(
                    "{} command {} outside [-1, 1]",
                    name, value
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.throttle) {
            return Err(SimError::InvalidControl(format!(
                "throttle command {} outside [0, 1]",
                self.throttle
            )));
        }
        Ok(())
    }

    /// Returns a copy with every channel forced into its valid range.
    pub fn clamped(&self) -> Self {
        Self {
            aileron: self.aileron.clamp(-1.0, 1.0),
            elevator: self.elevator.clamp(-1.0, 1.0),
            throttle: self.throttle.clamp(0.0, 1.0),
            rudder: self.rudder.clamp(-1.0, 1.0),
        }
    }
}

/// A control input that takes effect at `time` and holds until the next keyframe.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlKeyframe {
    pub time: f64,
    #[serde(default)]
    pub input: ControlInput,
}

impl ControlKeyframe {
    pub fn new(time: f64, input: ControlInput) -> Self {
        Self { time, input }
    }
}
