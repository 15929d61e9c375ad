use std::fs;
use std::path::Path;

use crate::components::aircraft::config::AircraftConfig;
use crate::utils::{Result, SimError};

impl AircraftConfig {
    /// Loads and validates an aircraft description from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: AircraftConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects tables that would make the force model divide by zero or go non-physical.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("mass", self.mass.mass),
            ("wing_area", self.geometry.wing_area),
            ("wing_span", self.geometry.wing_span),
            ("mac", self.geometry.mac),
            ("stall.alpha_0", self.stall.alpha_0),
            ("stall.steepness", self.stall.steepness),
            ("drag.oswald_efficiency", self.aero_coef.drag.oswald_efficiency),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "aircraft '{}': {} must be positive, got {}",
                    self.name, name, value
                )));
            }
        }
        self.mass.inertia_inv()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_yaml_round_trip() {
        let config = AircraftConfig::aerosonde();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded = AircraftConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "name: Glider\ngeometry:\n  wing_area: 1.2\n  wing_span: 4.0\n  mac: 0.3\n";
        let loaded = AircraftConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(loaded.name, "Glider");
        assert_eq!(loaded.geometry.wing_span, 4.0);
        assert_eq!(loaded.aero_coef, AircraftConfig::aerosonde().aero_coef);
    }

    #[test]
    fn test_single_coefficient_override_keeps_preset() {
        let loaded = AircraftConfig::from_yaml_str("aero_coef:\n  pitch:\n    c_m_q: -4.0\n").unwrap();
        let preset = AircraftConfig::aerosonde();

        assert_eq!(loaded.aero_coef.pitch.c_m_q, -4.0);
        assert_eq!(loaded.aero_coef.pitch.c_m_alpha, preset.aero_coef.pitch.c_m_alpha);
        assert_eq!(loaded.aero_coef.pitch.c_m_0, preset.aero_coef.pitch.c_m_0);
        assert_eq!(loaded.aero_coef.lift, preset.aero_coef.lift);
        assert_eq!(loaded.aero_coef.drag, preset.aero_coef.drag);
        assert_eq!(loaded.aero_coef.yaw, preset.aero_coef.yaw);
    }

    #[test]
    fn test_partial_stall_and_geometry_blocks() {
        let yaml = "stall:\n  alpha_0: 0.3\ngeometry:\n  wing_span: 3.1\nlimits:\n  max_rudder: 0.5\n";
        let loaded = AircraftConfig::from_yaml_str(yaml).unwrap();
        let preset = AircraftConfig::aerosonde();

        assert_eq!(loaded.stall.alpha_0, 0.3);
        assert_eq!(loaded.stall.steepness, preset.stall.steepness);
        assert_eq!(loaded.geometry.wing_span, 3.1);
        assert_eq!(loaded.geometry.wing_area, preset.geometry.wing_area);
        assert_eq!(loaded.limits.max_rudder, 0.5);
        assert_eq!(loaded.limits.max_elevator, preset.limits.max_elevator);
    }

    #[test]
    fn test_zero_wing_area_rejected() {
        let yaml = "geometry:\n  wing_area: 0.0\n  wing_span: 4.0\n  mac: 0.3\n";
        let err = AircraftConfig::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("wing_area"));
    }
}
