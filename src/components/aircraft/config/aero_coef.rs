use serde::{Deserialize, Serialize};

/// Stability-derivative table for the classic stall-blending model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftAeroCoefficients {
    pub lift: LiftCoefficients,
    pub drag: DragCoefficients,
    pub side_force: SideForceCoefficients,
    pub roll: RollCoefficients,
    pub pitch: PitchCoefficients,
    pub yaw: YawCoefficients,
}

/// Lift coefficients (stability axes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiftCoefficients {
    /// Lift coefficient at zero angle of attack.
    pub c_l_0: f64,
    /// Pre-stall lift curve slope (per rad).
    pub c_l_alpha: f64,
    /// Lift coefficient due to non-dimensional pitch rate.
    pub c_l_q: f64,
    /// Lift coefficient due to elevator deflection.
    pub c_l_deltae: f64,
}

/// Drag coefficients (stability axes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragCoefficients {
    /// Parasitic drag coefficient.
    pub c_d_p: f64,
    /// Drag coefficient due to non-dimensional pitch rate.
    pub c_d_q: f64,
    /// Drag coefficient due to elevator deflection magnitude.
    pub c_d_deltae: f64,
    /// Oswald efficiency factor used in the induced-drag term.
    pub oswald_efficiency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideForceCoefficients {
    pub c_y_0: f64,
    pub c_y_beta: f64,
    pub c_y_p: f64,
    pub c_y_r: f64,
    pub c_y_deltaa: f64,
    pub c_y_deltar: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollCoefficients {
    pub c_l_0: f64,
    pub c_l_beta: f64,
    pub c_l_p: f64,
    pub c_l_r: f64,
    pub c_l_deltaa: f64,
    pub c_l_deltar: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchCoefficients {
    pub c_m_0: f64,
    pub c_m_alpha: f64,
    pub c_m_q: f64,
    pub c_m_deltae: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YawCoefficients {
    pub c_n_0: f64,
    pub c_n_beta: f64,
    pub c_n_p: f64,
    pub c_n_r: f64,
    pub c_n_deltaa: f64,
    pub c_n_deltar: f64,
}

impl Default for AircraftAeroCoefficients {
    /// Missing tables and fields fall back to the Aerosonde values, never to zero.
    fn default() -> Self {
        Self::aerosonde()
    }
}

macro_rules! default_from_aerosonde {
    ($($table:ident => $field:ident),* $(,)?) => {
        $(
            impl Default for $table {
                fn default() -> Self {
                    AircraftAeroCoefficients::aerosonde().$field
                }
            }
        )*
    };
}

default_from_aerosonde! {
    LiftCoefficients => lift,
    DragCoefficients => drag,
    SideForceCoefficients => side_force,
    RollCoefficients => roll,
    PitchCoefficients => pitch,
    YawCoefficients => yaw,
}

impl AircraftAeroCoefficients {
    pub fn new(
        lift: LiftCoefficients,
        drag: DragCoefficients,
        side_force: SideForceCoefficients,
        roll: RollCoefficients,
        pitch: PitchCoefficients,
        yaw: YawCoefficients,
    ) -> Self {
        Self {
            lift,
            drag,
            side_force,
            roll,
            pitch,
            yaw,
        }
    }

    /// Aerosonde-class small UAV.
    pub fn aerosonde() -> Self {
        Self {
            lift: LiftCoefficients {
                c_l_0: 0.28,
                c_l_alpha: 3.45,
                c_l_q: 0.0,
                c_l_deltae: -0.36,
            },
            drag: DragCoefficients {
                c_d_p: 0.03,
                c_d_q: 0.0,
                c_d_deltae: 0.0,
                oswald_efficiency: 0.9,
            },
            side_force: SideForceCoefficients {
                c_y_0: 0.0,
                c_y_beta: -0.98,
                c_y_p: 0.0,
                c_y_r: 0.0,
                c_y_deltaa: 0.0,
                c_y_deltar: -0.17,
            },
            roll: RollCoefficients {
                c_l_0: 0.0,
                c_l_beta: -0.12,
                c_l_p: -0.26,
                c_l_r: 0.14,
                c_l_deltaa: 0.08,
                c_l_deltar: 0.105,
            },
            pitch: PitchCoefficients {
                c_m_0: -0.02338,
                c_m_alpha: -0.38,
                c_m_q: -3.6,
                c_m_deltae: -0.5,
            },
            yaw: YawCoefficients {
                c_n_0: 0.0,
                c_n_beta: 0.25,
                c_n_p: 0.022,
                c_n_r: -0.35,
                c_n_deltaa: 0.06,
                c_n_deltar: -0.032,
            },
        }
    }
}
