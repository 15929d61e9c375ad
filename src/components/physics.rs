use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Body-frame force (N) and torque (N·m) acting about the centre of gravity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceTorquePair {
    pub force: Vector3<f64>,
    pub torque: Vector3<f64>,
}

impl ForceTorquePair {
    pub fn new(force: Vector3<f64>, torque: Vector3<f64>) -> Self {
        Self { force, torque }
    }

    pub fn zero() -> Self {
        Self::new(Vector3::zeros(), Vector3::zeros())
    }

    pub fn is_finite(&self) -> bool {
        self.force.iter().chain(self.torque.iter()).all(|v| v.is_finite())
    }
}

impl Default for ForceTorquePair {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for ForceTorquePair {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.force + rhs.force, self.torque + rhs.torque)
    }
}

impl AddAssign for ForceTorquePair {
    fn add_assign(&mut self, rhs: Self) {
        self.force += rhs.force;
        self.torque += rhs.torque;
    }
}

impl Sum for ForceTorquePair {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

/// Per-source contributions at one evaluation of the dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForceBreakdown {
    pub aerodynamic: ForceTorquePair,
    pub propulsive: ForceTorquePair,
    pub gravitational: ForceTorquePair,
}

impl ForceBreakdown {
    pub fn total(&self) -> ForceTorquePair {
        [self.aerodynamic, self.propulsive, self.gravitational]
            .into_iter()
            .sum()
    }
}
