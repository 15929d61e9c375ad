mod problem;
mod solver;

pub use problem::{TrimMode, TrimProblem};
pub use solver::NelderMeadTrimmer;

use crate::components::{StateVector, TrimCondition, TrimResult};
use crate::systems::physics::FlightDynamics;
use crate::utils::Result;

/// Finds a state and control that hold the aircraft in a steady condition.
///
/// A non-converged search is not an error: the best solution is returned with
/// `converged == false`. Errors mean the search itself could not run.
pub trait Trimmer {
    fn trim(
        &self,
        dynamics: &FlightDynamics,
        condition: &TrimCondition,
        initial: &StateVector,
    ) -> Result<TrimResult>;
}
