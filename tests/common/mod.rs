#![allow(dead_code)]

mod assertions;
mod fixtures;

pub use assertions::{assert_state_eq, assert_state_valid, assert_vector_eq};
pub use fixtures::*;
