//! Advent of Code puzzle solutions with automatic registration
//!
//! Solutions live under [`my_solutions`], one module per day, each deriving
//! `AutoRegisterSolver` so the runner picks it up without a manual list.
//! Reusable algorithms shared between days live under [`utils`].

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
