//! Algorithms shared between days.

pub mod dp_cache;
pub mod grid_path;
