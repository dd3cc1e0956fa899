//! Dynamic Programming Cache with Lazy Evaluation
//!
//! Memoisation for values that depend on other values in a directed acyclic
//! graph. A [`DpProblem`] says which indices an index depends on and how to
//! combine their values; [`DpCache`] resolves dependencies on demand and
//! stores every computed value in a [`Backend`].
//!
//! # Backend Types
//!
//! - [`VecBackend`]: dense `usize` indices (auto-growing)
//! - [`HashMapBackend`]: any hashable index type
//!
//! Dependency cycles are detected and reported as [`DpError::Cycle`].
//!
//! # Example
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
//!
//! // Grid paths moving only right or down
//! struct GridPaths;
//!
//! impl DpProblem<(usize, usize), u64> for GridPaths {
//!     fn deps(&self, pos: &(usize, usize)) -> Vec<(usize, usize)> {
//!         let (r, c) = *pos;
//!         let mut deps = Vec::new();
//!         if r > 0 { deps.push((r - 1, c)); }
//!         if c > 0 { deps.push((r, c - 1)); }
//!         deps
//!     }
//!     fn compute(&self, _pos: &(usize, usize), deps: Vec<u64>) -> u64 {
//!         if deps.is_empty() { 1 } else { deps.iter().sum() }
//!     }
//! }
//!
//! let cache = DpCache::builder()
//!     .backend(HashMapBackend::new())
//!     .problem(GridPaths)
//!     .build();
//! assert_eq!(cache.get(&(4, 4)).unwrap(), 70);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::{DpCache, DpCacheBuilder, DpError};
pub use problem::{ClosureProblem, DpProblem};
