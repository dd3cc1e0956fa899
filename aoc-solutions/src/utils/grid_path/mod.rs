//! Shortest paths on elevation grids
//!
//! [`GridPathFinder`] runs A* over the 4-connected cells of a [`HeightGrid`].
//! What counts as a legal step, a goal and a distance estimate comes from a
//! [`SearchProblem`], either a dedicated type or three closures wrapped in
//! [`FnProblem`].
//!
//! Passing several sources seeds them all at distance 0, which answers
//! "closest of these starting points" in a single search.
//!
//! # Example
//!
//! ```rust
//! use aoc_solutions::utils::grid_path::{Cell, FnProblem, GridPathFinder, HeightGrid};
//!
//! // 0 1 2
//! // 7 8 3
//! // 6 5 4
//! let grid = HeightGrid::from_rows([[0u8, 1, 2], [7, 8, 3], [6, 5, 4]]).unwrap();
//! let goal = Cell::new(1, 0);
//!
//! let climb = FnProblem::new(
//!     |cell: Cell| cell.manhattan(goal),
//!     |cell: Cell| cell == goal,
//!     |from: Cell, to: Cell| grid.elevation(to) <= grid.elevation(from) + 1,
//! );
//!
//! let finder = GridPathFinder::new(&grid);
//! assert_eq!(finder.find_distance([Cell::new(0, 0)], &climb).unwrap(), 7);
//! ```

mod finder;
mod grid;
mod problem;

pub use finder::{GridPathFinder, MIN_EXPANSIONS, SearchError};
pub use grid::{Cell, GridError, HeightGrid, OUT_OF_BOUNDS};
pub use problem::{FnProblem, SearchProblem};

#[cfg(test)]
mod tests;
