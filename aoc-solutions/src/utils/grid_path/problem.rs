//! Search problem definition.

use super::grid::Cell;

/// The three questions A* asks about a grid search.
///
/// # Example
///
/// ```rust
/// use aoc_solutions::utils::grid_path::{Cell, GridPathFinder, HeightGrid, SearchProblem};
///
/// struct Flat {
///     goal: Cell,
/// }
///
/// impl SearchProblem for Flat {
///     fn heuristic(&self, cell: Cell) -> u32 {
///         cell.manhattan(self.goal)
///     }
///     fn is_goal(&self, cell: Cell) -> bool {
///         cell == self.goal
///     }
///     fn can_step(&self, _from: Cell, _to: Cell) -> bool {
///         true
///     }
/// }
///
/// let grid = HeightGrid::from_rows(vec![vec![0u8; 4]; 3]).unwrap();
/// let finder = GridPathFinder::new(&grid);
/// let distance = finder
///     .find_distance([Cell::new(0, 0)], &Flat { goal: Cell::new(2, 3) })
///     .unwrap();
/// assert_eq!(distance, 5);
/// ```
pub trait SearchProblem {
    /// Estimate of remaining steps from `cell`; must not overestimate for
    /// the result to be optimal.
    fn heuristic(&self, cell: Cell) -> u32;

    /// Whether `cell` ends the search.
    fn is_goal(&self, cell: Cell) -> bool;

    /// Whether a step from `from` to the adjacent `to` is allowed.
    fn can_step(&self, from: Cell, to: Cell) -> bool;
}

/// Adapts three closures to [`SearchProblem`].
pub struct FnProblem<H, G, S> {
    heuristic: H,
    is_goal: G,
    can_step: S,
}

impl<H, G, S> FnProblem<H, G, S>
where
    H: Fn(Cell) -> u32,
    G: Fn(Cell) -> bool,
    S: Fn(Cell, Cell) -> bool,
{
    pub fn new(heuristic: H, is_goal: G, can_step: S) -> Self {
        Self {
            heuristic,
            is_goal,
            can_step,
        }
    }
}

impl<H, G, S> SearchProblem for FnProblem<H, G, S>
where
    H: Fn(Cell) -> u32,
    G: Fn(Cell) -> bool,
    S: Fn(Cell, Cell) -> bool,
{
    fn heuristic(&self, cell: Cell) -> u32 {
        (self.heuristic)(cell)
    }

    fn is_goal(&self, cell: Cell) -> bool {
        (self.is_goal)(cell)
    }

    fn can_step(&self, from: Cell, to: Cell) -> bool {
        (self.can_step)(from, to)
    }
}
