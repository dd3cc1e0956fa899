//! A* search over a [`HeightGrid`].

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::{debug, warn};
use thiserror::Error;

use super::grid::{Cell, HeightGrid};
use super::problem::SearchProblem;

/// Lower bound of the default expansion cap.
pub const MIN_EXPANSIONS: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Frontier exhausted or expansion cap reached without meeting a goal.
    #[error("no path to a goal cell after {expansions} expansions")]
    NotFound { expansions: usize },
}

/// Shortest unit-step distance search with pluggable predicates.
///
/// The grid is borrowed; each [`find_distance`](Self::find_distance) call
/// owns its own frontier and distance map.
#[derive(Debug, Clone, Copy)]
pub struct GridPathFinder<'g> {
    grid: &'g HeightGrid,
    max_expansions: usize,
}

impl<'g> GridPathFinder<'g> {
    /// Finder with a cap of `max(100_000, 4 * cells)` expansions.
    pub fn new(grid: &'g HeightGrid) -> Self {
        Self {
            grid,
            max_expansions: MIN_EXPANSIONS.max(grid.len().saturating_mul(4)),
        }
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    pub fn grid(&self) -> &'g HeightGrid {
        self.grid
    }

    pub fn max_expansions(&self) -> usize {
        self.max_expansions
    }

    /// Steps from the nearest source to the first goal cell popped.
    ///
    /// Every in-grid source starts at distance 0, so the result is the
    /// minimum over sources. Out-of-grid sources are ignored. With an
    /// admissible heuristic the distance is optimal; an overestimating one
    /// can only make it longer.
    pub fn find_distance<P>(
        &self,
        sources: impl IntoIterator<Item = Cell>,
        problem: &P,
    ) -> Result<u32, SearchError>
    where
        P: SearchProblem + ?Sized,
    {
        let grid = self.grid;
        let mut best: Vec<Option<u32>> = vec![None; grid.len()];
        let mut frontier = BinaryHeap::new();

        for source in sources {
            let Some(index) = grid.index(source) else {
                continue;
            };
            if best[index].is_none() {
                best[index] = Some(0);
                frontier.push(Reverse((problem.heuristic(source), 0u32, source)));
            }
        }

        let mut expansions = 0;
        while let Some(Reverse((_, distance, cell))) = frontier.pop() {
            let Some(index) = grid.index(cell) else {
                continue;
            };
            if best[index].is_some_and(|known| distance > known) {
                continue;
            }

            if problem.is_goal(cell) {
                debug!("reached {cell:?} at distance {distance} after {expansions} expansions");
                return Ok(distance);
            }

            expansions += 1;
            if expansions > self.max_expansions {
                warn!("gave up after {} expansions", self.max_expansions);
                return Err(SearchError::NotFound { expansions });
            }

            let next_distance = distance + 1;
            for next in grid.neighbours(cell) {
                if !problem.can_step(cell, next) {
                    continue;
                }
                let Some(next_index) = grid.index(next) else {
                    continue;
                };
                if best[next_index].is_none_or(|known| next_distance < known) {
                    best[next_index] = Some(next_distance);
                    let priority = next_distance.saturating_add(problem.heuristic(next));
                    frontier.push(Reverse((priority, next_distance, next)));
                }
            }
        }

        debug!("frontier exhausted after {expansions} expansions");
        Err(SearchError::NotFound { expansions })
    }
}
