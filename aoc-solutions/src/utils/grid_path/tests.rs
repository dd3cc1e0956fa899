//! Tests for the grid path-finder.

use std::collections::VecDeque;

use proptest::prelude::*;

use super::*;

const EXAMPLE: &str = "\
Sabqponm
abcryxxl
accszExk
acctuvwj
abdefghi";

/// Letter grid with `S`/`E` mapped to `a`/`z`, plus their positions.
fn letters(input: &str) -> (HeightGrid, Cell, Cell) {
    let mut start = Cell::new(0, 0);
    let mut end = Cell::new(0, 0);
    let rows: Vec<Vec<u8>> = input
        .lines()
        .enumerate()
        .map(|(row, line)| {
            line.bytes()
                .enumerate()
                .map(|(col, b)| match b {
                    b'S' => {
                        start = Cell::new(row, col);
                        0
                    }
                    b'E' => {
                        end = Cell::new(row, col);
                        25
                    }
                    _ => b - b'a',
                })
                .collect()
        })
        .collect();
    (HeightGrid::from_rows(rows).unwrap(), start, end)
}

/// Climb at most one, descend freely, towards a single target.
struct Climb<'g> {
    grid: &'g HeightGrid,
    goal: Cell,
}

impl SearchProblem for Climb<'_> {
    fn heuristic(&self, cell: Cell) -> u32 {
        cell.manhattan(self.goal)
    }

    fn is_goal(&self, cell: Cell) -> bool {
        cell == self.goal
    }

    fn can_step(&self, from: Cell, to: Cell) -> bool {
        self.grid.elevation(to) <= self.grid.elevation(from) + 1
    }
}

fn bfs(grid: &HeightGrid, sources: &[Cell], goal: Cell) -> Option<u32> {
    let mut seen = vec![false; grid.len()];
    let mut queue = VecDeque::new();
    for &s in sources {
        if grid.contains(s) && !seen[s.row * grid.width() + s.col] {
            seen[s.row * grid.width() + s.col] = true;
            queue.push_back((s, 0));
        }
    }
    while let Some((cell, d)) = queue.pop_front() {
        if cell == goal {
            return Some(d);
        }
        for n in grid.neighbours(cell) {
            let i = n.row * grid.width() + n.col;
            if !seen[i] && grid.elevation(n) <= grid.elevation(cell) + 1 {
                seen[i] = true;
                queue.push_back((n, d + 1));
            }
        }
    }
    None
}

#[test]
fn test_example_start_to_end() {
    let (grid, start, end) = letters(EXAMPLE);
    let finder = GridPathFinder::new(&grid);
    let problem = Climb { grid: &grid, goal: end };

    assert_eq!(finder.find_distance([start], &problem), Ok(31));
}

#[test]
fn test_example_from_every_lowest_cell() {
    let (grid, _, end) = letters(EXAMPLE);
    let finder = GridPathFinder::new(&grid);
    let problem = Climb { grid: &grid, goal: end };

    let sources: Vec<Cell> = grid.cells().filter(|&c| grid.elevation(c) == 0).collect();
    assert_eq!(finder.find_distance(sources, &problem), Ok(29));
}

#[test]
fn test_closure_problem_matches_trait_problem() {
    let (grid, start, end) = letters(EXAMPLE);
    let finder = GridPathFinder::new(&grid);
    let problem = FnProblem::new(
        |cell: Cell| cell.manhattan(end),
        |cell: Cell| cell == end,
        |from: Cell, to: Cell| grid.elevation(to) <= grid.elevation(from) + 1,
    );

    assert_eq!(finder.find_distance([start], &problem), Ok(31));
}

#[test]
fn test_repeated_calls_are_identical() {
    let (grid, start, end) = letters(EXAMPLE);
    let finder = GridPathFinder::new(&grid);
    let problem = Climb { grid: &grid, goal: end };

    let first = finder.find_distance([start], &problem);
    let second = finder.find_distance([start], &problem);
    assert_eq!(first, second);
}

#[test]
fn test_goal_never_true_is_not_found() {
    let (grid, start, _) = letters(EXAMPLE);
    let finder = GridPathFinder::new(&grid);
    let problem = FnProblem::new(|_| 0, |_| false, |_, _| true);

    assert!(matches!(
        finder.find_distance([start], &problem),
        Err(SearchError::NotFound { expansions: 40 })
    ));
}

#[test]
fn test_wall_blocks_goal() {
    let grid = HeightGrid::from_rows([[0u8, 9, 0], [0, 9, 0], [0, 9, 0]]).unwrap();
    let finder = GridPathFinder::new(&grid);
    let problem = Climb {
        grid: &grid,
        goal: Cell::new(0, 2),
    };

    assert!(matches!(
        finder.find_distance([Cell::new(2, 0)], &problem),
        Err(SearchError::NotFound { expansions: 3 })
    ));
}

#[test]
fn test_source_on_goal_is_zero() {
    let (grid, _, end) = letters(EXAMPLE);
    let finder = GridPathFinder::new(&grid).with_max_expansions(0);
    let problem = Climb { grid: &grid, goal: end };

    assert_eq!(finder.find_distance([end], &problem), Ok(0));
}

#[test]
fn test_no_sources_is_not_found() {
    let (grid, _, end) = letters(EXAMPLE);
    let finder = GridPathFinder::new(&grid);
    let problem = Climb { grid: &grid, goal: end };

    assert!(matches!(
        finder.find_distance(std::iter::empty(), &problem),
        Err(SearchError::NotFound { expansions: 0 })
    ));
}

#[test]
fn test_out_of_grid_sources_ignored() {
    let (grid, start, end) = letters(EXAMPLE);
    let finder = GridPathFinder::new(&grid);
    let problem = Climb { grid: &grid, goal: end };

    let sources = [Cell::new(100, 0), start, Cell::new(0, 8)];
    assert_eq!(finder.find_distance(sources, &problem), Ok(31));
}

#[test]
fn test_expansion_cap_gives_up() {
    let (grid, start, end) = letters(EXAMPLE);
    let finder = GridPathFinder::new(&grid).with_max_expansions(5);
    let problem = Climb { grid: &grid, goal: end };

    assert!(matches!(
        finder.find_distance([start], &problem),
        Err(SearchError::NotFound { expansions: 6 })
    ));
}

#[test]
fn test_default_cap() {
    let (grid, _, _) = letters(EXAMPLE);
    assert_eq!(GridPathFinder::new(&grid).max_expansions(), MIN_EXPANSIONS);

    let big = HeightGrid::from_rows(vec![vec![0u8; 500]; 100]).unwrap();
    assert_eq!(GridPathFinder::new(&big).max_expansions(), 200_000);
}

#[test]
fn test_zero_heuristic_gives_true_distance() {
    let (grid, start, end) = letters(EXAMPLE);
    let finder = GridPathFinder::new(&grid);
    let problem = FnProblem::new(
        |_| 0,
        |cell: Cell| cell == end,
        |from: Cell, to: Cell| grid.elevation(to) <= grid.elevation(from) + 1,
    );

    assert_eq!(finder.find_distance([start], &problem), Ok(31));
}

#[test]
fn test_elevation_outside_grid_is_sentinel() {
    let (grid, _, _) = letters(EXAMPLE);
    assert_eq!(grid.elevation(Cell::new(5, 0)), OUT_OF_BOUNDS);
    assert_eq!(grid.elevation(Cell::new(0, 8)), OUT_OF_BOUNDS);
    assert_eq!(grid.get(Cell::new(0, 8)), None);
    assert_eq!(grid.elevation(Cell::new(2, 5)), 25);
}

#[test]
fn test_neighbours_stay_in_grid() {
    let (grid, _, _) = letters(EXAMPLE);
    let corner: Vec<Cell> = grid.neighbours(Cell::new(0, 0)).collect();
    assert_eq!(corner, vec![Cell::new(1, 0), Cell::new(0, 1)]);

    let far: Vec<Cell> = grid.neighbours(Cell::new(4, 7)).collect();
    assert_eq!(far, vec![Cell::new(3, 7), Cell::new(4, 6)]);

    assert_eq!(grid.neighbours(Cell::new(2, 3)).count(), 4);
}

#[test]
fn test_grid_shape_errors() {
    let empty: Vec<Vec<u8>> = Vec::new();
    assert_eq!(HeightGrid::from_rows(empty), Err(GridError::Empty));
    assert_eq!(
        HeightGrid::from_rows([Vec::<u8>::new()]),
        Err(GridError::Empty)
    );
    assert_eq!(
        HeightGrid::from_rows([vec![0u8, 1, 2], vec![3, 4]]),
        Err(GridError::Ragged {
            row: 1,
            expected: 3,
            found: 2
        })
    );

    let grid = HeightGrid::from_rows([[1u8, 2], [3, 4], [5, 6]]).unwrap();
    assert_eq!((grid.width(), grid.height(), grid.len()), (2, 3, 6));
    assert!(!grid.is_empty());
}

fn small_grid() -> impl Strategy<Value = HeightGrid> {
    (1usize..=10, 1usize..=10).prop_flat_map(|(h, w)| {
        prop::collection::vec(prop::collection::vec(0u8..5, w), h)
            .prop_map(|rows| HeightGrid::from_rows(rows).unwrap())
    })
}

fn grid_with_cells(n: usize) -> impl Strategy<Value = (HeightGrid, Vec<Cell>)> {
    small_grid().prop_flat_map(move |grid| {
        let (h, w) = (grid.height(), grid.width());
        let cells = prop::collection::vec((0..h, 0..w).prop_map(Cell::from), n);
        (Just(grid), cells)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_matches_breadth_first_search((grid, cells) in grid_with_cells(2)) {
        let (source, goal) = (cells[0], cells[1]);
        let finder = GridPathFinder::new(&grid);
        let problem = Climb { grid: &grid, goal };

        let found = finder.find_distance([source], &problem).ok();
        prop_assert_eq!(found, bfs(&grid, &[source], goal));
    }

    #[test]
    fn prop_multi_source_is_minimum((grid, cells) in grid_with_cells(3)) {
        let (s1, s2, goal) = (cells[0], cells[1], cells[2]);
        let finder = GridPathFinder::new(&grid);
        let problem = Climb { grid: &grid, goal };

        let both = finder.find_distance([s1, s2], &problem).ok();
        let first = finder.find_distance([s1], &problem).ok();
        let second = finder.find_distance([s2], &problem).ok();
        let expected = match (first, second) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        prop_assert_eq!(both, expected);
    }

    #[test]
    fn prop_overestimate_never_shorter((grid, cells) in grid_with_cells(2), factor in 2u32..20) {
        let (source, goal) = (cells[0], cells[1]);
        let finder = GridPathFinder::new(&grid);
        let greedy = FnProblem::new(
            |cell: Cell| cell.manhattan(goal) * factor,
            |cell: Cell| cell == goal,
            |from: Cell, to: Cell| grid.elevation(to) <= grid.elevation(from) + 1,
        );

        let found = finder.find_distance([source], &greedy).ok();
        let truth = bfs(&grid, &[source], goal);
        prop_assert_eq!(found.is_some(), truth.is_some());
        if let (Some(found), Some(truth)) = (found, truth) {
            prop_assert!(found >= truth);
        }
    }
}
