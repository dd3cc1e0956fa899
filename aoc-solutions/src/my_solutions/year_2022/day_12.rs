use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid_path::{Cell, GridPathFinder, HeightGrid, SearchProblem};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 12, title = "Hill Climbing Algorithm", tags = ["2022", "grid"])]
pub struct Solver;

#[derive(Debug)]
pub struct HeightMap {
    grid: HeightGrid,
    start: Cell,
    end: Cell,
}

/// Climb at most one step up, drop any amount, heading for `end`.
struct Climb<'g> {
    grid: &'g HeightGrid,
    end: Cell,
}

impl SearchProblem for Climb<'_> {
    fn heuristic(&self, cell: Cell) -> u32 {
        cell.manhattan(self.end)
    }

    fn is_goal(&self, cell: Cell) -> bool {
        cell == self.end
    }

    fn can_step(&self, from: Cell, to: Cell) -> bool {
        self.grid.elevation(to) <= self.grid.elevation(from) + 1
    }
}

fn place(slot: &mut Option<Cell>, marker: char, cell: Cell) -> anyhow::Result<()> {
    if let Some(first) = slot.replace(cell) {
        bail!(
            "second '{marker}' at line {}, column {} (first at line {}, column {})",
            cell.row + 1,
            cell.col + 1,
            first.row + 1,
            first.col + 1
        );
    }
    Ok(())
}

fn parse_map(input: &str) -> anyhow::Result<HeightMap> {
    let mut start = None;
    let mut end = None;
    let mut rows = Vec::new();

    for (row, line) in input.trim().lines().enumerate() {
        let mut elevations = Vec::with_capacity(line.len());
        for (col, ch) in line.chars().enumerate() {
            let cell = Cell::new(row, col);
            let elevation = match ch {
                'S' => {
                    place(&mut start, 'S', cell)?;
                    0
                }
                'E' => {
                    place(&mut end, 'E', cell)?;
                    25
                }
                'a'..='z' => ch as u8 - b'a',
                other => bail!("unexpected {other:?} at line {}, column {}", row + 1, col + 1),
            };
            elevations.push(elevation);
        }
        rows.push(elevations);
    }

    let grid = HeightGrid::from_rows(rows)?;
    Ok(HeightMap {
        grid,
        start: start.ok_or_else(|| anyhow!("missing start marker 'S'"))?,
        end: end.ok_or_else(|| anyhow!("missing end marker 'E'"))?,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = HeightMap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_map(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl HeightMap {
    fn shortest_from(&self, sources: impl IntoIterator<Item = Cell>) -> Result<String, SolveError> {
        let climb = Climb {
            grid: &self.grid,
            end: self.end,
        };
        GridPathFinder::new(&self.grid)
            .find_distance(sources, &climb)
            .map(|distance| distance.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.shortest_from([shared.start])
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let grid = &shared.grid;
        let lowest = grid.cells().filter(|&cell| grid.elevation(cell) == 0);
        shared.shortest_from(lowest)
    }
}

#[cfg(test)]
mod tests {
    use aoc_solver::{DynSolver, ParseError, SolveError, SolverInstance};

    const EXAMPLE: &str = "Sabqponm\nabcryxxl\naccszExk\nacctuvwj\nabdefghi\n";

    fn instance(input: &str) -> Result<SolverInstance<'_, super::Solver>, ParseError> {
        SolverInstance::new(2022, 12, input)
    }

    #[test]
    fn test_example() {
        let mut solver = instance(EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "31");
        assert_eq!(solver.solve(2).unwrap().answer, "29");
    }

    #[test]
    fn test_markers_parsed() {
        let map = super::parse_map(EXAMPLE).unwrap();
        assert_eq!(map.start, super::Cell::new(0, 0));
        assert_eq!(map.end, super::Cell::new(2, 5));
        assert_eq!(map.grid.elevation(map.end), 25);
    }

    #[test]
    fn test_unreachable_end_is_solve_failure() {
        let mut solver = instance("SbE").unwrap();
        assert!(matches!(solver.solve(1), Err(SolveError::SolveFailed(_))));
        assert!(matches!(solver.solve(2), Err(SolveError::SolveFailed(_))));
    }

    #[test]
    fn test_single_row_climb() {
        let mut solver = instance("SbcdefghijklmnopqrstuvwxyzE").unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "26");
        assert_eq!(solver.solve(2).unwrap().answer, "26");
    }

    #[test]
    fn test_parse_errors() {
        for (input, fragment) in [
            ("abc\nabE", "missing start"),
            ("Sbc\nabc", "missing end"),
            ("SbE\nSbc", "second 'S'"),
            ("SbE\nabE", "second 'E'"),
            ("Sb1\nabE", "unexpected '1'"),
            ("SbEa\nabc", "row 1 has 3 cells"),
            ("", "no cells"),
        ] {
            match instance(input) {
                Err(ParseError::InvalidFormat(message)) => {
                    assert!(message.contains(fragment), "{input:?}: {message}")
                }
                Err(other) => panic!("{input:?}: unexpected error {other:?}"),
                Ok(_) => panic!("{input:?}: parsed"),
            }
        }
    }
}
