use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 1, title = "Calorie Counting", tags = ["2022"])]
pub struct Solver;

/// Calorie total carried by each elf, in input order.
pub type SharedData = Vec<u32>;

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseError::MissingData("no elves".to_string()));
        }

        input
            .split("\n\n")
            .enumerate()
            .map(|(elf, block)| {
                block
                    .lines()
                    .map(|line| {
                        line.trim()
                            .parse::<u32>()
                            .map_err(|e| anyhow!("(elf {}) {:?}: {}", elf + 1, line, e))
                    })
                    .sum::<anyhow::Result<u32>>()
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .max()
            .map(u32::to_string)
            .ok_or_else(|| SolveError::failed("no elves"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let top_three: u32 = shared.iter().sorted_unstable_by(|a, b| b.cmp(a)).take(3).sum();
        Ok(top_three.to_string())
    }
}

#[cfg(test)]
mod tests {
    use aoc_solver::{DynSolver, ParseError, SolverInstance};

    const EXAMPLE: &str = "1000\n2000\n3000\n\n4000\n\n5000\n6000\n\n7000\n8000\n9000\n\n10000\n";

    #[test]
    fn test_example() {
        let mut solver = SolverInstance::<super::Solver>::new(2022, 1, EXAMPLE).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "24000");
        assert_eq!(solver.solve(2).unwrap().answer, "45000");
    }

    #[test]
    fn test_fewer_than_three_elves() {
        let mut solver = SolverInstance::<super::Solver>::new(2022, 1, "5\n\n7").unwrap();
        assert_eq!(solver.solve(2).unwrap().answer, "12");
    }

    #[test]
    fn test_bad_line_reports_elf() {
        match SolverInstance::<super::Solver>::new(2022, 1, "1\n\n2\nx") {
            Err(ParseError::InvalidFormat(message)) => assert!(message.contains("elf 2")),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
        assert!(matches!(
            SolverInstance::<super::Solver>::new(2022, 1, "\n"),
            Err(ParseError::MissingData(_))
        ));
    }
}
