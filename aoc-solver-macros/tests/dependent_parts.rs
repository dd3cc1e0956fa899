use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

/// Shared data borrowing the raw input lines; part 1 caches its totals for part 2
#[derive(Debug)]
struct Groups<'a> {
    lines: Vec<&'a str>,
    totals: Option<Vec<u32>>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct GroupTotals;

fn totals(lines: &[&str]) -> Result<Vec<u32>, SolveError> {
    lines
        .split(|line| line.is_empty())
        .map(|group| {
            group
                .iter()
                .map(|line| line.parse::<u32>().map_err(SolveError::failed))
                .sum::<Result<u32, _>>()
        })
        .collect()
}

impl AocParser for GroupTotals {
    type SharedData<'a> = Groups<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        if input.trim().is_empty() {
            return Err(ParseError::MissingData("no groups".into()));
        }
        Ok(Groups {
            lines: input.lines().map(str::trim).collect(),
            totals: None,
        })
    }
}

impl PartSolver<1> for GroupTotals {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let totals = totals(&shared.lines)?;
        let max = totals.iter().copied().max().unwrap_or(0);
        shared.totals = Some(totals);
        Ok(max.to_string())
    }
}

impl PartSolver<2> for GroupTotals {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let totals = match shared.totals.take() {
            Some(totals) => totals,
            None => totals(&shared.lines)?,
        };
        Ok(totals.len().to_string())
    }
}

const INPUT: &str = "1\n2\n\n10\n\n3\n3";

#[test]
fn test_parse_borrows_lines() {
    let shared = <GroupTotals as AocParser>::parse(INPUT).unwrap();
    assert_eq!(shared.lines, vec!["1", "2", "", "10", "", "3", "3"]);
    assert!(shared.totals.is_none());
}

#[test]
fn test_part1_stores_totals() {
    let mut shared = <GroupTotals as AocParser>::parse(INPUT).unwrap();

    let result = <GroupTotals as Solver>::solve_part(&mut shared, 1).unwrap();
    assert_eq!(result, "10");
    assert_eq!(shared.totals, Some(vec![3, 10, 6]));
}

#[test]
fn test_part2_reuses_part1_totals() {
    let mut shared = <GroupTotals as AocParser>::parse(INPUT).unwrap();
    <GroupTotals as Solver>::solve_part(&mut shared, 1).unwrap();

    let result = <GroupTotals as Solver>::solve_part(&mut shared, 2).unwrap();
    assert_eq!(result, "3");
    assert!(shared.totals.is_none());
}

#[test]
fn test_part2_solves_independently() {
    let mut shared = <GroupTotals as AocParser>::parse(INPUT).unwrap();
    let result = <GroupTotals as Solver>::solve_part(&mut shared, 2).unwrap();
    assert_eq!(result, "3");
}

#[test]
fn test_solve_failure_is_reported() {
    let mut shared = <GroupTotals as AocParser>::parse("1\nx").unwrap();
    let result = <GroupTotals as Solver>::solve_part(&mut shared, 1);
    assert!(matches!(result, Err(SolveError::SolveFailed(_))));
}

#[test]
fn test_generated_dispatch_rejects_unknown_part() {
    let mut shared = <GroupTotals as AocParser>::parse(INPUT).unwrap();
    assert_eq!(<GroupTotals as Solver>::PARTS, 2);
    assert!(matches!(
        <GroupTotals as Solver>::solve_part(&mut shared, 3),
        Err(SolveError::PartNotImplemented(3))
    ));
}
