use std::ops::RangeInclusive;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 4, title = "Camp Cleanup", tags = ["2022"])]
pub struct Solver;

type Sections = RangeInclusive<u32>;

fn parse_range(text: &str) -> anyhow::Result<Sections> {
    let (start, end) = text
        .split_once('-')
        .ok_or_else(|| anyhow!("expected START-END, got {text:?}"))?;
    let start = start.parse::<u32>().with_context(|| format!("bad start in {text:?}"))?;
    let end = end.parse::<u32>().with_context(|| format!("bad end in {text:?}"))?;
    Ok(start..=end)
}

fn contains(outer: &Sections, inner: &Sections) -> bool {
    outer.start() <= inner.start() && inner.end() <= outer.end()
}

fn overlaps(a: &Sections, b: &Sections) -> bool {
    a.start() <= b.end() && b.start() <= a.end()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<(Sections, Sections)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .enumerate()
            .map(|(i, line)| {
                line.trim()
                    .split(',')
                    .map(parse_range)
                    .collect::<anyhow::Result<Vec<_>>>()
                    .and_then(|ranges| {
                        ranges
                            .into_iter()
                            .collect_tuple::<(Sections, Sections)>()
                            .ok_or_else(|| anyhow!("expected two ranges"))
                    })
                    .with_context(|| format!("line {}", i + 1))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared
            .iter()
            .filter(|(a, b)| contains(a, b) || contains(b, a))
            .count();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared.iter().filter(|(a, b)| overlaps(a, b)).count();
        Ok(count.to_string())
    }
}
