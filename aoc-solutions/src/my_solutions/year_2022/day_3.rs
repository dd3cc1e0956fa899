use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 3, title = "Rucksack Reorganization", tags = ["2022"])]
pub struct Solver;

/// Item types as a bitset indexed by priority (bit 1 = `a`, bit 52 = `Z`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Items(u64);

impl Items {
    fn parse(items: &str) -> anyhow::Result<Self> {
        items.bytes().try_fold(Items(0), |set, b| {
            let priority = match b {
                b'a'..=b'z' => b - b'a' + 1,
                b'A'..=b'Z' => b - b'A' + 27,
                _ => bail!("not an item: {:?}", b as char),
            };
            Ok(Items(set.0 | 1 << priority))
        })
    }

    /// Priority of the single item shared with `other`.
    fn common_priority(self, other: Items) -> Option<u32> {
        let shared = self.0 & other.0;
        (shared.count_ones() == 1).then(|| shared.trailing_zeros())
    }
}

#[derive(Debug)]
pub struct Rucksack {
    front: Items,
    back: Items,
}

impl Rucksack {
    fn all(&self) -> Items {
        Items(self.front.0 | self.back.0)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Rucksack>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .enumerate()
            .map(|(i, line)| -> anyhow::Result<Rucksack> {
                let line = line.trim();
                if !line.is_ascii() {
                    bail!("(line {}) items must be ASCII letters", i + 1);
                }
                if line.len() % 2 != 0 {
                    bail!("(line {}) odd number of items", i + 1);
                }
                let (front, back) = line.split_at(line.len() / 2);
                Ok(Rucksack {
                    front: Items::parse(front).map_err(|e| anyhow!("(line {}) {}", i + 1, e))?,
                    back: Items::parse(back).map_err(|e| anyhow!("(line {}) {}", i + 1, e))?,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .enumerate()
            .map(|(i, sack)| {
                sack.front
                    .common_priority(sack.back)
                    .ok_or_else(|| SolveError::failed(format!("rucksack {} has no single shared item", i + 1)))
            })
            .sum::<Result<u32, _>>()
            .map(|total| total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.len() % 3 != 0 {
            return Err(SolveError::failed(format!(
                "{} rucksacks do not split into groups of three",
                shared.len()
            )));
        }

        shared
            .iter()
            .tuples()
            .enumerate()
            .map(|(g, (a, b, c))| {
                let ab = Items(a.all().0 & b.all().0);
                ab.common_priority(c.all())
                    .ok_or_else(|| SolveError::failed(format!("group {} has no single badge", g + 1)))
            })
            .sum::<Result<u32, _>>()
            .map(|total| total.to_string())
    }
}
