use std::collections::HashMap;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use thiserror::Error;

use crate::utils::dp_cache::{DpCache, DpError, DpProblem, HashMapBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 21, title = "Monkey Math", tags = ["2022", "dp"])]
pub struct Solver;

const ROOT: &str = "root";
const HUMAN: &str = "humn";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("{monkey} divides by zero")]
    DivisionByZero { monkey: String },
    #[error("{monkey} divides {dividend} by {divisor} with a remainder")]
    InexactDivision {
        monkey: String,
        dividend: i64,
        divisor: i64,
    },
    #[error("{monkey} overflows")]
    Overflow { monkey: String },
    #[error("monkeys wait on each other through {0}")]
    Cycle(String),
    #[error("{0}")]
    Unsolvable(String),
}

impl From<DpError<&str>> for MathError {
    fn from(error: DpError<&str>) -> Self {
        match error {
            DpError::Cycle(name) => MathError::Cycle(name.to_string()),
        }
    }
}

type Value = Result<i64, MathError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    fn apply(self, monkey: &str, left: i64, right: i64) -> Value {
        let overflow = || MathError::Overflow {
            monkey: monkey.to_string(),
        };
        match self {
            Operator::Add => left.checked_add(right).ok_or_else(overflow),
            Operator::Sub => left.checked_sub(right).ok_or_else(overflow),
            Operator::Mul => left.checked_mul(right).ok_or_else(overflow),
            Operator::Div if right == 0 => Err(MathError::DivisionByZero {
                monkey: monkey.to_string(),
            }),
            Operator::Div => match left.checked_rem(right).ok_or_else(overflow)? {
                0 => left.checked_div(right).ok_or_else(overflow),
                _ => Err(MathError::InexactDivision {
                    monkey: monkey.to_string(),
                    dividend: left,
                    divisor: right,
                }),
            },
        }
    }

    /// The operand that makes `left op known == result`.
    fn solve_left(self, monkey: &str, result: i64, known: i64) -> Value {
        match self {
            Operator::Add => Operator::Sub.apply(monkey, result, known),
            Operator::Sub => Operator::Add.apply(monkey, result, known),
            Operator::Mul => Operator::Div.apply(monkey, result, known),
            Operator::Div => Operator::Mul.apply(monkey, result, known),
        }
    }

    /// The operand that makes `known op right == result`.
    fn solve_right(self, monkey: &str, result: i64, known: i64) -> Value {
        match self {
            Operator::Add => Operator::Sub.apply(monkey, result, known),
            Operator::Sub => Operator::Sub.apply(monkey, known, result),
            Operator::Mul => Operator::Div.apply(monkey, result, known),
            Operator::Div => Operator::Div.apply(monkey, known, result),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Job<'a> {
    Number(i64),
    Operation(&'a str, Operator, &'a str),
}

/// Every monkey's job, keyed by name. All referenced names exist.
#[derive(Debug)]
pub struct Riddle<'a> {
    jobs: HashMap<&'a str, Job<'a>>,
}

impl<'a> Riddle<'a> {
    fn operands(&self, name: &str) -> Vec<&'a str> {
        match self.jobs.get(name) {
            Some(&Job::Operation(left, _, right)) => vec![left, right],
            _ => Vec::new(),
        }
    }
}

/// Number yelled by each monkey.
struct Yell<'r, 'a>(&'r Riddle<'a>);

impl<'a> DpProblem<&'a str, Value> for Yell<'_, 'a> {
    fn deps(&self, name: &&'a str) -> Vec<&'a str> {
        self.0.operands(name)
    }

    fn compute(&self, name: &&'a str, deps: Vec<Value>) -> Value {
        match self.0.jobs.get(name) {
            Some(&Job::Number(n)) => Ok(n),
            Some(&Job::Operation(_, op, _)) => match deps.as_slice() {
                [left, right] => op.apply(name, left.clone()?, right.clone()?),
                _ => Err(MathError::Unsolvable(format!("{name} needs two operands"))),
            },
            None => Err(MathError::Unsolvable(format!("no job for {name}"))),
        }
    }
}

/// Whether a monkey's number depends on what the human yells.
struct HearsHuman<'r, 'a>(&'r Riddle<'a>);

impl<'a> DpProblem<&'a str, bool> for HearsHuman<'_, 'a> {
    fn deps(&self, name: &&'a str) -> Vec<&'a str> {
        self.0.operands(name)
    }

    fn compute(&self, name: &&'a str, deps: Vec<bool>) -> bool {
        *name == HUMAN || deps.into_iter().any(|d| d)
    }
}

type Cache<'a, K, P> = DpCache<&'a str, K, HashMapBackend<&'a str, K>, P>;

struct Troop<'r, 'a> {
    riddle: &'r Riddle<'a>,
    yells: Cache<'a, Value, Yell<'r, 'a>>,
    hears_human: Cache<'a, bool, HearsHuman<'r, 'a>>,
}

impl<'r, 'a> Troop<'r, 'a> {
    fn new(riddle: &'r Riddle<'a>) -> Self {
        let capacity = riddle.jobs.len();
        Self {
            riddle,
            yells: DpCache::builder()
                .backend(HashMapBackend::with_capacity(capacity))
                .problem(Yell(riddle))
                .build(),
            hears_human: DpCache::builder()
                .backend(HashMapBackend::with_capacity(capacity))
                .problem(HearsHuman(riddle))
                .build(),
        }
    }

    fn yell(&self, name: &'a str) -> Value {
        self.yells.get(&name)?
    }

    fn hears_human(&self, name: &'a str) -> Result<bool, MathError> {
        Ok(self.hears_human.get(&name)?)
    }

    /// Splits an operation into the side that hears the human and the
    /// number yelled by the other side.
    fn unknown_side(
        &self,
        left: &'a str,
        right: &'a str,
    ) -> Result<(&'a str, bool, i64), MathError> {
        match (self.hears_human(left)?, self.hears_human(right)?) {
            (true, false) => Ok((left, true, self.yell(right)?)),
            (false, true) => Ok((right, false, self.yell(left)?)),
            (true, true) => Err(MathError::Unsolvable(format!(
                "both {left} and {right} depend on {HUMAN}"
            ))),
            (false, false) => Err(MathError::Unsolvable(format!(
                "neither {left} nor {right} depends on {HUMAN}"
            ))),
        }
    }

    /// The number the human must yell for both sides of the root to match.
    fn balance_root(&self) -> Value {
        if !self.riddle.jobs.contains_key(HUMAN) {
            return Err(MathError::Unsolvable(format!("no monkey named {HUMAN}")));
        }
        let Some(&Job::Operation(left, _, right)) = self.riddle.jobs.get(ROOT) else {
            return Err(MathError::Unsolvable(format!("{ROOT} does not compare two monkeys")));
        };

        let (mut name, _, mut target) = self.unknown_side(left, right)?;
        while name != HUMAN {
            let Some(&Job::Operation(left, op, right)) = self.riddle.jobs.get(name) else {
                return Err(MathError::Unsolvable(format!("{name} yells a fixed number")));
            };
            let (next, is_left, known) = self.unknown_side(left, right)?;
            target = if is_left {
                op.solve_left(name, target, known)?
            } else {
                op.solve_right(name, target, known)?
            };
            name = next;
        }
        log::debug!("{HUMAN} must yell {target}");
        Ok(target)
    }
}

fn parse_job(text: &str) -> anyhow::Result<Job<'_>> {
    if let Ok(n) = text.parse() {
        return Ok(Job::Number(n));
    }
    let (left, op, right) = text
        .split_whitespace()
        .collect_tuple()
        .ok_or_else(|| anyhow!("expected a number or \"a op b\", got {text:?}"))?;
    let op = match op {
        "+" => Operator::Add,
        "-" => Operator::Sub,
        "*" => Operator::Mul,
        "/" => Operator::Div,
        other => bail!("unknown operator {other:?}"),
    };
    Ok(Job::Operation(left, op, right))
}

impl AocParser for Solver {
    type SharedData<'a> = Riddle<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut jobs = HashMap::new();
        for (i, line) in input.trim().lines().enumerate() {
            let (name, job) = line
                .split_once(':')
                .ok_or_else(|| anyhow!("expected \"name: job\""))
                .and_then(|(name, job)| Ok((name.trim(), parse_job(job.trim())?)))
                .with_context(|| format!("line {}", i + 1))
                .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))?;
            if jobs.insert(name, job).is_some() {
                return Err(ParseError::InvalidFormat(format!(
                    "line {}: {name} has two jobs",
                    i + 1
                )));
            }
        }

        if !jobs.contains_key(ROOT) {
            return Err(ParseError::MissingData(format!("no monkey named {ROOT}")));
        }
        for (name, job) in &jobs {
            if let Job::Operation(left, _, right) = job {
                if let Some(unknown) = [left, right].into_iter().find(|n| !jobs.contains_key(*n)) {
                    return Err(ParseError::InvalidFormat(format!(
                        "{name} waits on unknown monkey {unknown}"
                    )));
                }
            }
        }
        Ok(Riddle { jobs })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Troop::new(shared)
            .yell(ROOT)
            .map(|n| n.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Troop::new(shared)
            .balance_root()
            .map(|n| n.to_string())
            .map_err(SolveError::failed)
    }
}
