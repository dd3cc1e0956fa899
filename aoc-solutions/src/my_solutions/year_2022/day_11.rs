use anyhow::{Context, anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 11, title = "Monkey in the Middle", tags = ["2022", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    Old,
    Value(u64),
}

impl Operand {
    fn parse(token: &str) -> anyhow::Result<Self> {
        match token {
            "old" => Ok(Operand::Old),
            n => n
                .parse()
                .map(Operand::Value)
                .with_context(|| format!("bad operand {n:?}")),
        }
    }

    fn resolve(self, old: u64) -> u64 {
        match self {
            Operand::Old => old,
            Operand::Value(v) => v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add(Operand, Operand),
    Mul(Operand, Operand),
}

impl Operation {
    /// New worry level; two `u64` operands cannot overflow `u128`.
    fn apply(self, old: u64) -> u128 {
        let wide = |operand: Operand| u128::from(operand.resolve(old));
        match self {
            Operation::Add(a, b) => wide(a) + wide(b),
            Operation::Mul(a, b) => wide(a) * wide(b),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Monkey {
    items: Vec<u64>,
    operation: Operation,
    divisor: u64,
    if_true: usize,
    if_false: usize,
}

impl Monkey {
    fn target(&self, worry: u64) -> usize {
        if worry % self.divisor == 0 {
            self.if_true
        } else {
            self.if_false
        }
    }
}

fn field<'a>(lines: &mut impl Iterator<Item = &'a str>, prefix: &str) -> anyhow::Result<&'a str> {
    let line = lines
        .next()
        .ok_or_else(|| anyhow!("missing {prefix:?} line"))?
        .trim();
    line.strip_prefix(prefix)
        .map(str::trim)
        .ok_or_else(|| anyhow!("expected {prefix:?}, got {line:?}"))
}

fn parse_monkey(index: usize, block: &str) -> anyhow::Result<Monkey> {
    let mut lines = block.lines();

    let id: usize = field(&mut lines, "Monkey")?
        .trim_end_matches(':')
        .parse()
        .context("bad monkey number")?;
    ensure!(id == index, "monkey {id} listed in position {index}");

    let items = field(&mut lines, "Starting items:")?;
    let items = if items.is_empty() {
        Vec::new()
    } else {
        items
            .split(',')
            .map(|item| item.trim().parse::<u64>())
            .collect::<Result<Vec<u64>, _>>()
            .with_context(|| format!("bad starting items {items:?}"))?
    };

    let expression = field(&mut lines, "Operation: new =")?;
    let operation = match expression.split_whitespace().collect_tuple() {
        Some((a, "+", b)) => Operation::Add(Operand::parse(a)?, Operand::parse(b)?),
        Some((a, "*", b)) => Operation::Mul(Operand::parse(a)?, Operand::parse(b)?),
        _ => bail!("unsupported operation {expression:?}"),
    };

    let divisor: u64 = field(&mut lines, "Test: divisible by")?
        .parse()
        .context("bad divisor")?;
    ensure!(divisor > 0, "divisor must be positive");

    let if_true = field(&mut lines, "If true: throw to monkey")?
        .parse()
        .context("bad true target")?;
    let if_false = field(&mut lines, "If false: throw to monkey")?
        .parse()
        .context("bad false target")?;

    Ok(Monkey {
        items,
        operation,
        divisor,
        if_true,
        if_false,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Monkey>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let monkeys = input
            .trim()
            .split("\n\n")
            .enumerate()
            .map(|(i, block)| parse_monkey(i, block).with_context(|| format!("monkey {i}")))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))?;

        if monkeys.len() < 2 {
            return Err(ParseError::MissingData("need at least two monkeys".to_string()));
        }
        for (i, monkey) in monkeys.iter().enumerate() {
            for target in [monkey.if_true, monkey.if_false] {
                if target >= monkeys.len() || target == i {
                    return Err(ParseError::InvalidFormat(format!(
                        "monkey {i} throws to invalid monkey {target}"
                    )));
                }
            }
        }
        Ok(monkeys)
    }
}

/// Inspection counts after `rounds` rounds, dividing worry by `relief` after each inspection.
///
/// Worry is kept below `relief * product(divisors)`: reducing modulo that
/// before dividing gives the same quotient modulo every divisor.
fn inspections(monkeys: &[Monkey], rounds: usize, relief: u64) -> Result<Vec<u64>, SolveError> {
    let modulus = monkeys
        .iter()
        .try_fold(relief, |acc, m| acc.checked_mul(m.divisor))
        .ok_or_else(|| SolveError::failed(format!("worry modulus overflows with relief {relief}")))?;
    let mut held: Vec<Vec<u64>> = monkeys
        .iter()
        .map(|m| m.items.iter().map(|&item| item % modulus).collect())
        .collect();
    let mut counts = vec![0; monkeys.len()];

    for _ in 0..rounds {
        for (i, monkey) in monkeys.iter().enumerate() {
            let items = std::mem::take(&mut held[i]);
            counts[i] += items.len() as u64;
            for worry in items {
                // below modulus, so it fits back into u64
                let reduced = (monkey.operation.apply(worry) % u128::from(modulus)) as u64;
                let worry = reduced / relief;
                held[monkey.target(worry)].push(worry);
            }
        }
    }
    Ok(counts)
}

fn monkey_business(monkeys: &[Monkey], rounds: usize, relief: u64) -> Result<String, SolveError> {
    inspections(monkeys, rounds, relief)?
        .into_iter()
        .sorted_unstable_by(|a, b| b.cmp(a))
        .take(2)
        .try_fold(1u64, |acc, count| acc.checked_mul(count))
        .map(|business| business.to_string())
        .ok_or_else(|| SolveError::failed("monkey business overflows u64"))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        monkey_business(shared, 20, 3)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        monkey_business(shared, 10_000, 1)
    }
}
