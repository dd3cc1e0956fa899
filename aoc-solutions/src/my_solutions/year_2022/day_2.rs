use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 2, title = "Rock Paper Scissors", tags = ["2022"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rock,
    Paper,
    Scissors,
}

impl Shape {
    fn score(self) -> u32 {
        match self {
            Shape::Rock => 1,
            Shape::Paper => 2,
            Shape::Scissors => 3,
        }
    }

    fn beats(self) -> Shape {
        match self {
            Shape::Rock => Shape::Scissors,
            Shape::Paper => Shape::Rock,
            Shape::Scissors => Shape::Paper,
        }
    }

    fn loses_to(self) -> Shape {
        self.beats().beats()
    }

    /// Points for playing `self` against `opponent`, shape included.
    fn play(self, opponent: Shape) -> u32 {
        let outcome = if self == opponent {
            3
        } else if self.beats() == opponent {
            6
        } else {
            0
        };
        self.score() + outcome
    }
}

/// One round: the opponent's shape and the column `X`/`Y`/`Z` as 0/1/2.
pub type Round = (Shape, u8);

impl AocParser for Solver {
    type SharedData<'a> = Vec<Round>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .enumerate()
            .map(|(i, line)| match line.trim().as_bytes() {
                [opponent @ b'A'..=b'C', b' ', column @ b'X'..=b'Z'] => {
                    let opponent = match opponent {
                        b'A' => Shape::Rock,
                        b'B' => Shape::Paper,
                        _ => Shape::Scissors,
                    };
                    Ok((opponent, column - b'X'))
                }
                _ => Err(ParseError::InvalidFormat(format!(
                    "(line {}) expected \"[ABC] [XYZ]\", got {:?}",
                    i + 1,
                    line
                ))),
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        const SHAPES: [Shape; 3] = [Shape::Rock, Shape::Paper, Shape::Scissors];
        let total: u32 = shared
            .iter()
            .map(|&(opponent, column)| SHAPES[column as usize].play(opponent))
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .iter()
            .map(|&(opponent, column)| {
                let mine = match column {
                    0 => opponent.beats(),
                    1 => opponent,
                    _ => opponent.loses_to(),
                };
                mine.play(opponent)
            })
            .sum();
        Ok(total.to_string())
    }
}
