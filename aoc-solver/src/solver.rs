//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Parses a puzzle input once into the data every part works on
///
/// `SharedData` may borrow from the input through its lifetime.
///
/// # Example
///
/// A height map where `S` and `E` mark the start and the summit:
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct HillClimb;
///
/// struct Heights<'a> {
///     rows: Vec<&'a [u8]>,
/// }
///
/// impl AocParser for HillClimb {
///     type SharedData<'a> = Heights<'a>;
///
///     fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
///         let rows: Vec<&[u8]> = input.lines().map(str::as_bytes).collect();
///         if rows.is_empty() {
///             return Err(ParseError::MissingData("empty height map".into()));
///         }
///         Ok(Heights { rows })
///     }
/// }
///
/// let map = HillClimb::parse("Sabqponm\nabcryxxl\n").unwrap();
/// assert_eq!(map.rows[1][4], b'y');
/// ```
pub trait AocParser {
    /// Parsed input, plus anything one part leaves behind for the next
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// One part of a puzzle, selected by the const generic `N`
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, PartSolver, ParseError, SolveError};
///
/// struct Calories;
///
/// impl AocParser for Calories {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .split("\n\n")
///             .map(|elf| {
///                 elf.lines()
///                     .map(|snack| snack.parse::<u32>())
///                     .sum::<Result<u32, _>>()
///                     .map_err(|e| ParseError::InvalidFormat(e.to_string()))
///             })
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Calories {
///     fn solve(elves: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         elves
///             .iter()
///             .max()
///             .map(u32::to_string)
///             .ok_or_else(|| SolveError::failed("no elves"))
///     }
/// }
///
/// let mut elves = Calories::parse("1000\n2000\n\n4000").unwrap();
/// assert_eq!(<Calories as PartSolver<1>>::solve(&mut elves).unwrap(), "4000");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// Answer for part `N`, or `SolveError::SolveFailed` when the data has none
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Dispatches a part number to the solver's parts
///
/// `#[derive(AocSolver)]` writes this impl from the [`PartSolver`] impls.
/// By hand it looks like this:
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct CampCleanup;
///
/// impl AocParser for CampCleanup {
///     type SharedData<'a> = Vec<[u32; 4]>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|line| {
///                 let bounds: Vec<u32> = line
///                     .split([',', '-'])
///                     .map(str::parse::<u32>)
///                     .collect::<Result<_, _>>()
///                     .map_err(|_| ParseError::InvalidFormat(line.to_string()))?;
///                 bounds
///                     .try_into()
///                     .map_err(|_| ParseError::InvalidFormat(line.to_string()))
///             })
///             .collect()
///     }
/// }
///
/// impl Solver for CampCleanup {
///     const PARTS: u8 = 2;
///
///     fn solve_part(pairs: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         let count = |keep: fn(&[u32; 4]) -> bool| pairs.iter().filter(|p| keep(p)).count();
///         match part {
///             1 => Ok(count(|[a, b, c, d]| (a <= c && d <= b) || (c <= a && b <= d)).to_string()),
///             2 => Ok(count(|[a, b, c, d]| a <= d && c <= b).to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// let mut pairs = CampCleanup::parse("2-8,3-7\n5-7,7-9\n2-4,6-8").unwrap();
/// assert_eq!(CampCleanup::solve_part(&mut pairs, 1).unwrap(), "1");
/// assert_eq!(CampCleanup::solve_part(&mut pairs, 2).unwrap(), "2");
/// ```
pub trait Solver: AocParser {
    /// Number of parts, counted from 1
    const PARTS: u8;

    /// `PartNotImplemented` for any part without an answer
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked part dispatch, available on every [`Solver`]
pub trait SolverExt: Solver {
    /// Solve `part` if it lies in `1..=PARTS`, otherwise `PartOutOfRange`
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
