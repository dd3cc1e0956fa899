//! Rectangular elevation grid.

use thiserror::Error;

/// Elevation reported for coordinates outside the grid.
///
/// Higher than any letter elevation (`a`..=`z` is `0..=25`) by more than one,
/// so a climb-at-most-one rule can never step off the map.
pub const OUT_OF_BOUNDS: u8 = 28;

/// A (row, col) coordinate, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance, saturating at `u32::MAX`.
    pub fn manhattan(self, other: Cell) -> u32 {
        let d = self.row.abs_diff(other.row) + self.col.abs_diff(other.col);
        u32::try_from(d).unwrap_or(u32::MAX)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Immutable row-major grid of elevations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightGrid {
    width: usize,
    height: usize,
    elevations: Vec<u8>,
}

impl HeightGrid {
    /// Build a grid from rows, rejecting empty and non-rectangular input.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, GridError>
    where
        R: IntoIterator<Item = u8>,
    {
        let mut width = None;
        let mut height = 0;
        let mut elevations = Vec::new();

        for (row, cells) in rows.into_iter().enumerate() {
            let before = elevations.len();
            elevations.extend(cells);
            let found = elevations.len() - before;

            match width {
                None if found == 0 => return Err(GridError::Empty),
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(GridError::Ragged {
                        row,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        match width {
            Some(width) => Ok(Self {
                width,
                height,
                elevations,
            }),
            None => Err(GridError::Empty),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.elevations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elevations.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Flat index of an in-grid cell.
    pub(crate) fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell).then(|| cell.row * self.width + cell.col)
    }

    pub fn get(&self, cell: Cell) -> Option<u8> {
        self.index(cell).map(|i| self.elevations[i])
    }

    /// Elevation at `cell`, or [`OUT_OF_BOUNDS`] outside the grid.
    pub fn elevation(&self, cell: Cell) -> u8 {
        self.get(cell).unwrap_or(OUT_OF_BOUNDS)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Cell::new(row, col)))
    }

    /// In-grid orthogonal neighbours: up, down, left, right.
    pub fn neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let Cell { row, col } = cell;
        [
            row.checked_sub(1).map(|r| Cell::new(r, col)),
            Some(Cell::new(row + 1, col)),
            col.checked_sub(1).map(|c| Cell::new(row, c)),
            Some(Cell::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(move |&n| self.contains(n))
    }
}
