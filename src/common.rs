//! Shared game types: cells, coordinates, shot results and board errors.

use crate::bitboard::BitBoardError;
use crate::config::BOARD_SIZE;
use core::fmt;

/// State of a single board cell as seen on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    #[cfg_attr(feature = "std", serde(rename = ""))]
    Empty,
    #[cfg_attr(feature = "std", serde(rename = "S"))]
    Occupied,
    #[cfg_attr(feature = "std", serde(rename = "X"))]
    Hit,
    #[cfg_attr(feature = "std", serde(rename = "*"))]
    Miss,
}

impl Cell {
    /// Wire symbol for this cell.
    pub const fn symbol(self) -> &'static str {
        match self {
            Cell::Empty => "",
            Cell::Occupied => "S",
            Cell::Hit => "X",
            Cell::Miss => "*",
        }
    }

    /// `true` once the cell has been fired at.
    pub const fn is_resolved(self) -> bool {
        matches!(self, Cell::Hit | Cell::Miss)
    }
}

/// Rendered board, row-major.
pub type Grid = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// Outcome of firing at a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shot {
    Hit,
    Miss,
}

/// A validated board position.
///
/// Built from the one-based `row`/`col` pair players send; stored zero-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    row: usize,
    col: usize,
}

impl Coord {
    pub fn new(row: i64, col: i64) -> Result<Self, BoardError> {
        let range = 1..=BOARD_SIZE as i64;
        if !range.contains(&row) || !range.contains(&col) {
            return Err(BoardError::OutOfRange);
        }
        Ok(Self {
            row: (row - 1) as usize,
            col: (col - 1) as usize,
        })
    }

    pub(crate) const fn from_index(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// One-based row.
    pub const fn row(&self) -> i64 {
        self.row as i64 + 1
    }

    /// One-based column.
    pub const fn col(&self) -> i64 {
        self.col as i64 + 1
    }

    pub(crate) const fn index(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Every coordinate of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord::from_index(row, col)))
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bit grid rejected an index.
    BitBoardError(BitBoardError),
    /// Coordinates fall outside the board.
    OutOfRange,
    /// A piece already sits on this cell.
    Occupied,
    /// The board already holds its full piece count.
    PlacementComplete,
    /// The cell has already been fired at.
    AlreadyTargeted,
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::OutOfRange => write!(f, "Out of range"),
            BoardError::Occupied => write!(f, "Cell is already occupied"),
            BoardError::PlacementComplete => write!(f, "All pieces are already placed"),
            BoardError::AlreadyTargeted => write!(f, "You have already moved there"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
