//! One player's private grid: piece placement and incoming fire.

use crate::bitboard::BitBoard;
use crate::common::{BoardError, Cell, Coord, Grid, Shot};
use crate::config::{BOARD_SIZE, PLACEMENT_TARGET};

type BB = BitBoard<u128, BOARD_SIZE>;

/// A player's board.
///
/// Pieces, hits and misses are tracked as separate masks. A hit cell stays in
/// `pieces`, so `pieces` only grows and `pieces & !hits` is what is left afloat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Board {
    pieces: BB,
    hits: BB,
    misses: BB,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of the cell at `at`.
    pub fn cell(&self, at: Coord) -> Cell {
        let (row, col) = at.index();
        // Coord is always within the grid.
        if self.hits.get(row, col).unwrap_or(false) {
            Cell::Hit
        } else if self.misses.get(row, col).unwrap_or(false) {
            Cell::Miss
        } else if self.pieces.get(row, col).unwrap_or(false) {
            Cell::Occupied
        } else {
            Cell::Empty
        }
    }

    /// Put a piece segment on an empty cell.
    pub fn place(&mut self, at: Coord) -> Result<(), BoardError> {
        if self.is_ready() {
            return Err(BoardError::PlacementComplete);
        }
        if self.cell(at) != Cell::Empty {
            return Err(BoardError::Occupied);
        }
        let (row, col) = at.index();
        self.pieces.set(row, col)?;
        Ok(())
    }

    /// Resolve an incoming shot. A cell can be fired at only once.
    pub fn fire(&mut self, at: Coord) -> Result<Shot, BoardError> {
        let (row, col) = at.index();
        match self.cell(at) {
            Cell::Hit | Cell::Miss => Err(BoardError::AlreadyTargeted),
            Cell::Occupied => {
                self.hits.set(row, col)?;
                Ok(Shot::Hit)
            }
            Cell::Empty => {
                self.misses.set(row, col)?;
                Ok(Shot::Miss)
            }
        }
    }

    /// Segments placed so far, whether hit or not.
    pub fn placed(&self) -> usize {
        self.pieces.count_ones()
    }

    /// Segments that have not been hit.
    pub fn remaining_pieces(&self) -> usize {
        (self.pieces & !self.hits).count_ones()
    }

    /// `true` once the full fleet is on the board.
    pub fn is_ready(&self) -> bool {
        self.placed() == PLACEMENT_TARGET
    }

    /// Positions of every placed segment.
    pub fn pieces(&self) -> impl Iterator<Item = Coord> + '_ {
        self.pieces
            .iter_set_bits()
            .map(|(row, col)| Coord::from_index(row, col))
    }

    /// The board as its owner sees it.
    pub fn own_view(&self) -> Grid {
        self.render(|cell| cell)
    }

    /// The board as the opponent sees it: unhit pieces are hidden.
    pub fn opponent_view(&self) -> Grid {
        self.render(|cell| match cell {
            Cell::Occupied => Cell::Empty,
            other => other,
        })
    }

    fn render(&self, mask: impl Fn(Cell) -> Cell) -> Grid {
        let mut grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for at in Coord::all() {
            let (row, col) = at.index();
            grid[row][col] = mask(self.cell(at));
        }
        grid
    }
}
