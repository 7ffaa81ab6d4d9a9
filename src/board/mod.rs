//! Board representation for Obstruction

pub mod board;
pub mod search_board;


// Re-exports
pub use board::Board;
pub use search_board::SearchBoard;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board size (6x6)
pub const BOARD_SIZE: usize = 6;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 36

/// Cell states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    /// Marked by the first player
    First,
    /// Marked by the second player
    Second,
    /// Rendered unplayable by a neighboring move, without being one itself
    Locked,
}

/// Players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// Get the other player
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// The cell state this player leaves behind
    #[inline]
    pub fn mark(self) -> Cell {
        match self {
            Player::First => Cell::First,
            Player::Second => Cell::Second,
        }
    }
}

/// A move on the board, 1-based coordinates in [1,6]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: u8,
    pub col: u8,
}

impl Move {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(Move::in_bounds(row as i32, col as i32));
        Self { row, col }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        (self.row as usize - 1) * BOARD_SIZE + (self.col as usize - 1)
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8 + 1,
            col: (idx % BOARD_SIZE) as u8 + 1,
        }
    }

    #[inline]
    pub fn in_bounds(row: i32, col: i32) -> bool {
        row >= 1 && row <= BOARD_SIZE as i32 && col >= 1 && col <= BOARD_SIZE as i32
    }

    /// Parse a move from front-end text input of the form `"row col"`.
    ///
    /// Distinguishes malformed input (`NotANumber`) from coordinates outside
    /// the board (`OutOfRange`). Occupancy is checked by the board, not here.
    pub fn parse(input: &str) -> Result<Move, MoveError> {
        let mut tokens = input.split_whitespace();
        let (Some(row), Some(col), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(MoveError::NotANumber);
        };
        let row: i32 = row.parse().map_err(|_| MoveError::NotANumber)?;
        let col: i32 = col.parse().map_err(|_| MoveError::NotANumber)?;
        if !Move::in_bounds(row, col) {
            return Err(MoveError::OutOfRange);
        }
        Ok(Move::new(row as u8, col as u8))
    }
}

impl PartialOrd for Move {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Move {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}

/// Reasons a move is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("row and column must be integers")]
    NotANumber,
    #[error("row and column must be between 1 and 6")]
    OutOfRange,
    #[error("cell is already occupied or locked")]
    Unavailable,
}
