//! Lightweight board for deep recursive search

use super::{Board, Cell, Move, BOARD_SIZE, TOTAL_CELLS};

/// Bitmask of all 36 board cells
const FULL: u64 = (1u64 << TOTAL_CELLS) - 1;

/// Occupancy-only board used inside the search tree.
///
/// The search does not care which player marked a cell, only whether it can
/// still be played - turn parity is tracked by the recursion, not the board.
/// Dropping player identity lets the whole grid fit in a single `u64`
/// (36 bits), so cloning a branch costs one word copy plus the move list.
///
/// Every recursive branch clones its own copy before mutating; siblings never
/// observe each other's moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBoard {
    occupied: u64,
    moves: Vec<Move>,
}

impl SearchBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn bit(mv: Move) -> u64 {
        1u64 << mv.to_index()
    }

    /// True iff the cell is empty. No bounds check - the enumeration loop
    /// only ever asks about cells inside the board.
    #[inline]
    #[must_use]
    pub fn is_move_valid(&self, mv: Move) -> bool {
        self.occupied & Self::bit(mv) == 0
    }

    /// Occupy the move's cell and its clipped 3x3 neighborhood, and append
    /// the move to the history. Same locking rule as [`Board::apply_move`].
    pub fn apply_move(&mut self, mv: Move) {
        let row = mv.row as usize - 1;
        let col = mv.col as usize - 1;
        for r in row.saturating_sub(1)..=(row + 1).min(BOARD_SIZE - 1) {
            for c in col.saturating_sub(1)..=(col + 1).min(BOARD_SIZE - 1) {
                self.occupied |= 1u64 << (r * BOARD_SIZE + c);
            }
        }
        self.moves.push(mv);
    }

    /// True when every cell is occupied
    #[inline]
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.occupied == FULL
    }

    /// Count of empty cells
    #[inline]
    #[must_use]
    pub fn available_moves(&self) -> u32 {
        TOTAL_CELLS as u32 - self.occupied.count_ones()
    }

    /// Moves made so far, in play order
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }
}

impl From<&Board> for SearchBoard {
    /// Project a full board down to occupancy: marked and locked cells all
    /// become plain occupied bits. The move history is carried over for
    /// cache-key construction.
    fn from(board: &Board) -> Self {
        let mut occupied = 0u64;
        let grid = board.grid();
        for (r, row) in grid.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                if cell != Cell::Empty {
                    occupied |= 1u64 << (r * BOARD_SIZE + c);
                }
            }
        }
        Self {
            occupied,
            moves: board.moves().to_vec(),
        }
    }
}
