//! Error types for the Hex engine

use crate::board::Cell;
use std::fmt;

/// Why a placement was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidMoveReason {
    /// Row or column is not in `[0, size)`
    OutOfBounds { size: usize },
    /// Target cell already holds a stone
    Occupied(Cell),
}

impl fmt::Display for InvalidMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMoveReason::OutOfBounds { size } => {
                write!(f, "outside a {}x{} board", size, size)
            }
            InvalidMoveReason::Occupied(cell) => write!(f, "cell already holds {:?}", cell),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("Invalid move ({row}, {col}): {reason}")]
    InvalidMove {
        row: usize,
        col: usize,
        reason: InvalidMoveReason,
    },

    #[error("No legal moves remain")]
    NoLegalMoves,

    #[error("Board size must be at least 2, got {0}")]
    BoardTooSmall(usize),

    #[error("Invalid board description: {0}")]
    InvalidBoard(String),
}
