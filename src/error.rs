//! Error types for the rules engine.
//!
//! Only recoverable conditions live here. Placing a stone on an occupied or
//! off-grid point is a caller bug and panics instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoError {
    /// An operation was asked to combine incompatible values,
    /// e.g. merging strings of different colors.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A coordinate string could not be parsed.
    #[error("invalid coordinate: {0:?}")]
    InvalidCoordinate(String),

    /// Board dimensions outside `1..=MAX_BOARD_SIZE`.
    #[error("unsupported board size {rows}x{cols}")]
    UnsupportedBoardSize { rows: usize, cols: usize },

    /// A move was rejected by the rules.
    #[error("illegal move: {0}")]
    IllegalMove(String),
}
