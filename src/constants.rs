//! Constants for board limits, hashing, and agent parameters.
//!
//! Board dimensions are chosen at runtime, but never exceed
//! [`MAX_BOARD_SIZE`] in either direction: the Zobrist table is generated
//! once for the largest supported board.

// =============================================================================
// Board Geometry
// =============================================================================

/// Largest supported number of rows or columns.
pub const MAX_BOARD_SIZE: usize = 19;

/// Board size used when none is given on the command line.
pub const DEFAULT_BOARD_SIZE: usize = 9;

/// Column labels, skipping 'I' to avoid confusion with 'J'.
pub const COLS: &str = "ABCDEFGHJKLMNOPQRST";

/// Maximum game length, as a multiple of the board area.
///
/// Random play can recapture for a long time; playouts and self-play stop
/// after `GAME_LEN_FACTOR * rows * cols` moves.
pub const GAME_LEN_FACTOR: usize = 3;

// =============================================================================
// Zobrist Hashing
// =============================================================================

/// Seed for the process-wide Zobrist table. Fixed so that hashes are
/// reproducible between runs.
pub const ZOBRIST_SEED: u64 = 0x5EED_0F60_BA11_C0DE;

/// Hash of the empty board.
pub const EMPTY_BOARD_HASH: u64 = 0;

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Default number of search rounds per move.
pub const N_ROUNDS: usize = 500;

/// Default UCT exploration temperature.
pub const TEMPERATURE: f64 = 1.4;

/// Win fraction below which the search agent resigns.
pub const RESIGN_THRES: f64 = 0.05;

/// Minimum root rollouts before the search agent may resign.
pub const RESIGN_MIN_ROLLOUTS: u32 = 100;
