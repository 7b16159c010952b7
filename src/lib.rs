//! Goban: a Go rules engine with a persistent game-state history.
//!
//! The engine tracks connected groups of stones and their liberties,
//! resolves captures, and decides move legality (self-capture and
//! positional superko). Every move produces a new immutable [`GameState`]
//! that points back at its predecessor, so agents can explore hypothetical
//! continuations without disturbing the real game.
//!
//! ## Modules
//!
//! - [`constants`] - Board limits and engine parameters
//! - [`types`] - Points and players
//! - [`zobrist`] - Position fingerprints
//! - [`go_string`] - Connected groups with their liberties
//! - [`board`] - Stone placement and capture
//! - [`moves`] - Play, pass and resign
//! - [`game_state`] - Move legality and the game history chain
//! - [`coords`] - Human-readable coordinates ("D4")
//! - [`error`] - Recoverable errors
//! - [`agent`] - Move-selection agents and the random bot
//! - [`playout`] - Random game simulation
//! - [`mcts`] - Monte Carlo Tree Search agent
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use goban::game_state::GameState;
//! use goban::moves::Move;
//! use goban::types::{Player, Point};
//!
//! let game = GameState::new_game(9);
//! let game = game.apply_move(Move::play(Point::new(3, 3)));
//! assert_eq!(game.board().get(Point::new(3, 3)), Some(Player::Black));
//! assert_eq!(game.next_player(), Player::White);
//! ```

pub mod agent;
pub mod board;
pub mod constants;
pub mod coords;
pub mod error;
pub mod game_state;
pub mod go_string;
pub mod gtp;
pub mod mcts;
pub mod moves;
pub mod playout;
pub mod types;
pub mod zobrist;

pub use error::GoError;
pub use game_state::GameState;
