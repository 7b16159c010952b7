//! Move-selection agents.
//!
//! Agents only talk to the engine through [`GameState`]: they look at the
//! position, and return a [`Move`] that the driver validates and applies.

use std::sync::Arc;

use crate::board::Board;
use crate::game_state::GameState;
use crate::moves::Move;
use crate::types::{Player, Point};

/// Anything that can pick a move for the player to move.
pub trait Agent {
    fn select_move(&mut self, game_state: &Arc<GameState>) -> Move;
}

/// Check if `point` is an eye of `color`.
///
/// All on-grid orthogonal neighbors must be `color` stones. In the middle of
/// the board at least 3 of the 4 diagonals must be friendly; on the edge or
/// in a corner every on-grid diagonal must be.
pub fn is_point_an_eye(board: &Board, point: Point, color: Player) -> bool {
    if board.get(point).is_some() {
        return false;
    }
    let surrounded = point
        .neighbors()
        .into_iter()
        .filter(|&n| board.is_on_grid(n))
        .all(|n| board.get(n) == Some(color));
    if !surrounded {
        return false;
    }

    let mut friendly_corners = 0;
    let mut off_board_corners = 0;
    for corner in point.diagonals() {
        if !board.is_on_grid(corner) {
            off_board_corners += 1;
        } else if board.get(corner) == Some(color) {
            friendly_corners += 1;
        }
    }

    if off_board_corners > 0 {
        off_board_corners + friendly_corners == 4
    } else {
        friendly_corners >= 3
    }
}

/// Pick a uniformly random legal play that does not fill one of our own
/// eyes, or pass when there is none.
///
/// Candidates are shuffled and tried in order until one is legal, so only
/// as many legality probes are made as needed.
pub fn random_move(game_state: &GameState, rng: &mut fastrand::Rng) -> Move {
    let board = game_state.board();
    let player = game_state.next_player();
    let mut candidates: Vec<Point> = board
        .points()
        .filter(|&p| board.get(p).is_none() && !is_point_an_eye(board, p, player))
        .collect();
    rng.shuffle(&mut candidates);

    candidates
        .into_iter()
        .map(Move::play)
        .find(|&mv| game_state.is_valid_move(mv))
        .unwrap_or(Move::pass_turn())
}

/// Plays random legal moves, never filling its own eyes.
pub struct RandomBot {
    rng: fastrand::Rng,
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomBot {
    pub fn new() -> Self {
        RandomBot {
            rng: fastrand::Rng::new(),
        }
    }

    /// A bot with a reproducible move sequence.
    pub fn with_seed(seed: u64) -> Self {
        RandomBot {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Agent for RandomBot {
    fn select_move(&mut self, game_state: &Arc<GameState>) -> Move {
        random_move(game_state, &mut self.rng)
    }
}
