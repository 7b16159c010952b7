//! Random playouts (game simulation).
//!
//! A playout plays random legal moves until the game ends, then decides a
//! winner. Territory is not counted: a finished playout is judged by the
//! number of stones each side has on the board, which is a fair proxy once
//! random play has filled everything but single-point eyes.

use std::sync::Arc;

use crate::agent::random_move;
use crate::constants::GAME_LEN_FACTOR;
use crate::game_state::GameState;
use crate::types::Player;

/// Play random moves from `game_state` until two passes, a resignation,
/// or the move limit. Returns the final state.
pub fn play_out(game_state: &Arc<GameState>, rng: &mut fastrand::Rng) -> Arc<GameState> {
    let board = game_state.board();
    let max_moves = GAME_LEN_FACTOR * board.num_rows() * board.num_cols();

    let mut game = Arc::clone(game_state);
    let mut moves = 0;
    while !game.is_over() && moves < max_moves {
        let mv = random_move(&game, rng);
        game = game.apply_move(mv);
        moves += 1;
    }
    game
}

/// Simulate a random game and report who won it.
pub fn simulate_random_game(game_state: &Arc<GameState>, rng: &mut fastrand::Rng) -> Player {
    winner(&play_out(game_state, rng))
}

/// Winner of a (finished) game: the non-resigning side after a
/// resignation, otherwise the side with more stones. Ties go to White,
/// who moved second.
pub fn winner(game_state: &GameState) -> Player {
    if let Some(winner) = game_state.winner_by_resignation() {
        return winner;
    }
    let board = game_state.board();
    if board.stone_count(Player::Black) > board.stone_count(Player::White) {
        Player::Black
    } else {
        Player::White
    }
}

/// Stone difference from the point of view of the player to move.
pub fn capture_diff(game_state: &GameState) -> i64 {
    let board = game_state.board();
    let black = board.stone_count(Player::Black) as i64;
    let white = board.stone_count(Player::White) as i64;
    match game_state.next_player() {
        Player::Black => black - white,
        Player::White => white - black,
    }
}
