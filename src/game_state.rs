//! Game states: move legality and the persistent history chain.
//!
//! A [`GameState`] is never mutated once created. [`GameState::apply_move`]
//! returns a new state that holds an `Arc` to its predecessor, so the whole
//! game is a singly-linked chain rooted at the empty board. Each state also
//! carries the set of every `(player to move, board hash)` situation reached
//! before it, which makes the positional superko check a single set lookup.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::board::Board;
use crate::moves::Move;
use crate::types::{Player, Point};

/// A position identity: whose turn it is, plus the board hash.
pub type Situation = (Player, u64);

/// Which repetitions are forbidden.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum KoRule {
    /// No move may recreate any earlier situation of the game.
    #[default]
    PositionalSuperko,
    /// A move may not recreate the situation from just before the
    /// opponent's last move.
    Simple,
}

/// Board dimensions for a new game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardSize {
    pub rows: usize,
    pub cols: usize,
}

impl From<usize> for BoardSize {
    fn from(size: usize) -> Self {
        BoardSize {
            rows: size,
            cols: size,
        }
    }
}

impl From<(usize, usize)> for BoardSize {
    fn from((rows, cols): (usize, usize)) -> Self {
        BoardSize { rows, cols }
    }
}

#[derive(Debug)]
pub struct GameState {
    /// Shared with the previous state after a pass or resignation;
    /// a play always gets its own copy.
    board: Arc<Board>,
    next_player: Player,
    previous: Option<Arc<GameState>>,
    last_move: Option<Move>,
    previous_situations: HashSet<Situation>,
    ko_rule: KoRule,
    move_number: usize,
}

impl GameState {
    /// Start a game on an empty board with Black to move.
    ///
    /// `size` is either a single `usize` for a square board or a
    /// `(rows, cols)` pair.
    ///
    /// # Panics
    /// If the size is not supported (see [`Board::check_size`]).
    pub fn new_game(size: impl Into<BoardSize>) -> Arc<GameState> {
        Self::new_game_with_rule(size, KoRule::default())
    }

    pub fn new_game_with_rule(size: impl Into<BoardSize>, ko_rule: KoRule) -> Arc<GameState> {
        let size = size.into();
        let board = Board::new(size.rows, size.cols);
        Arc::new(GameState {
            board: Arc::new(board),
            next_player: Player::Black,
            previous: None,
            last_move: None,
            previous_situations: HashSet::new(),
            ko_rule,
            move_number: 0,
        })
    }

    fn from_previous(previous: &Arc<GameState>, board: Arc<Board>, mv: Move) -> GameState {
        let mut previous_situations = previous.previous_situations.clone();
        previous_situations.insert(previous.situation());
        GameState {
            board,
            next_player: previous.next_player.other(),
            previous: Some(Arc::clone(previous)),
            last_move: Some(mv),
            previous_situations,
            ko_rule: previous.ko_rule,
            move_number: previous.move_number + 1,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn next_player(&self) -> Player {
        self.next_player
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    #[inline]
    pub fn previous_state(&self) -> Option<&Arc<GameState>> {
        self.previous.as_ref()
    }

    #[inline]
    pub fn ko_rule(&self) -> KoRule {
        self.ko_rule
    }

    /// Number of moves (including passes) played to reach this state.
    #[inline]
    pub fn move_number(&self) -> usize {
        self.move_number
    }

    /// This state's `(next_player, board hash)` pair.
    #[inline]
    pub fn situation(&self) -> Situation {
        (self.next_player, self.board.zobrist_hash())
    }

    /// Play `mv` for the player to move and return the resulting state.
    ///
    /// No legality check happens here; callers validate with
    /// [`GameState::is_valid_move`] first.
    pub fn apply_move(self: &Arc<Self>, mv: Move) -> Arc<GameState> {
        let board = match mv {
            Move::Play(point) => {
                let mut next_board = Board::clone(&self.board);
                next_board.place_stone(self.next_player, point);
                Arc::new(next_board)
            }
            Move::Pass | Move::Resign => Arc::clone(&self.board),
        };
        trace!(player = ?self.next_player, %mv, move_number = self.move_number + 1, "apply move");
        Arc::new(GameState::from_previous(self, board, mv))
    }

    /// The game ends on a resignation or on two passes in a row.
    pub fn is_over(&self) -> bool {
        let Some(last_move) = self.last_move else {
            return false;
        };
        if last_move.is_resign() {
            return true;
        }
        let second_last_move = self.previous.as_ref().and_then(|s| s.last_move);
        last_move.is_pass() && second_last_move.is_some_and(|mv| mv.is_pass())
    }

    /// The player who did not resign, if the game ended by resignation.
    pub fn winner_by_resignation(&self) -> Option<Player> {
        self.last_move
            .filter(Move::is_resign)
            .map(|_| self.next_player)
    }

    /// Board after `player` plays at `point`, for what-if checks.
    fn probe(&self, player: Player, point: Point) -> Board {
        let mut next_board = Board::clone(&self.board);
        next_board.place_stone(player, point);
        next_board
    }

    /// Would `mv` leave `player`'s own new string with no liberties?
    /// Pass and resign never self-capture.
    pub fn is_move_self_capture(&self, player: Player, mv: Move) -> bool {
        let Move::Play(point) = mv else {
            return false;
        };
        let next_board = self.probe(player, point);
        next_board
            .get_go_string(point)
            .is_none_or(|s| s.num_liberties() == 0)
    }

    /// Would `mv` recreate a forbidden earlier situation?
    /// Pass and resign never violate ko.
    pub fn does_move_violate_ko(&self, player: Player, mv: Move) -> bool {
        let Move::Play(point) = mv else {
            return false;
        };
        let next_board = self.probe(player, point);
        let next_situation = (player.other(), next_board.zobrist_hash());
        match self.ko_rule {
            KoRule::PositionalSuperko => self.previous_situations.contains(&next_situation),
            KoRule::Simple => self
                .previous
                .as_ref()
                .is_some_and(|prev| prev.situation() == next_situation),
        }
    }

    /// Is `mv` legal for the player to move?
    ///
    /// Nothing is legal once the game is over. Pass and resign are always
    /// legal otherwise; a play must target an empty on-grid point, must not
    /// self-capture, and must not violate ko.
    pub fn is_valid_move(&self, mv: Move) -> bool {
        if self.is_over() {
            return false;
        }
        let Some(point) = mv.point() else {
            return true;
        };
        if !self.board.is_on_grid(point) || self.board.get(point).is_some() {
            return false;
        }
        if self.is_move_self_capture(self.next_player, mv) {
            debug!(%mv, player = ?self.next_player, "rejected: self-capture");
            return false;
        }
        if self.does_move_violate_ko(self.next_player, mv) {
            debug!(%mv, player = ?self.next_player, "rejected: ko");
            return false;
        }
        true
    }

    /// Every legal move: plays in board order, then pass and resign.
    /// Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        let mut moves: Vec<Move> = self
            .board
            .points()
            .map(Move::play)
            .filter(|&mv| self.is_valid_move(mv))
            .collect();
        moves.push(Move::pass_turn());
        moves.push(Move::resign());
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, col: i32) -> Point {
        Point::new(row, col)
    }

    fn play_all(mut game: Arc<GameState>, moves: &[Move]) -> Arc<GameState> {
        for &mv in moves {
            assert!(game.is_valid_move(mv), "{mv} should be legal");
            game = game.apply_move(mv);
        }
        game
    }

    #[test]
    fn test_new_game() {
        let game = GameState::new_game(9);
        assert_eq!(game.next_player(), Player::Black);
        assert_eq!(game.board().num_rows(), 9);
        assert_eq!(game.board().num_cols(), 9);
        assert!(game.last_move().is_none());
        assert!(game.previous_state().is_none());
        assert!(!game.is_over());

        let rect = GameState::new_game((5, 7));
        assert_eq!(rect.board().num_rows(), 5);
        assert_eq!(rect.board().num_cols(), 7);
    }

    #[test]
    fn test_apply_move_leaves_previous_untouched() {
        let start = GameState::new_game(5);
        let next = start.apply_move(Move::play(p(3, 3)));
        assert_eq!(start.board().get(p(3, 3)), None);
        assert_eq!(next.board().get(p(3, 3)), Some(Player::Black));
        assert_eq!(next.next_player(), Player::White);
        assert!(Arc::ptr_eq(next.previous_state().unwrap(), &start));
        assert_eq!(next.move_number(), 1);
    }

    #[test]
    fn test_pass_shares_board() {
        let start = GameState::new_game(5);
        let passed = start.apply_move(Move::pass_turn());
        assert!(Arc::ptr_eq(&start.board, &passed.board));
        assert_eq!(passed.next_player(), Player::White);
    }

    #[test]
    fn test_previous_situations_accumulate() {
        let game = play_all(
            GameState::new_game(5),
            &[Move::play(p(1, 1)), Move::play(p(5, 5))],
        );
        assert_eq!(game.previous_situations.len(), 2);
        let root = game.previous_state().unwrap().previous_state().unwrap();
        assert!(game.previous_situations.contains(&root.situation()));
        assert!(!game.previous_situations.contains(&game.situation()));
    }

    #[test]
    fn test_single_pass_does_not_end_game() {
        let game = GameState::new_game(5).apply_move(Move::pass_turn());
        assert!(!game.is_over());
        let game = game.apply_move(Move::play(p(2, 2))).apply_move(Move::pass_turn());
        assert!(!game.is_over());
    }

    #[test]
    fn test_resign_ends_game() {
        let game = GameState::new_game(5).apply_move(Move::resign());
        assert!(game.is_over());
        assert_eq!(game.winner_by_resignation(), Some(Player::White));
        assert!(!game.is_valid_move(Move::pass_turn()));
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_occupied_and_off_grid_invalid() {
        let game = GameState::new_game(5).apply_move(Move::play(p(3, 3)));
        assert!(!game.is_valid_move(Move::play(p(3, 3))));
        assert!(!game.is_valid_move(Move::play(p(0, 3))));
        assert!(!game.is_valid_move(Move::play(p(3, 6))));
        assert!(game.is_valid_move(Move::pass_turn()));
        assert!(game.is_valid_move(Move::resign()));
    }

    #[test]
    fn test_self_capture_in_corner() {
        // Black at B1 and A2; white to play at A1 would have no liberties.
        let game = play_all(
            GameState::new_game(5),
            &[
                Move::play(p(1, 2)),
                Move::play(p(5, 5)),
                Move::play(p(2, 1)),
            ],
        );
        assert_eq!(game.next_player(), Player::White);
        assert!(game.is_move_self_capture(Player::White, Move::play(p(1, 1))));
        assert!(!game.is_valid_move(Move::play(p(1, 1))));
        assert!(!game.is_move_self_capture(Player::White, Move::pass_turn()));
        // Black filling its own eye still has liberties elsewhere.
        assert!(!game.is_move_self_capture(Player::Black, Move::play(p(1, 1))));
    }

    #[test]
    fn test_capturing_move_is_not_self_capture() {
        // White A1 is in atari from B1; black A2 takes its last liberty and
        // would itself have no liberty if the capture did not happen first.
        let game = play_all(
            GameState::new_game(5),
            &[
                Move::play(p(1, 2)),  // B1
                Move::play(p(1, 1)),  // A1
                Move::play(p(5, 5)),
                Move::play(p(3, 1)),  // A3
                Move::play(p(5, 4)),
                Move::play(p(2, 2)),  // B2
            ],
        );
        // Black at A2: neighbours A1 (white, 1 liberty), A3 (white), B2 (white).
        assert!(!game.is_move_self_capture(Player::Black, Move::play(p(2, 1))));
        let after = game.apply_move(Move::play(p(2, 1)));
        assert_eq!(after.board().get(p(1, 1)), None);
        assert_eq!(after.board().get_go_string(p(2, 1)).unwrap().num_liberties(), 1);
    }

    /// Black and white stones set up for a ko at C2/B2 on a 5x5 board:
    ///
    /// ```text
    ///  3  .  x  o  .  .
    ///  2  x  o  .  o  .
    ///  1  .  x  o  .  .
    ///     A  B  C  D  E
    /// ```
    fn ko_setup(rule: KoRule) -> Arc<GameState> {
        play_all(
            GameState::new_game_with_rule(5, rule),
            &[
                Move::play(p(3, 2)), // B3
                Move::play(p(3, 3)), // C3
                Move::play(p(2, 1)), // A2
                Move::play(p(2, 4)), // D2
                Move::play(p(1, 2)), // B1
                Move::play(p(1, 3)), // C1
                Move::pass_turn(),
                Move::play(p(2, 2)), // B2
            ],
        )
    }

    #[test]
    fn test_ko_recapture_forbidden() {
        let game = ko_setup(KoRule::PositionalSuperko);
        // Black takes the ko at C2, capturing B2.
        let game = play_all(game, &[Move::play(p(2, 3))]);
        assert_eq!(game.board().get(p(2, 2)), None);
        // White retaking at B2 would recreate the previous position.
        assert!(game.does_move_violate_ko(Player::White, Move::play(p(2, 2))));
        assert!(!game.is_valid_move(Move::play(p(2, 2))));
        assert!(!game.is_move_self_capture(Player::White, Move::play(p(2, 2))));

        // After a ko threat exchange the retake is allowed again.
        let game = play_all(game, &[Move::play(p(5, 5)), Move::play(p(5, 1))]);
        assert!(game.is_valid_move(Move::play(p(2, 2))));
    }

    #[test]
    fn test_simple_ko_rule() {
        let game = ko_setup(KoRule::Simple);
        let game = play_all(game, &[Move::play(p(2, 3))]);
        assert_eq!(game.ko_rule(), KoRule::Simple);
        assert!(game.does_move_violate_ko(Player::White, Move::play(p(2, 2))));
        assert!(!game.does_move_violate_ko(Player::White, Move::play(p(5, 5))));
    }

    #[test]
    fn test_legal_moves() {
        let game = GameState::new_game(3);
        let moves = game.legal_moves();
        assert_eq!(moves.len(), 9 + 2);
        assert_eq!(moves[9], Move::pass_turn());
        assert_eq!(moves[10], Move::resign());
    }

    #[test]
    fn test_game_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GameState>();
        assert_send_sync::<Board>();
    }
}
