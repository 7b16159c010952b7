//! Moves: placing a stone, passing, or resigning.

use std::fmt;

use crate::coords::format_point;
use crate::types::{Player, Point};

/// Exactly one of play-at-point, pass, or resign.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Play(Point),
    Pass,
    Resign,
}

impl Move {
    pub fn play(point: Point) -> Self {
        Move::Play(point)
    }

    pub fn pass_turn() -> Self {
        Move::Pass
    }

    pub fn resign() -> Self {
        Move::Resign
    }

    #[inline]
    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    #[inline]
    pub fn is_resign(&self) -> bool {
        matches!(self, Move::Resign)
    }

    /// The target point of a play, `None` for pass and resign.
    #[inline]
    pub fn point(&self) -> Option<Point> {
        match self {
            Move::Play(point) => Some(*point),
            Move::Pass | Move::Resign => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Play(point) => write!(f, "{}", format_point(*point)),
            Move::Pass => write!(f, "pass"),
            Move::Resign => write!(f, "resign"),
        }
    }
}

/// Describe a move for the game log, e.g. "Black plays D4".
pub fn format_move(player: Player, mv: Move) -> String {
    match mv {
        Move::Play(point) => format!("{player} plays {}", format_point(point)),
        Move::Pass => format!("{player} passes"),
        Move::Resign => format!("{player} resigns"),
    }
}
