//! Points and players.

use std::fmt;

/// One of the two players. Black moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// The opponent of this player.
    #[inline]
    pub fn other(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Dense index (Black = 0, White = 1) for per-player tables.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "Black"),
            Player::White => write!(f, "White"),
        }
    }
}

/// A board coordinate. Rows and columns start at 1; row 1 is the bottom
/// row when rendered.
///
/// A `Point` is not tied to any board, so it may lie off the grid.
/// Whether it is on the grid is decided by [`crate::board::Board::is_on_grid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    pub const fn new(row: i32, col: i32) -> Self {
        Point { row, col }
    }

    /// The 4 orthogonal neighbors (up, down, left, right), without any
    /// bounds filtering.
    #[inline]
    pub fn neighbors(self) -> [Point; 4] {
        [
            Point::new(self.row - 1, self.col),
            Point::new(self.row + 1, self.col),
            Point::new(self.row, self.col - 1),
            Point::new(self.row, self.col + 1),
        ]
    }

    /// The 4 diagonal neighbors, without any bounds filtering.
    #[inline]
    pub fn diagonals(self) -> [Point; 4] {
        [
            Point::new(self.row - 1, self.col - 1),
            Point::new(self.row - 1, self.col + 1),
            Point::new(self.row + 1, self.col - 1),
            Point::new(self.row + 1, self.col + 1),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other() {
        assert_eq!(Player::Black.other(), Player::White);
        assert_eq!(Player::White.other(), Player::Black);
        assert_eq!(Player::Black.other().other(), Player::Black);
    }

    #[test]
    fn test_neighbors_are_orthogonal() {
        let p = Point::new(3, 3);
        let n = p.neighbors();
        assert_eq!(n.len(), 4);
        for q in n {
            let dist = (q.row - p.row).abs() + (q.col - p.col).abs();
            assert_eq!(dist, 1, "{q:?} is not adjacent to {p:?}");
        }
    }

    #[test]
    fn test_neighbors_not_filtered() {
        // The corner still yields off-grid neighbors; the board filters them.
        let n = Point::new(1, 1).neighbors();
        assert!(n.contains(&Point::new(0, 1)));
        assert!(n.contains(&Point::new(1, 0)));
    }
}
