//! Zobrist hashing for position identity.
//!
//! Each `(point, player)` pair on the largest supported board gets its own
//! random 64-bit code. A board's hash is the XOR of the codes of all stones
//! on it, so placing or removing a stone updates the hash in O(1).
//!
//! The table is generated lazily, once per process, from a fixed seed.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::constants::{EMPTY_BOARD_HASH, MAX_BOARD_SIZE, ZOBRIST_SEED};
use crate::types::{Player, Point};

static TABLE: Lazy<ZobristTable> = Lazy::new(|| ZobristTable::generate(ZOBRIST_SEED));

struct ZobristTable {
    /// `codes[point_index][player_index]`
    codes: Vec<[u64; 2]>,
}

impl ZobristTable {
    /// Draw one code per slot, rejecting duplicates and the empty-board code.
    fn generate(seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut seen = HashSet::with_capacity(2 * MAX_BOARD_SIZE * MAX_BOARD_SIZE + 1);
        seen.insert(EMPTY_BOARD_HASH);

        let mut next_code = || loop {
            let code = rng.u64(..);
            if seen.insert(code) {
                break code;
            }
        };

        let codes = (0..MAX_BOARD_SIZE * MAX_BOARD_SIZE)
            .map(|_| [next_code(), next_code()])
            .collect();
        ZobristTable { codes }
    }
}

fn slot(point: Point) -> usize {
    let max = MAX_BOARD_SIZE as i32;
    assert!(
        (1..=max).contains(&point.row) && (1..=max).contains(&point.col),
        "point {point:?} is outside the {MAX_BOARD_SIZE}x{MAX_BOARD_SIZE} hash table"
    );
    ((point.row - 1) * max + (point.col - 1)) as usize
}

/// The code for a `player` stone at `point`.
///
/// # Panics
/// If `point` lies outside the largest supported board.
#[inline]
pub fn code_for(point: Point, player: Player) -> u64 {
    TABLE.codes[slot(point)][player.index()]
}

/// The hash of a board with no stones.
#[inline]
pub fn empty_board_code() -> u64 {
    EMPTY_BOARD_HASH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_unique() {
        let mut set = HashSet::new();
        assert!(set.insert(empty_board_code()));
        for row in 1..=MAX_BOARD_SIZE as i32 {
            for col in 1..=MAX_BOARD_SIZE as i32 {
                for player in [Player::Black, Player::White] {
                    let code = code_for(Point::new(row, col), player);
                    assert!(set.insert(code), "duplicate code at ({row}, {col})");
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let a = ZobristTable::generate(ZOBRIST_SEED);
        let b = ZobristTable::generate(ZOBRIST_SEED);
        assert_eq!(a.codes, b.codes);
        assert_eq!(a.codes, TABLE.codes);
    }

    #[test]
    #[should_panic]
    fn test_off_table_point_panics() {
        code_for(Point::new(0, 1), Player::Black);
    }
}
