//! The Go board: stone placement, string merging and capture.
//!
//! Every occupied point refers to the [`GoString`] that contains it. Strings
//! are shared through `Arc`, so all stones of one string point at the same
//! value and cloning a board only clones the grid of pointers.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::constants::{COLS, MAX_BOARD_SIZE};
use crate::error::GoError;
use crate::go_string::GoString;
use crate::types::{Player, Point};
use crate::zobrist;

#[derive(Clone, Debug)]
pub struct Board {
    num_rows: usize,
    num_cols: usize,
    /// Row-major, `(row - 1) * num_cols + (col - 1)`.
    grid: Vec<Option<Arc<GoString>>>,
    hash: u64,
}

impl Board {
    /// Create an empty board.
    ///
    /// # Panics
    /// If either dimension is zero or larger than [`MAX_BOARD_SIZE`].
    /// Use [`Board::check_size`] to validate untrusted input first.
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        if let Err(e) = Self::check_size(num_rows, num_cols) {
            panic!("{e}");
        }
        Board {
            num_rows,
            num_cols,
            grid: vec![None; num_rows * num_cols],
            hash: zobrist::empty_board_code(),
        }
    }

    /// Check that a board of this size is supported.
    pub fn check_size(num_rows: usize, num_cols: usize) -> Result<(), GoError> {
        let supported = 1..=MAX_BOARD_SIZE;
        if supported.contains(&num_rows) && supported.contains(&num_cols) {
            Ok(())
        } else {
            Err(GoError::UnsupportedBoardSize {
                rows: num_rows,
                cols: num_cols,
            })
        }
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[inline]
    pub fn is_on_grid(&self, point: Point) -> bool {
        1 <= point.row
            && point.row <= self.num_rows as i32
            && 1 <= point.col
            && point.col <= self.num_cols as i32
    }

    #[inline]
    fn index(&self, point: Point) -> usize {
        debug_assert!(self.is_on_grid(point));
        (point.row - 1) as usize * self.num_cols + (point.col - 1) as usize
    }

    fn string_at(&self, point: Point) -> Option<&Arc<GoString>> {
        if !self.is_on_grid(point) {
            return None;
        }
        self.grid[self.index(point)].as_ref()
    }

    /// Color of the stone at `point`, or `None` if empty or off the grid.
    pub fn get(&self, point: Point) -> Option<Player> {
        self.string_at(point).map(|s| s.color())
    }

    /// The whole string occupying `point`, if any.
    pub fn get_go_string(&self, point: Point) -> Option<&GoString> {
        self.string_at(point).map(|s| s.as_ref())
    }

    /// Current Zobrist hash of the stones on the board.
    #[inline]
    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    /// All points of the grid, bottom row first.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let cols = self.num_cols as i32;
        (1..=self.num_rows as i32)
            .flat_map(move |row| (1..=cols).map(move |col| Point::new(row, col)))
    }

    /// Number of `player` stones on the board.
    pub fn stone_count(&self, player: Player) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|s| s.color() == player)
            .count()
    }

    /// Place a `player` stone at `point`, merging it with adjacent friendly
    /// strings and capturing any opposing string left without liberties.
    ///
    /// This does not check ko or self-capture; see
    /// [`crate::game_state::GameState::is_valid_move`].
    ///
    /// # Panics
    /// If `point` is off the grid or already occupied.
    pub fn place_stone(&mut self, player: Player, point: Point) {
        assert!(self.is_on_grid(point), "point {point:?} is off the grid");
        assert!(
            self.get(point).is_none(),
            "point {point:?} is already occupied"
        );

        let mut adjacent_same_color: Vec<Arc<GoString>> = Vec::new();
        let mut adjacent_opposite_color: Vec<Arc<GoString>> = Vec::new();
        let mut liberties = Vec::new();

        for neighbor in point.neighbors() {
            if !self.is_on_grid(neighbor) {
                continue;
            }
            match self.string_at(neighbor) {
                None => liberties.push(neighbor),
                Some(string) => {
                    let bucket = if string.color() == player {
                        &mut adjacent_same_color
                    } else {
                        &mut adjacent_opposite_color
                    };
                    if !bucket.iter().any(|s| Arc::ptr_eq(s, string)) {
                        bucket.push(Arc::clone(string));
                    }
                }
            }
        }

        let new_string = adjacent_same_color
            .iter()
            .fold(GoString::new(player, [point], liberties), |acc, s| {
                acc.merged(s)
            });
        self.replace_string(Arc::new(new_string));
        self.hash ^= zobrist::code_for(point, player);
        trace!(?player, ?point, merged = adjacent_same_color.len(), "placed stone");

        for other_color_string in adjacent_opposite_color {
            let replacement = other_color_string.without_liberty(point);
            if replacement.num_liberties() > 0 {
                self.replace_string(Arc::new(replacement));
            } else {
                self.remove_string(&other_color_string);
            }
        }
    }

    /// Bind every stone of `string` to it.
    fn replace_string(&mut self, string: Arc<GoString>) {
        for &point in string.stones() {
            let idx = self.index(point);
            self.grid[idx] = Some(Arc::clone(&string));
        }
    }

    /// Take a captured string off the board. Each freed point becomes a
    /// liberty of every other string next to it.
    fn remove_string(&mut self, string: &Arc<GoString>) {
        trace!(
            color = ?string.color(),
            stones = string.stones().len(),
            "capturing string"
        );
        for &point in string.stones() {
            for neighbor in point.neighbors() {
                let Some(neighbor_string) = self.string_at(neighbor) else {
                    continue;
                };
                if !Arc::ptr_eq(neighbor_string, string) {
                    let updated = neighbor_string.with_liberty(point);
                    self.replace_string(Arc::new(updated));
                }
            }
            let idx = self.index(point);
            self.grid[idx] = None;
            self.hash ^= zobrist::code_for(point, string.color());
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=self.num_rows as i32).rev() {
            write!(f, "{row:>2} ")?;
            for col in 1..=self.num_cols as i32 {
                let ch = match self.get(Point::new(row, col)) {
                    Some(Player::Black) => 'x',
                    Some(Player::White) => 'o',
                    None => '.',
                };
                write!(f, " {ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for label in COLS.chars().take(self.num_cols) {
            write!(f, " {label} ")?;
        }
        writeln!(f)
    }
}
