//! Connected groups of stones ("strings") and their liberties.
//!
//! A [`GoString`] is an immutable value: every liberty change or merge
//! returns a new string, and the board rebinds each stone of the new string
//! to it. This keeps board snapshots cheap to share between game states.

use std::collections::HashSet;

use crate::error::GoError;
use crate::types::{Player, Point};

/// A maximal connected set of same-colored stones plus its liberties.
///
/// Invariant: `liberties` and `stones` are disjoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoString {
    color: Player,
    stones: HashSet<Point>,
    liberties: HashSet<Point>,
}

impl GoString {
    pub fn new(
        color: Player,
        stones: impl IntoIterator<Item = Point>,
        liberties: impl IntoIterator<Item = Point>,
    ) -> Self {
        GoString {
            color,
            stones: stones.into_iter().collect(),
            liberties: liberties.into_iter().collect(),
        }
    }

    #[inline]
    pub fn color(&self) -> Player {
        self.color
    }

    #[inline]
    pub fn stones(&self) -> &HashSet<Point> {
        &self.stones
    }

    #[inline]
    pub fn liberties(&self) -> &HashSet<Point> {
        &self.liberties
    }

    /// Number of liberties. Zero means the string is captured.
    #[inline]
    pub fn num_liberties(&self) -> usize {
        self.liberties.len()
    }

    /// A copy of this string without `point` as a liberty.
    /// Removing a point that is not a liberty is a no-op.
    pub fn without_liberty(&self, point: Point) -> GoString {
        let mut liberties = self.liberties.clone();
        liberties.remove(&point);
        GoString {
            color: self.color,
            stones: self.stones.clone(),
            liberties,
        }
    }

    /// A copy of this string with `point` added as a liberty.
    pub fn with_liberty(&self, point: Point) -> GoString {
        let mut liberties = self.liberties.clone();
        liberties.insert(point);
        GoString {
            color: self.color,
            stones: self.stones.clone(),
            liberties,
        }
    }

    /// Combine two strings of the same color into one.
    ///
    /// Liberties of either string that are stones of the other are dropped.
    ///
    /// # Errors
    /// [`GoError::InvalidOperation`] if the colors differ.
    pub fn merge_with(&self, other: &GoString) -> Result<GoString, GoError> {
        if self.color != other.color {
            return Err(GoError::InvalidOperation(format!(
                "cannot merge a {} string with a {} string",
                self.color, other.color
            )));
        }
        Ok(self.merged(other))
    }

    /// Merge without the color check; callers guarantee matching colors.
    pub(crate) fn merged(&self, other: &GoString) -> GoString {
        debug_assert_eq!(self.color, other.color);
        let stones: HashSet<Point> = self.stones.union(&other.stones).copied().collect();
        let liberties = self
            .liberties
            .union(&other.liberties)
            .filter(|p| !stones.contains(p))
            .copied()
            .collect();
        GoString {
            color: self.color,
            stones,
            liberties,
        }
    }
}
