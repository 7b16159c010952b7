//! Human-readable coordinates.
//!
//! Columns are letters A-T skipping 'I' (Go convention to avoid confusion
//! with 'J'); rows are numbered from 1 at the bottom. "D4" is row 4,
//! column 4.

use crate::constants::COLS;
use crate::error::GoError;
use crate::moves::Move;
use crate::types::Point;

/// Parse a coordinate string such as "D4" or "q16" into a Point.
///
/// Only checks the syntax; whether the point is on a given board is up to
/// the caller.
pub fn parse_point(s: &str) -> Result<Point, GoError> {
    let invalid = || GoError::InvalidCoordinate(s.to_string());

    let mut chars = s.trim().chars();
    let col_char = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
    let col = COLS.find(col_char).ok_or_else(invalid)? as i32 + 1;

    let row_str = chars.as_str();
    if row_str.is_empty() || !row_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let row: i32 = row_str.parse().map_err(|_| invalid())?;
    if row < 1 {
        return Err(invalid());
    }

    Ok(Point::new(row, col))
}

/// Convert a Point to a coordinate string (e.g., "D4").
///
/// Points left of column A or right of column T fall back to "(row,col)".
pub fn format_point(point: Point) -> String {
    let letter = usize::try_from(point.col - 1)
        .ok()
        .and_then(|i| COLS.chars().nth(i));
    match letter {
        Some(c) => format!("{c}{}", point.row),
        None => format!("({},{})", point.row, point.col),
    }
}

/// Parse "pass", "resign", or a coordinate into a Move.
pub fn parse_move(s: &str) -> Result<Move, GoError> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("pass") {
        Ok(Move::pass_turn())
    } else if s.eq_ignore_ascii_case("resign") {
        Ok(Move::resign())
    } else {
        parse_point(s).map(Move::play)
    }
}
