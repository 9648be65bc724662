//! Integer cell coordinates.

use std::fmt;

/// A cell position as `(row, col)`.
///
/// Signed so that neighbour probes one step past the border are
/// representable; bounds checks happen at lookup time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Row index, growing downward.
    pub row: i32,
    /// Column index, growing rightward.
    pub col: i32,
}

impl Coord {
    /// Create a coordinate.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Translate by a `(d_row, d_col)` offset.
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Squared Euclidean distance to `other`.
    pub fn squared_distance(self, other: Coord) -> i64 {
        let dr = i64::from(self.row) - i64::from(other.row);
        let dc = i64::from(self.col) - i64::from(other.col);
        dr * dr + dc * dc
    }

    /// Whether `other` is exactly one orthogonal step away.
    pub fn is_adjacent(self, other: Coord) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}
