//! Error types for grid construction and path queries.

use std::error::Error;
use std::fmt;

/// Errors from building a [`Grid`](crate::Grid) out of raw input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The input has zero rows or zero columns.
    Empty,
    /// A row's length differs from the first row's.
    Ragged {
        /// Zero-based index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A token is not an integer cell code.
    InvalidToken {
        /// One-based line number in the source text.
        line: usize,
        /// One-based cell position within the line.
        column: usize,
        /// The offending token.
        token: String,
    },
    /// A dimension does not fit in `i32` coordinates.
    TooLarge {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },
    /// A cell write addressed a coordinate outside the grid.
    OutOfBounds {
        /// Requested row.
        row: i32,
        /// Requested column.
        col: i32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid has zero rows or zero columns"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            Self::InvalidToken {
                line,
                column,
                token,
            } => write!(f, "line {line}, cell {column}: '{token}' is not an integer"),
            Self::TooLarge { rows, cols } => {
                write!(f, "grid {rows}x{cols} exceeds i32 coordinate range")
            }
            Self::OutOfBounds { row, col } => write!(f, "cell ({row}, {col}) is outside the grid"),
        }
    }
}

impl Error for GridError {}

/// No route exists from the requested cell to any goal.
///
/// Returned by [`AnalysisResult::path`](crate::AnalysisResult::path) for
/// walls, unreachable cells and coordinates outside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoPathExists {
    /// Requested row.
    pub row: i32,
    /// Requested column.
    pub col: i32,
}

impl fmt::Display for NoPathExists {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no path from ({}, {}) to a goal", self.row, self.col)
    }
}

impl Error for NoPathExists {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_location() {
        let e = GridError::InvalidToken {
            line: 3,
            column: 2,
            token: "x".into(),
        };
        assert_eq!(e.to_string(), "line 3, cell 2: 'x' is not an integer");
        assert_eq!(
            NoPathExists { row: 1, col: 4 }.to_string(),
            "no path from (1, 4) to a goal"
        );
    }
}
