//! Rectangular grid of integer cell codes.
//!
//! Cell convention: negative is a wall, `0` is free floor, `1` is a goal and
//! any value above `1` is a start marker whose value tags the actor kind.
//! The text form is one row per line with cells separated by commas or
//! whitespace.

use std::fmt;
use std::str::FromStr;

use crate::coord::Coord;
use crate::error::GridError;

/// Classification of a single cell code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// Impassable (negative code).
    Wall,
    /// Free floor (`0`).
    Free,
    /// Goal (`1`).
    Goal,
    /// Free floor carrying a start marker; the payload is the kind tag.
    Start(i32),
}

impl CellKind {
    /// Classify a raw cell code.
    pub const fn of(code: i32) -> Self {
        match code {
            c if c < 0 => CellKind::Wall,
            0 => CellKind::Free,
            1 => CellKind::Goal,
            c => CellKind::Start(c),
        }
    }

    /// Whether an actor may stand on this cell.
    pub const fn is_passable(self) -> bool {
        !matches!(self, CellKind::Wall)
    }
}

/// A start marker found in a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartMarker {
    /// Where the marker sits.
    pub at: Coord,
    /// The marker's cell code, used as the actor kind tag.
    pub kind: i32,
}

/// A rectangular, row-major grid of cell codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<i32>,
}

impl Grid {
    /// Maximum size of either dimension: coordinates are `i32`.
    pub const MAX_DIM: usize = i32::MAX as usize;

    /// Create a grid of free cells.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::check_shape(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        })
    }

    /// Build a grid from row-major cells.
    ///
    /// Returns `Err(GridError::Ragged)` if `cells.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, cells: Vec<i32>) -> Result<Self, GridError> {
        Self::check_shape(rows, cols)?;
        if cells.len() != rows * cols {
            return Err(GridError::Ragged {
                row: cells.len() / cols,
                expected: cols,
                found: cells.len() % cols,
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Build a grid from a slice of rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use maze_core::Grid;
    ///
    /// let grid = Grid::from_rows(&[[1, 0], [-1, 0]]).unwrap();
    /// assert_eq!(grid.rows(), 2);
    /// assert_eq!(grid.get(1, 0), Some(-1));
    /// ```
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, GridError> {
        let expected = rows.first().map_or(0, |r| r.as_ref().len());
        let mut cells = Vec::with_capacity(rows.len() * expected);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != expected {
                return Err(GridError::Ragged {
                    row: i,
                    expected,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Self::check_shape(rows.len(), expected)?;
        Ok(Self {
            rows: rows.len(),
            cols: expected,
            cells,
        })
    }

    /// Build a single-row grid from a flat sequence of cells.
    pub fn from_flat(cells: &[i32]) -> Result<Self, GridError> {
        Self::from_rows(&[cells])
    }

    fn check_shape(rows: usize, cols: usize) -> Result<(), GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        if rows > Self::MAX_DIM || cols > Self::MAX_DIM || rows.checked_mul(cols).is_none() {
            return Err(GridError::TooLarge { rows, cols });
        }
        Ok(())
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major cell codes.
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// Whether `(row, col)` lies inside the grid.
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    pub(crate) fn index(&self, at: Coord) -> Option<usize> {
        self.contains(at.row, at.col)
            .then(|| at.row as usize * self.cols + at.col as usize)
    }

    /// Cell code at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: i32, col: i32) -> Option<i32> {
        self.index(Coord::new(row, col)).map(|i| self.cells[i])
    }

    /// Classification of the cell at `(row, col)`, or `None` outside the grid.
    pub fn kind(&self, row: i32, col: i32) -> Option<CellKind> {
        self.get(row, col).map(CellKind::of)
    }

    /// Overwrite one cell.
    pub fn set(&mut self, row: i32, col: i32, code: i32) -> Result<(), GridError> {
        let i = self
            .index(Coord::new(row, col))
            .ok_or(GridError::OutOfBounds { row, col })?;
        self.cells[i] = code;
        Ok(())
    }

    /// Every cell coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| Coord::new(r as i32, c as i32)))
    }

    /// Goal cells in row-major order.
    pub fn goals(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords()
            .zip(self.cells.iter())
            .filter(|&(_, &code)| CellKind::of(code) == CellKind::Goal)
            .map(|(at, _)| at)
    }

    /// Start markers in row-major order.
    pub fn start_markers(&self) -> Vec<StartMarker> {
        self.coords()
            .zip(self.cells.iter())
            .filter_map(|(at, &code)| match CellKind::of(code) {
                CellKind::Start(kind) => Some(StartMarker { at, kind }),
                _ => None,
            })
            .collect()
    }
}

/// Parse one cell token. Integral floats such as `1.0` or `-1e0` are
/// accepted since numeric matrix writers commonly emit them.
fn parse_cell(token: &str) -> Option<i32> {
    if let Ok(v) = token.parse::<i32>() {
        return Some(v);
    }
    let v = token.parse::<f64>().ok()?;
    if v.is_finite() && v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) {
        Some(v as i32)
    } else {
        None
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<i32>> = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let tokens: Vec<&str> = if line.contains(',') {
                line.split(',').map(str::trim).collect()
            } else {
                line.split_whitespace().collect()
            };
            let mut row = Vec::with_capacity(tokens.len());
            for (i, token) in tokens.into_iter().enumerate() {
                let cell = parse_cell(token).ok_or_else(|| GridError::InvalidToken {
                    line: line_no + 1,
                    column: i + 1,
                    token: token.to_string(),
                })?;
                row.push(cell);
            }
            rows.push(row);
        }
        Grid::from_rows(&rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
