//! Multi-source flood fill from every goal cell.
//!
//! [`analyze`] produces an [`AnalysisResult`]: a distance field holding the
//! hop count to the nearest goal and a direction field holding, for every
//! reachable cell, the heading that leads one hop closer. Both are stored
//! per cell so that many actors can query "what do I do here" in O(1).

use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::coord::Coord;
use crate::direction::{self, Direction, Heading};
use crate::error::GridError;
use crate::grid::{CellKind, Grid};

/// Distance sentinel for walls and unreachable cells.
pub const UNREACHABLE: i32 = -1;

/// Distance and direction fields for one grid.
///
/// Immutable once built. Sessions share it behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisResult {
    rows: usize,
    cols: usize,
    distances: Vec<i32>,
    directions: Vec<Direction>,
    reachable: bool,
}

/// Flood-fill `grid` from all of its goal cells.
///
/// Goals seed the queue in row-major order. Each dequeued cell probes its
/// neighbours in [`Heading::ALL`] order and the first discoverer of a cell
/// wins, so the fields are a deterministic function of the grid.
///
/// # Examples
///
/// ```
/// use maze_core::{analyze, Direction, Grid, Heading};
///
/// let grid = Grid::from_rows(&[[1, 0], [-1, 0]]).unwrap();
/// let result = analyze(&grid);
/// assert_eq!(result.distance(1, 1), Some(2));
/// assert_eq!(result.direction(1, 1), Some(Direction::Move(Heading::Up)));
/// assert!(result.reachable());
/// ```
pub fn analyze(grid: &Grid) -> AnalysisResult {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut distances = vec![UNREACHABLE; rows * cols];
    let mut directions: Vec<Direction> = grid
        .cells()
        .iter()
        .map(|&code| match CellKind::of(code) {
            CellKind::Wall => Direction::Wall,
            _ => Direction::Unreachable,
        })
        .collect();

    let mut queue: VecDeque<(Coord, i32)> = VecDeque::new();
    for goal in grid.goals() {
        let i = goal.row as usize * cols + goal.col as usize;
        distances[i] = 0;
        directions[i] = Direction::Goal;
        queue.push_back((goal, 0));
    }

    while let Some((at, dist)) = queue.pop_front() {
        for (probe, n) in direction::neighbours(at, rows, cols) {
            let i = n.row as usize * cols + n.col as usize;
            if directions[i] != Direction::Unreachable {
                continue;
            }
            distances[i] = dist + 1;
            directions[i] = Direction::Move(probe.reverse());
            queue.push_back((n, dist + 1));
        }
    }

    let reachable = !directions.contains(&Direction::Unreachable);
    AnalysisResult {
        rows,
        cols,
        distances,
        directions,
        reachable,
    }
}

/// Validate raw rows and analyze them.
pub fn analyze_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<AnalysisResult, GridError> {
    Ok(analyze(&Grid::from_rows(rows)?))
}

/// Parse the text grid format and analyze it.
pub fn analyze_text(text: &str) -> Result<AnalysisResult, GridError> {
    Ok(analyze(&text.parse::<Grid>()?))
}

impl AnalysisResult {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True iff every free cell has a route to some goal.
    pub fn reachable(&self) -> bool {
        self.reachable
    }

    /// Whether `(row, col)` lies inside the analysed grid.
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        self.contains(row, col)
            .then(|| row as usize * self.cols + col as usize)
    }

    /// Hop count to the nearest goal, [`UNREACHABLE`] for walls and cut-off
    /// cells, `None` outside the grid.
    pub fn distance(&self, row: i32, col: i32) -> Option<i32> {
        self.index(row, col).map(|i| self.distances[i])
    }

    /// Direction entry, `None` outside the grid.
    pub fn direction(&self, row: i32, col: i32) -> Option<Direction> {
        self.index(row, col).map(|i| self.directions[i])
    }

    /// Distance at `at`, or `None` unless it is in bounds and reachable.
    pub fn reachable_distance(&self, at: Coord) -> Option<i32> {
        self.distance(at.row, at.col).filter(|&d| d >= 0)
    }

    /// Row-major distance field.
    pub fn distances(&self) -> &[i32] {
        &self.distances
    }

    /// Row-major direction field.
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// In-bounds orthogonal neighbours of `at` in discovery order.
    pub fn neighbours(&self, at: Coord) -> SmallVec<[(Heading, Coord); 4]> {
        direction::neighbours(at, self.rows, self.cols)
    }

    /// Every reachable cell (distance >= 0) in row-major order.
    pub fn reachable_cells(&self) -> impl Iterator<Item = (Coord, i32)> + '_ {
        let cols = self.cols;
        self.distances
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d >= 0)
            .map(move |(i, &d)| (Coord::new((i / cols) as i32, (i % cols) as i32), d))
    }

    /// Text map of the direction field, one line per row.
    ///
    /// ```
    /// use maze_core::analyze_rows;
    ///
    /// let result = analyze_rows(&[[1, 0, -1], [0, -1, 0]]).unwrap();
    /// assert_eq!(result.render(), "X<#\n^# \n");
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in self.directions.chunks(self.cols) {
            out.extend(row.iter().map(|d| d.symbol()));
            out.push('\n');
        }
        out
    }
}
