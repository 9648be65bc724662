//! Path reconstruction by walking the direction field.

use crate::analysis::AnalysisResult;
use crate::coord::Coord;
use crate::direction::Direction;
use crate::error::NoPathExists;

impl AnalysisResult {
    /// Cells from `(row, col)` to its nearest goal, both ends included.
    ///
    /// The result has `distance(row, col) + 1` entries, each one orthogonal
    /// step from the previous. Fails before walking anything if the start is
    /// outside the grid, a wall, or cut off from every goal.
    ///
    /// # Examples
    ///
    /// ```
    /// use maze_core::{analyze_rows, Coord};
    ///
    /// let result = analyze_rows(&[[1, 0], [-1, 0]]).unwrap();
    /// let path = result.path(1, 1).unwrap();
    /// assert_eq!(path, vec![Coord::new(1, 1), Coord::new(0, 1), Coord::new(0, 0)]);
    /// assert!(result.path(1, 0).is_err());
    /// ```
    pub fn path(&self, row: i32, col: i32) -> Result<Vec<Coord>, NoPathExists> {
        let fail = NoPathExists { row, col };
        let dist = match self.distance(row, col) {
            Some(d) if d >= 0 => d,
            _ => return Err(fail),
        };

        let mut path = Vec::with_capacity(dist as usize + 1);
        let mut at = Coord::new(row, col);
        // Distance drops by one per step, so a well-formed field reaches a
        // goal within `dist` steps.
        for _ in 0..=dist {
            path.push(at);
            match self.direction(at.row, at.col) {
                Some(Direction::Goal) => return Ok(path),
                Some(Direction::Move(h)) => at = h.step_from(at, 1),
                _ => return Err(fail),
            }
        }
        Err(fail)
    }
}
