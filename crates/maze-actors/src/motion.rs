//! Animation primitives.
//!
//! Each timed [`Motion`] maps a progress fraction `p` (elapsed / duration)
//! to a position relative to where the motion started. Once `p` passes 1
//! the actor snaps to [`Motion::target`], which is computed exactly rather
//! than accumulated.

use std::time::Duration;

use maze_core::{Coord, Heading};
use rand::Rng;

/// Longest pause between two position updates, in seconds.
const MAX_UPDATE_SECONDS: f64 = 60.0;

/// One animation an actor performs between decisions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Slide one cell.
    Step {
        /// Row offset, -1..=1.
        d_row: i32,
        /// Column offset, -1..=1.
        d_col: i32,
        /// Duration in seconds.
        seconds: f64,
    },
    /// Bounce in place.
    Hop {
        /// Duration in seconds.
        seconds: f64,
    },
    /// Arc two cells over a wall.
    Vault {
        /// Row offset, -2..=2.
        d_row: i32,
        /// Column offset, -2..=2.
        d_col: i32,
        /// Duration in seconds.
        seconds: f64,
    },
    /// Jitter in place.
    Shiver {
        /// Duration in seconds.
        seconds: f64,
    },
    /// Move instantly.
    Relocate {
        /// Destination cell.
        to: Coord,
    },
}

/// Maximum jitter amplitude of a shiver, in cells.
const SHIVER_AMPLITUDE: f64 = 0.25;

impl Motion {
    /// One-cell step along `heading`.
    pub fn step(heading: Heading, seconds: f64) -> Self {
        let (d_row, d_col) = heading.offset();
        Motion::Step {
            d_row,
            d_col,
            seconds,
        }
    }

    /// Two-cell vault along `heading`.
    pub fn vault(heading: Heading, seconds: f64) -> Self {
        let (d_row, d_col) = heading.offset();
        Motion::Vault {
            d_row: d_row * 2,
            d_col: d_col * 2,
            seconds,
        }
    }

    /// Animation length in seconds; zero for [`Motion::Relocate`].
    pub fn seconds(&self) -> f64 {
        match *self {
            Motion::Step { seconds, .. }
            | Motion::Hop { seconds }
            | Motion::Vault { seconds, .. }
            | Motion::Shiver { seconds } => seconds,
            Motion::Relocate { .. } => 0.0,
        }
    }

    /// Whether the motion happens instantly.
    pub fn is_instant(&self) -> bool {
        matches!(self, Motion::Relocate { .. })
    }

    /// Whether this is an in-place bounce.
    pub fn is_idle(&self) -> bool {
        matches!(self, Motion::Hop { .. })
    }

    /// Pause between position updates for a surface with the given scale.
    ///
    /// In-place motions update at half the rate of travelling ones. Capped
    /// at one minute for very long motions or tiny scales.
    pub fn interval(&self, cell_time_scale: f64) -> Duration {
        let per_update = match self {
            Motion::Step { .. } | Motion::Vault { .. } => 1.0,
            Motion::Hop { .. } | Motion::Shiver { .. } => 2.0,
            Motion::Relocate { .. } => return Duration::ZERO,
        };
        let pause = (per_update * self.seconds() / cell_time_scale).max(0.0);
        Duration::from_secs_f64(pause.min(MAX_UPDATE_SECONDS))
    }

    /// Position at progress `p` for a motion started at `origin`.
    pub fn sample<R: Rng + ?Sized>(&self, origin: (f64, f64), p: f64, rng: &mut R) -> (f64, f64) {
        let (row, col) = origin;
        let bounce = p * (1.0 - p);
        match *self {
            Motion::Step { d_row, d_col, .. } => {
                (row + f64::from(d_row) * p, col + f64::from(d_col) * p)
            }
            Motion::Hop { .. } => (row - bounce, col),
            Motion::Vault { d_row, d_col, .. } => {
                if d_col == 0 {
                    (row + f64::from(d_row) * p, col - bounce)
                } else {
                    (row - bounce, col + f64::from(d_col) * p)
                }
            }
            Motion::Shiver { .. } => {
                let c = col - p * (rng.random::<f64>() - 0.5) * SHIVER_AMPLITUDE;
                let r = row - p * (rng.random::<f64>() - 0.5) * SHIVER_AMPLITUDE;
                (r, c)
            }
            Motion::Relocate { to } => (f64::from(to.row), f64::from(to.col)),
        }
    }

    /// Exact resting position once the motion has finished.
    pub fn target(&self, origin: (f64, f64)) -> (f64, f64) {
        let (row, col) = origin;
        match *self {
            Motion::Step { d_row, d_col, .. } | Motion::Vault { d_row, d_col, .. } => {
                (row + f64::from(d_row), col + f64::from(d_col))
            }
            Motion::Hop { .. } | Motion::Shiver { .. } => origin,
            Motion::Relocate { to } => (f64::from(to.row), f64::from(to.col)),
        }
    }
}
