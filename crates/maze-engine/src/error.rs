//! Session and scheduler error types.

use std::error::Error;
use std::fmt;
use std::io;

use maze_actors::ConfigError;

// ── SessionError ───────────────────────────────────────────────────

/// Why a session could not start.
#[derive(Debug)]
pub enum SessionError {
    /// The grid has no start marker.
    NoActorsInMaze,
    /// A start marker sits on a cell with no route to any goal.
    ActorUnreachable {
        /// Marker row.
        row: i32,
        /// Marker column.
        col: i32,
        /// Marker kind tag.
        kind: i32,
    },
    /// The analysis was computed for a grid of another shape.
    ShapeMismatch {
        /// Shape of the grid, `(rows, cols)`.
        grid: (usize, usize),
        /// Shape of the analysis, `(rows, cols)`.
        analysis: (usize, usize),
    },
    /// The session configuration is invalid.
    Config(ConfigError),
    /// The surface was dropped before a restart.
    SurfaceGone,
    /// The driver thread could not be spawned.
    ThreadSpawnFailed(io::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActorsInMaze => write!(f, "no start marker in maze"),
            Self::ActorUnreachable { row, col, kind } => write!(
                f,
                "actor of kind {kind} at ({row}, {col}) cannot reach any goal"
            ),
            Self::ShapeMismatch { grid, analysis } => write!(
                f,
                "analysis shape {}x{} does not match grid shape {}x{}",
                analysis.0, analysis.1, grid.0, grid.1
            ),
            Self::Config(e) => write!(f, "invalid session config: {e}"),
            Self::SurfaceGone => write!(f, "movement surface is gone"),
            Self::ThreadSpawnFailed(e) => write!(f, "failed to spawn driver thread: {e}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::ThreadSpawnFailed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── SchedulerError ─────────────────────────────────────────────────

/// Error querying a running scheduler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchedulerError {
    /// The session has been cancelled.
    Shutdown,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shutdown => write!(f, "scheduler has shut down"),
        }
    }
}

impl Error for SchedulerError {}
