//! Maze: flood-fill analysis of integer grids and concurrent animated actors.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! maze sub-crates. For most users, adding `maze` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use maze::prelude::*;
//!
//! // Goal top-left, a wall, and a start marker of kind 2.
//! let grid: Grid = "1,0,0\n-1,-1,0\n2,0,0\n".parse().unwrap();
//! let analysis = analyze(&grid);
//! assert!(analysis.reachable());
//! assert_eq!(analysis.distance(2, 0), Some(6));
//!
//! let path = analysis.path(2, 0).unwrap();
//! assert_eq!(path.first(), Some(&Coord::new(2, 0)));
//! assert_eq!(path.last(), Some(&Coord::new(0, 0)));
//! print!("{}", analysis.render());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`grid`] | `maze-core` | Grid, headings, analysis, paths |
//! | [`actors`] | `maze-actors` | Surface contract, motions, actors, behaviours |
//! | [`engine`] | `maze-engine` | Session config and the actor scheduler |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid model, flood-fill analysis and path reconstruction (`maze-core`).
///
/// [`grid::analyze`] turns a [`grid::Grid`] into an
/// [`grid::AnalysisResult`]; [`grid::AnalysisResult::path`] walks it.
pub use maze_core as grid;

/// Animated actors and their behaviours (`maze-actors`).
///
/// Implement [`actors::MovementSurface`] to present actors; pick policies
/// by [`actors::BehaviorKind`].
pub use maze_actors as actors;

/// Session scheduling (`maze-engine`).
///
/// [`engine::ActorScheduler`] runs every actor of a grid on a background
/// thread until cancelled.
pub use maze_engine as engine;

/// Common imports for typical maze usage.
///
/// ```rust
/// use maze::prelude::*;
/// ```
pub mod prelude {
    // Grid and analysis
    pub use maze_core::{
        analyze, analyze_text, AnalysisResult, CellKind, Coord, Direction, Grid, Heading,
    };

    // Errors
    pub use maze_core::{GridError, NoPathExists};
    pub use maze_engine::{SchedulerError, SessionError};

    // Actors
    pub use maze_actors::{ActorId, ActorState, ActorView, BehaviorConfig, BehaviorKind};
    pub use maze_actors::{MovementSurface, SurfaceError};

    // Engine
    pub use maze_engine::{ActorScheduler, CancelReport, SessionConfig};
}
