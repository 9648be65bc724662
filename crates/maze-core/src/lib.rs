//! Core types for the maze workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! integer cell grid, the canonical heading table, the multi-source
//! flood-fill [`analyze`] and path reconstruction over its result.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod analysis;
pub mod coord;
pub mod direction;
pub mod error;
pub mod grid;
mod path;

pub use analysis::{analyze, analyze_rows, analyze_text, AnalysisResult, UNREACHABLE};
pub use coord::Coord;
pub use direction::{Direction, Heading};
pub use error::{GridError, NoPathExists};
pub use grid::{CellKind, Grid, StartMarker};
