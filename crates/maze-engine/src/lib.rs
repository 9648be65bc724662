//! Session scheduling for maze actors.
//!
//! An [`ActorScheduler`] validates a grid's start markers against its
//! analysis, creates one actor per marker and drives them all from a
//! single background thread until cancelled. The analysis lives in a
//! [`SharedAnalysis`] slot that can be swapped while actors run.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub(crate) mod driver;
pub mod error;
pub mod field;
pub mod scheduler;

pub use config::SessionConfig;
pub use error::{SchedulerError, SessionError};
pub use field::SharedAnalysis;
pub use scheduler::{ActorScheduler, CancelReport};
