//! Animated actors that walk a maze's direction field.
//!
//! An [`Actor`] is an explicit state machine: it decides a short [`Plan`] of
//! [`Motion`]s through its [`Behavior`], then interpolates each motion by
//! wall-clock time, reporting every position change to a
//! [`MovementSurface`]. Nothing here owns a thread; a driver calls
//! [`Actor::advance`] whenever [`Actor::next_wake`] has passed.
//!
//! Behaviours:
//!
//! | Kind | Rule |
//! |------|------|
//! | `basic` | Follow the direction field. |
//! | `speedy` | Follow, with a constant shorter step. |
//! | `accelerator` | Follow, occasionally shortening the step for good. |
//! | `jumper` | Vault over a single wall when that skips far enough ahead. |
//! | `teleporter` | Occasionally shiver, relocate to a far cell, shiver. |
//! | `scatterbrain` | Occasionally step a wrong but passable way. |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod actor;
pub mod behavior;
pub mod config;
pub mod id;
pub mod motion;
pub mod surface;

pub use actor::{Actor, ActorState};
pub use behavior::{Behavior, BehaviorKind, DecisionContext, Plan, UnknownBehavior};
pub use config::{
    AccelerationConfig, BehaviorConfig, ConfigError, MotionConfig, ScatterConfig, SpeedConfig,
    TeleportConfig, VaultConfig,
};
pub use id::ActorId;
pub use motion::Motion;
pub use surface::{ActorView, MovementSurface, SurfaceError, SurfaceLink};
