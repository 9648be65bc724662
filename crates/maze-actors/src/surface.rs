//! The host capability an actor moves on.
//!
//! A [`MovementSurface`] is whatever presents the maze: it hears about every
//! position change, supplies the time scale that paces animation updates,
//! and answers bounds queries. Actors never hold it strongly; they go
//! through a [`SurfaceLink`], which turns notifications into no-ops once
//! the session is cancelled or the surface has been dropped.

use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use crate::actor::ActorState;
use crate::id::ActorId;

/// Snapshot of an actor's observable state, passed to the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct ActorView {
    /// Session-unique identifier.
    pub id: ActorId,
    /// Kind tag copied from the start marker.
    pub kind: i32,
    /// Fractional row; integral whenever the actor is at rest.
    pub row: f64,
    /// Fractional column; integral whenever the actor is at rest.
    pub col: f64,
    /// Whether the latest decision was taken on a goal cell.
    pub goal_reached: bool,
    /// Current state machine state.
    pub state: ActorState,
    /// Seconds of completed animation.
    pub score: f64,
}

/// Failure reported by a surface when it cannot take a notification.
///
/// Actors swallow these: notifications are redraw hints only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface has been torn down.
    Gone,
    /// The surface refused the update.
    Rejected {
        /// Human-readable reason.
        reason: String,
    },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gone => write!(f, "surface is gone"),
            Self::Rejected { reason } => write!(f, "surface rejected update: {reason}"),
        }
    }
}

impl Error for SurfaceError {}

/// What an actor needs from its host.
pub trait MovementSurface: Send + Sync {
    /// Called after every position update.
    fn actor_moved(&self, actor: &ActorView) -> Result<(), SurfaceError>;

    /// Positive pacing constant: an animation of `d` seconds is updated
    /// every `d / cell_time_scale()` seconds, roughly once per pixel.
    fn cell_time_scale(&self) -> f64;

    /// Whether `(row, col)` is a cell of the presented grid.
    fn is_inside_grid(&self, row: i32, col: i32) -> bool;
}

/// An actor's weak, cancellable handle on its surface.
#[derive(Clone)]
pub struct SurfaceLink {
    surface: Weak<dyn MovementSurface>,
    cancelled: Arc<AtomicBool>,
    fallback_scale: f64,
}

impl SurfaceLink {
    /// Link to `surface`. Once `cancelled` is set, [`notify`](Self::notify)
    /// does nothing. `fallback_scale` paces animation if the surface is gone
    /// or reports a non-positive scale.
    pub fn new(
        surface: &Arc<dyn MovementSurface>,
        cancelled: Arc<AtomicBool>,
        fallback_scale: f64,
    ) -> Self {
        Self {
            surface: Arc::downgrade(surface),
            cancelled,
            fallback_scale,
        }
    }

    /// Whether the owning session has started cancelling.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Whether the surface still exists.
    pub fn is_attached(&self) -> bool {
        self.surface.strong_count() > 0
    }

    /// Report a position change. Never fails.
    pub fn notify(&self, view: &ActorView) {
        if self.is_cancelled() {
            return;
        }
        let Some(surface) = self.surface.upgrade() else {
            return;
        };
        if let Err(e) = surface.actor_moved(view) {
            tracing::trace!(actor = %view.id, error = %e, "surface notification dropped");
        }
    }

    /// Current pacing constant.
    pub fn cell_time_scale(&self) -> f64 {
        match self.surface.upgrade().map(|s| s.cell_time_scale()) {
            Some(scale) if scale.is_finite() && scale > 0.0 => scale,
            _ => self.fallback_scale,
        }
    }

    /// Bounds check through the surface, `None` if it is gone.
    pub fn is_inside_grid(&self, row: i32, col: i32) -> Option<bool> {
        self.surface.upgrade().map(|s| s.is_inside_grid(row, col))
    }
}

impl fmt::Debug for SurfaceLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceLink")
            .field("attached", &self.is_attached())
            .field("cancelled", &self.is_cancelled())
            .field("fallback_scale", &self.fallback_scale)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Counting {
        calls: Mutex<u32>,
        scale: f64,
        fail: bool,
    }

    impl MovementSurface for Counting {
        fn actor_moved(&self, _actor: &ActorView) -> Result<(), SurfaceError> {
            *self.calls.lock().unwrap() += 1;
            if self.fail {
                Err(SurfaceError::Rejected {
                    reason: "busy".into(),
                })
            } else {
                Ok(())
            }
        }
        fn cell_time_scale(&self) -> f64 {
            self.scale
        }
        fn is_inside_grid(&self, row: i32, col: i32) -> bool {
            row == 0 && col == 0
        }
    }

    fn view() -> ActorView {
        ActorView {
            id: ActorId(0),
            kind: 2,
            row: 0.0,
            col: 0.0,
            goal_reached: false,
            state: ActorState::Deciding,
            score: 0.0,
        }
    }

    fn counting(scale: f64, fail: bool) -> Arc<Counting> {
        Arc::new(Counting {
            calls: Mutex::new(0),
            scale,
            fail,
        })
    }

    #[test]
    fn notify_reaches_live_surface() {
        let surface = counting(32.0, false);
        let dyn_surface: Arc<dyn MovementSurface> = surface.clone();
        let link = SurfaceLink::new(&dyn_surface, Arc::new(AtomicBool::new(false)), 32.0);
        link.notify(&view());
        link.notify(&view());
        assert_eq!(*surface.calls.lock().unwrap(), 2);
        assert_eq!(link.is_inside_grid(0, 0), Some(true));
    }

    #[test]
    fn notify_after_cancel_is_noop() {
        let surface = counting(32.0, false);
        let dyn_surface: Arc<dyn MovementSurface> = surface.clone();
        let flag = Arc::new(AtomicBool::new(false));
        let link = SurfaceLink::new(&dyn_surface, flag.clone(), 32.0);
        flag.store(true, Ordering::Release);
        link.notify(&view());
        assert_eq!(*surface.calls.lock().unwrap(), 0);
    }

    #[test]
    fn dropped_surface_falls_back() {
        let dyn_surface: Arc<dyn MovementSurface> = counting(8.0, false);
        let link = SurfaceLink::new(&dyn_surface, Arc::new(AtomicBool::new(false)), 32.0);
        assert_eq!(link.cell_time_scale(), 8.0);
        drop(dyn_surface);
        assert!(!link.is_attached());
        link.notify(&view());
        assert_eq!(link.cell_time_scale(), 32.0);
        assert_eq!(link.is_inside_grid(0, 0), None);
    }

    #[test]
    fn surface_errors_are_swallowed() {
        let surface = counting(0.0, true);
        let dyn_surface: Arc<dyn MovementSurface> = surface.clone();
        let link = SurfaceLink::new(&dyn_surface, Arc::new(AtomicBool::new(false)), 16.0);
        link.notify(&view());
        assert_eq!(*surface.calls.lock().unwrap(), 1);
        // Non-positive scale from the surface is replaced by the fallback.
        assert_eq!(link.cell_time_scale(), 16.0);
    }
}
