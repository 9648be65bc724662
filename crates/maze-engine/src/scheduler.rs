//! User-facing [`ActorScheduler`] API and cancellation sequence.
//!
//! # Architecture
//!
//! ```text
//! Caller thread                      Driver thread
//!     |                                   |
//!     |--start()------------------------->| spawn, owns Vec<Actor>
//!     |                                   | cmd_rx.try_recv()
//!     |--snapshot()--[cmd_tx: bounded]--->| reply with views
//!     |<--views via reply channel---------|
//!     |                                   | field.load_tagged()
//!     |--rebind()--> field.store()        | actor.advance() for each due actor
//!     |              unpark               | park_timeout(earliest wake)
//!     |                                   |
//!     |--cancel()--> shutdown flag        |
//!     |              unpark               | exits sweep, cancels actors
//!     |<--join: Vec<Actor>----------------|
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use maze_actors::{Actor, ActorId, ActorView, MovementSurface, SurfaceLink};
use maze_core::{analyze, AnalysisResult, Direction, Grid};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::SessionConfig;
use crate::driver::{Command, DriverState};
use crate::error::{SchedulerError, SessionError};
use crate::field::SharedAnalysis;

// ── CancelReport ───────────────────────────────────────────────────

/// Report from [`ActorScheduler::cancel`].
#[derive(Clone, Debug)]
pub struct CancelReport {
    /// Total time spent cancelling.
    pub total_ms: u64,
    /// Whether the driver thread stopped in time and was joined.
    pub driver_joined: bool,
    /// Final view of every actor, in id order. Empty if the driver was
    /// detached.
    pub actors: Vec<ActorView>,
    /// How many of those actors had reached a goal.
    pub goals_reached: usize,
}

// ── ActorScheduler ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Running,
    Cancelled,
}

/// One running maze session.
///
/// Owns a background driver thread that animates one actor per start
/// marker. Dropping the scheduler cancels the session.
pub struct ActorScheduler {
    field: Arc<SharedAnalysis>,
    cmd_tx: Option<Sender<Command>>,
    shutdown_flag: Arc<AtomicBool>,
    driver_stopped: Arc<AtomicBool>,
    driver: Option<JoinHandle<Vec<Actor>>>,
    surface: Weak<dyn MovementSurface>,
    config: SessionConfig,
    actor_count: usize,
    state: SessionState,
    last_report: Option<CancelReport>,
}

impl ActorScheduler {
    /// Validate `grid` against `analysis` and start animating its actors.
    ///
    /// Fails without creating any actor if the config is invalid, the
    /// shapes differ, the grid has no start marker, or any marker cannot
    /// reach a goal. Actors are numbered from 0 in row-major marker order.
    pub fn start(
        grid: &Grid,
        analysis: Arc<AnalysisResult>,
        surface: &Arc<dyn MovementSurface>,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        config.validate()?;

        let grid_shape = (grid.rows(), grid.cols());
        if analysis.shape() != grid_shape {
            return Err(SessionError::ShapeMismatch {
                grid: grid_shape,
                analysis: analysis.shape(),
            });
        }

        let markers = grid.start_markers();
        if markers.is_empty() {
            return Err(SessionError::NoActorsInMaze);
        }
        for m in &markers {
            match analysis.direction(m.at.row, m.at.col) {
                Some(Direction::Move(_)) | Some(Direction::Goal) => {}
                _ => {
                    return Err(SessionError::ActorUnreachable {
                        row: m.at.row,
                        col: m.at.col,
                        kind: m.kind,
                    })
                }
            }
        }

        let now = Instant::now();
        let actors: Vec<Actor> = markers
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let id = ActorId(i as u32);
                let kind = config.behavior_for(m.kind);
                Actor::new(
                    id,
                    m.kind,
                    m.at,
                    kind.build(&config.behaviors),
                    ChaCha8Rng::seed_from_u64(config.seed ^ u64::from(id.0)),
                    now,
                )
            })
            .collect();
        let actor_count = actors.len();

        let field = Arc::new(SharedAnalysis::new(analysis));
        let shutdown_flag = Arc::new(AtomicBool::new(false));
        let driver_stopped = Arc::new(AtomicBool::new(false));
        let link = SurfaceLink::new(
            surface,
            Arc::clone(&shutdown_flag),
            config.fallback_cell_time_scale,
        );

        // Command channel: bounded(16), drained every sweep.
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(16);

        let driver_state = DriverState::new(
            actors,
            Arc::clone(&field),
            link,
            cmd_rx,
            Arc::clone(&shutdown_flag),
            Arc::clone(&driver_stopped),
            config.max_park,
        );
        let driver = thread::Builder::new()
            .name("maze-driver".into())
            .spawn(move || driver_state.run())
            .map_err(SessionError::ThreadSpawnFailed)?;

        tracing::info!(
            actors = actor_count,
            rows = grid_shape.0,
            cols = grid_shape.1,
            seed = config.seed,
            "session started"
        );

        Ok(Self {
            field,
            cmd_tx: Some(cmd_tx),
            shutdown_flag,
            driver_stopped,
            driver: Some(driver),
            surface: Arc::downgrade(surface),
            config,
            actor_count,
            state: SessionState::Running,
            last_report: None,
        })
    }

    /// Analyse `grid` and start a session on it.
    pub fn start_on(
        grid: &Grid,
        surface: &Arc<dyn MovementSurface>,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        Self::start(grid, Arc::new(analyze(grid)), surface, config)
    }

    /// Number of actors in the session.
    pub fn actor_count(&self) -> usize {
        self.actor_count
    }

    /// Whether the driver is still running.
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// The field actors currently follow.
    pub fn analysis(&self) -> Arc<AnalysisResult> {
        self.field.load()
    }

    /// Generation of the current field: 0 at start, +1 per rebind.
    pub fn generation(&self) -> u64 {
        self.field.generation()
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Swap the field every actor follows. Actors pick it up at their
    /// next decision. Returns the new generation.
    pub fn rebind(&self, analysis: Arc<AnalysisResult>) -> Result<u64, SessionError> {
        let current = self.field.shape();
        if analysis.shape() != current {
            return Err(SessionError::ShapeMismatch {
                grid: current,
                analysis: analysis.shape(),
            });
        }
        let generation = self.field.store(analysis);
        if let Some(handle) = &self.driver {
            handle.thread().unpark();
        }
        tracing::info!(generation, "field rebound");
        Ok(generation)
    }

    /// Every actor's current view, in id order.
    pub fn snapshot(&self) -> Result<Vec<ActorView>, SchedulerError> {
        let cmd_tx = self.cmd_tx.as_ref().ok_or(SchedulerError::Shutdown)?;
        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        cmd_tx
            .send(Command::Snapshot { reply: reply_tx })
            .map_err(|_| SchedulerError::Shutdown)?;
        if let Some(handle) = &self.driver {
            handle.thread().unpark();
        }
        // The driver drops the request with its receiver if it stops first.
        reply_rx.recv().map_err(|_| SchedulerError::Shutdown)
    }

    /// Stop every actor and the driver thread.
    ///
    /// 1. Set the shutdown flag. Surface notifications become no-ops at
    ///    once and the driver exits before resuming another actor.
    /// 2. Unpark the driver and wait up to `cancel_timeout` for it to stop.
    /// 3. Join it and collect final views, or detach it if it is stuck in
    ///    a surface callback.
    ///
    /// Calling it again returns the first report.
    pub fn cancel(&mut self) -> CancelReport {
        if self.state == SessionState::Cancelled {
            return self.last_report.clone().unwrap_or(CancelReport {
                total_ms: 0,
                driver_joined: true,
                actors: Vec::new(),
                goals_reached: 0,
            });
        }

        let start = Instant::now();
        self.state = SessionState::Cancelled;
        self.shutdown_flag.store(true, Ordering::Release);
        if let Some(handle) = &self.driver {
            handle.thread().unpark();
        }

        let deadline = start + self.config.cancel_timeout;
        while !self.driver_stopped.load(Ordering::Acquire) {
            if Instant::now() > deadline {
                break;
            }
            thread::sleep(Duration::from_micros(200));
        }
        self.cmd_tx.take();

        let mut actors = Vec::new();
        let driver_joined = match self.driver.take() {
            Some(handle) if self.driver_stopped.load(Ordering::Acquire) => match handle.join() {
                Ok(finished) => {
                    actors = finished.iter().map(Actor::view).collect();
                    true
                }
                Err(_) => false,
            },
            Some(_) => {
                tracing::warn!(
                    timeout_ms = self.config.cancel_timeout.as_millis() as u64,
                    "driver did not stop in time; detaching"
                );
                false
            }
            None => true,
        };

        let goals_reached = actors.iter().filter(|v| v.goal_reached).count();
        let report = CancelReport {
            total_ms: start.elapsed().as_millis() as u64,
            driver_joined,
            actors,
            goals_reached,
        };
        tracing::info!(
            total_ms = report.total_ms,
            driver_joined,
            goals_reached,
            "session cancelled"
        );
        self.last_report = Some(report.clone());
        report
    }

    /// Cancel, re-analyse `grid`, and start a fresh session on the same
    /// surface with the same config.
    ///
    /// This is the only way to edit the grid under a session. Returns the
    /// old session's report. On error the scheduler stays cancelled.
    pub fn restart(&mut self, grid: &Grid) -> Result<CancelReport, SessionError> {
        let report = self.cancel();
        let surface = self.surface.upgrade().ok_or(SessionError::SurfaceGone)?;
        let next = Self::start_on(grid, &surface, self.config.clone())?;
        // The old session is already cancelled, so dropping it is a no-op.
        *self = next;
        Ok(report)
    }
}

impl Drop for ActorScheduler {
    fn drop(&mut self) {
        if self.state != SessionState::Cancelled {
            self.cancel();
        }
    }
}

impl std::fmt::Debug for ActorScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorScheduler")
            .field("actors", &self.actor_count)
            .field("state", &self.state)
            .field("generation", &self.field.generation())
            .finish()
    }
}
