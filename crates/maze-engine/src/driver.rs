//! Driver loop: command draining, actor sweeps, and parking.
//!
//! The driver thread owns every [`Actor`] of a session exclusively (moved
//! in via `thread::Builder::spawn`). Queries arrive on a bounded crossbeam
//! channel and are answered on per-request reply channels. Between sweeps
//! the thread parks until the earliest actor wake, so
//! [`Thread::unpark`](std::thread::Thread::unpark) wakes it immediately on
//! cancel or rebind.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use maze_actors::{Actor, ActorView, SurfaceLink};

use crate::field::SharedAnalysis;

/// A request from the scheduler, answered between sweeps.
pub(crate) enum Command {
    /// Reply with every actor's current view.
    Snapshot { reply: Sender<Vec<ActorView>> },
}

/// State held by the driver thread's main loop.
pub(crate) struct DriverState {
    actors: Vec<Actor>,
    field: Arc<SharedAnalysis>,
    link: SurfaceLink,
    cmd_rx: Receiver<Command>,
    shutdown_flag: Arc<AtomicBool>,
    driver_stopped: Arc<AtomicBool>,
    max_park: Duration,
}

impl DriverState {
    pub fn new(
        actors: Vec<Actor>,
        field: Arc<SharedAnalysis>,
        link: SurfaceLink,
        cmd_rx: Receiver<Command>,
        shutdown_flag: Arc<AtomicBool>,
        driver_stopped: Arc<AtomicBool>,
        max_park: Duration,
    ) -> Self {
        Self {
            actors,
            field,
            link,
            cmd_rx,
            shutdown_flag,
            driver_stopped,
            max_park,
        }
    }

    /// Main loop. Runs until `shutdown_flag` is set.
    ///
    /// Consumes self and returns the cancelled actors so the caller can
    /// report their final state via `JoinHandle<Vec<Actor>>`.
    pub fn run(mut self) -> Vec<Actor> {
        let mut seen_generation = self.field.generation();
        'sweeps: loop {
            if self.is_shutdown() {
                break;
            }

            // 1. Answer pending queries.
            self.drain_command_channel();

            // 2. One field per sweep.
            let (generation, analysis) = self.field.load_tagged();
            if generation != seen_generation {
                tracing::debug!(generation, "driver picked up new field");
                seen_generation = generation;
            }

            // 3. Resume every actor that is due.
            let now = Instant::now();
            for actor in &mut self.actors {
                if self.shutdown_flag.load(Ordering::Acquire) {
                    break 'sweeps;
                }
                if actor.next_wake() <= now {
                    actor.advance(now, &analysis, &self.link);
                }
            }
            drop(analysis);

            // 4. Park until the earliest wake.
            let park = self.park_duration(Instant::now());
            if !park.is_zero() {
                thread::park_timeout(park);
            }
        }

        for actor in &mut self.actors {
            actor.cancel();
        }
        self.driver_stopped.store(true, Ordering::Release);
        self.actors
    }

    fn is_shutdown(&self) -> bool {
        self.shutdown_flag.load(Ordering::Acquire)
    }

    /// Answer every queued command.
    fn drain_command_channel(&mut self) {
        while let Ok(cmd) = self.cmd_rx.try_recv() {
            match cmd {
                Command::Snapshot { reply } => {
                    let views = self.actors.iter().map(Actor::view).collect();
                    // Best-effort reply; the caller may have given up.
                    let _ = reply.send(views);
                }
            }
        }
    }

    /// Time until the earliest actor wants to run, capped at `max_park`.
    fn park_duration(&self, now: Instant) -> Duration {
        self.actors
            .iter()
            .map(|a| a.due_in(now))
            .min()
            .unwrap_or(self.max_park)
            .min(self.max_park)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_actors::{ActorId, BehaviorConfig, BehaviorKind, MovementSurface, SurfaceError};
    use maze_core::{analyze_rows, Coord};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Quiet;

    impl MovementSurface for Quiet {
        fn actor_moved(&self, _actor: &ActorView) -> Result<(), SurfaceError> {
            Ok(())
        }
        fn cell_time_scale(&self) -> f64 {
            32.0
        }
        fn is_inside_grid(&self, row: i32, col: i32) -> bool {
            (0..1).contains(&row) && (0..3).contains(&col)
        }
    }

    fn state(
        actors: Vec<Actor>,
        max_park: Duration,
    ) -> (DriverState, Arc<dyn MovementSurface>, Sender<Command>, Arc<AtomicBool>) {
        let surface: Arc<dyn MovementSurface> = Arc::new(Quiet);
        let flag = Arc::new(AtomicBool::new(false));
        let link = SurfaceLink::new(&surface, Arc::clone(&flag), 32.0);
        let field = Arc::new(SharedAnalysis::new(Arc::new(
            analyze_rows(&[[1, 0, 0]]).unwrap(),
        )));
        let (tx, rx) = crossbeam_channel::bounded(4);
        let driver = DriverState::new(
            actors,
            field,
            link,
            rx,
            Arc::clone(&flag),
            Arc::new(AtomicBool::new(false)),
            max_park,
        );
        (driver, surface, tx, flag)
    }

    fn actor(at: Instant) -> Actor {
        Actor::new(
            ActorId(0),
            2,
            Coord::new(0, 2),
            BehaviorKind::Basic.build(&BehaviorConfig::default()),
            ChaCha8Rng::seed_from_u64(0),
            at,
        )
    }

    #[test]
    fn park_is_capped() {
        let now = Instant::now();
        let (driver, _s, _tx, _flag) =
            state(vec![actor(now + Duration::from_secs(5))], Duration::from_millis(20));
        assert_eq!(driver.park_duration(now), Duration::from_millis(20));
    }

    #[test]
    fn due_actor_means_no_park() {
        let now = Instant::now();
        let (driver, _s, _tx, _flag) = state(vec![actor(now)], Duration::from_millis(20));
        assert_eq!(driver.park_duration(now), Duration::ZERO);
    }

    #[test]
    fn empty_driver_parks_for_max() {
        let (driver, _s, _tx, _flag) = state(Vec::new(), Duration::from_millis(7));
        assert_eq!(driver.park_duration(Instant::now()), Duration::from_millis(7));
    }

    #[test]
    fn snapshot_is_answered_between_sweeps() {
        let (mut driver, _s, tx, _flag) = state(vec![actor(Instant::now())], Duration::from_millis(5));
        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        tx.send(Command::Snapshot { reply: reply_tx }).unwrap();
        driver.drain_command_channel();
        let views = reply_rx.try_recv().unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].col, 2.0);
    }

    #[test]
    fn run_returns_cancelled_actors_after_shutdown() {
        let (driver, _s, _tx, flag) = state(vec![actor(Instant::now())], Duration::from_millis(5));
        let stopped = Arc::clone(&driver.driver_stopped);
        let handle = thread::spawn(move || driver.run());
        thread::sleep(Duration::from_millis(30));
        flag.store(true, Ordering::Release);
        handle.thread().unpark();
        let actors = handle.join().unwrap();
        assert!(stopped.load(Ordering::Acquire));
        assert_eq!(actors.len(), 1);
        assert_eq!(actors[0].state(), maze_actors::ActorState::Cancelled);
    }
}
