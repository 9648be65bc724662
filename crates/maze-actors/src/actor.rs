//! The per-actor state machine.
//!
//! ```text
//!            decide                 p > 1
//! Deciding ─────────▶ Moving ─────────────▶ Deciding
//!     │                                        ▲
//!     └──────────────▶ Idling ─────────────────┘
//!
//! any state ── session cancelled ──▶ Cancelled
//! ```
//!
//! [`Actor::advance`] is the only entry point. It is a resumption: it does
//! whatever is due at `now` (sample the running motion, finish it, decide
//! the next one) and records when it next wants to run.

use std::time::{Duration, Instant};

use maze_core::{AnalysisResult, Coord};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

use crate::behavior::{Behavior, DecisionContext};
use crate::id::ActorId;
use crate::motion::Motion;
use crate::surface::{ActorView, SurfaceLink};

/// Where an actor is in its decide/animate cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActorState {
    /// Nothing is animating; the next advance decides.
    Deciding,
    /// Travelling or shivering.
    Moving,
    /// Bouncing in place.
    Idling,
    /// Terminal.
    Cancelled,
}

#[derive(Clone, Copy, Debug)]
struct Running {
    motion: Motion,
    origin: (f64, f64),
    started: Instant,
}

/// One animated maze dweller.
pub struct Actor {
    id: ActorId,
    kind: i32,
    row: f64,
    col: f64,
    goal_reached: bool,
    behavior: Box<dyn Behavior>,
    rng: ChaCha8Rng,
    /// Pending motions, last one first.
    queued: SmallVec<[Motion; 3]>,
    running: Option<Running>,
    next_wake: Instant,
    score: f64,
    cancelled: bool,
}

impl Actor {
    /// Place an actor on `at`. It wants to run immediately.
    pub fn new(
        id: ActorId,
        kind: i32,
        at: Coord,
        behavior: Box<dyn Behavior>,
        rng: ChaCha8Rng,
        now: Instant,
    ) -> Self {
        Self {
            id,
            kind,
            row: f64::from(at.row),
            col: f64::from(at.col),
            goal_reached: false,
            behavior,
            rng,
            queued: SmallVec::new(),
            running: None,
            next_wake: now,
            score: 0.0,
            cancelled: false,
        }
    }

    /// Identifier.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Kind tag from the start marker.
    pub fn kind(&self) -> i32 {
        self.kind
    }

    /// Fractional `(row, col)`.
    pub fn position(&self) -> (f64, f64) {
        (self.row, self.col)
    }

    /// Integer cell under the actor, truncating toward zero.
    pub fn cell(&self) -> Coord {
        Coord::new(self.row as i32, self.col as i32)
    }

    /// Whether the latest decision was taken on a goal.
    pub fn goal_reached(&self) -> bool {
        self.goal_reached
    }

    /// Seconds of completed animation.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Behaviour registry name.
    pub fn behavior_name(&self) -> &'static str {
        self.behavior.name()
    }

    /// When the actor next needs [`advance`](Self::advance).
    pub fn next_wake(&self) -> Instant {
        self.next_wake
    }

    /// Current state.
    pub fn state(&self) -> ActorState {
        if self.cancelled {
            return ActorState::Cancelled;
        }
        match &self.running {
            None => ActorState::Deciding,
            Some(r) if r.motion.is_idle() => ActorState::Idling,
            Some(_) => ActorState::Moving,
        }
    }

    /// Observable snapshot.
    pub fn view(&self) -> ActorView {
        ActorView {
            id: self.id,
            kind: self.kind,
            row: self.row,
            col: self.col,
            goal_reached: self.goal_reached,
            state: self.state(),
            score: self.score,
        }
    }

    /// Stop for good. Later advances do nothing.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.running = None;
        self.queued.clear();
    }

    /// Run everything that is due at `now` against `analysis`.
    ///
    /// Returns without doing anything once the actor or its link is
    /// cancelled. Every position change is reported through `link`.
    pub fn advance(&mut self, now: Instant, analysis: &AnalysisResult, link: &SurfaceLink) {
        if self.cancelled {
            return;
        }
        loop {
            if link.is_cancelled() {
                self.cancel();
                return;
            }
            match self.running.take() {
                Some(run) => {
                    let seconds = run.motion.seconds();
                    let elapsed = now.saturating_duration_since(run.started).as_secs_f64();
                    let p = elapsed / seconds;
                    if p > 1.0 {
                        (self.row, self.col) = run.motion.target(run.origin);
                        self.score += seconds;
                        link.notify(&self.view());
                        continue;
                    }
                    (self.row, self.col) = run.motion.sample(run.origin, p, &mut self.rng);
                    self.running = Some(run);
                    self.next_wake = now + run.motion.interval(link.cell_time_scale());
                    link.notify(&self.view());
                    return;
                }
                None => {
                    let motion = self.next_motion(analysis, link);
                    let origin = (self.row, self.col);
                    if motion.is_instant() {
                        (self.row, self.col) = motion.target(origin);
                        link.notify(&self.view());
                        continue;
                    }
                    (self.row, self.col) = motion.sample(origin, 0.0, &mut self.rng);
                    self.running = Some(Running {
                        motion,
                        origin,
                        started: now,
                    });
                    self.next_wake = now + motion.interval(link.cell_time_scale());
                    link.notify(&self.view());
                    return;
                }
            }
        }
    }

    /// Pop the next queued motion, deciding a fresh plan if none is left.
    fn next_motion(&mut self, analysis: &AnalysisResult, link: &SurfaceLink) -> Motion {
        if let Some(m) = self.queued.pop() {
            return m;
        }
        let cell = self.cell();
        let inside = link
            .is_inside_grid(cell.row, cell.col)
            .unwrap_or_else(|| analysis.contains(cell.row, cell.col));
        let mut ctx = DecisionContext::new(self.id, analysis, cell, inside, &mut self.rng);
        self.goal_reached = ctx.in_goal();
        let plan = self.behavior.decide(&mut ctx);
        self.queued = plan.into_iter().rev().collect();
        self.queued.pop().unwrap_or(Motion::Hop {
            seconds: FALLBACK_HOP_SECONDS,
        })
    }

    /// Time until the next wake, zero if already due.
    pub fn due_in(&self, now: Instant) -> Duration {
        self.next_wake.saturating_duration_since(now)
    }
}

/// Used only if a behaviour returns an empty plan.
const FALLBACK_HOP_SECONDS: f64 = 0.2;

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("behavior", &self.behavior.name())
            .field("row", &self.row)
            .field("col", &self.col)
            .field("state", &self.state())
            .field("goal_reached", &self.goal_reached)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::BehaviorKind;
    use crate::config::BehaviorConfig;
    use crate::surface::{MovementSurface, SurfaceError};
    use maze_core::analyze_rows;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Log {
        moves: Mutex<Vec<ActorView>>,
    }

    impl MovementSurface for Log {
        fn actor_moved(&self, actor: &ActorView) -> Result<(), SurfaceError> {
            self.moves.lock().unwrap().push(actor.clone());
            Ok(())
        }
        fn cell_time_scale(&self) -> f64 {
            10.0
        }
        fn is_inside_grid(&self, row: i32, col: i32) -> bool {
            row >= 0 && col >= 0
        }
    }

    struct Fixture {
        log: Arc<Log>,
        _surface: Arc<dyn MovementSurface>,
        link: SurfaceLink,
        flag: Arc<AtomicBool>,
    }

    fn fixture() -> Fixture {
        let log = Arc::new(Log::default());
        let surface: Arc<dyn MovementSurface> = log.clone();
        let flag = Arc::new(AtomicBool::new(false));
        let link = SurfaceLink::new(&surface, flag.clone(), 32.0);
        Fixture {
            log,
            _surface: surface,
            link,
            flag,
        }
    }

    fn basic(at: Coord, now: Instant) -> Actor {
        Actor::new(
            ActorId(0),
            2,
            at,
            BehaviorKind::Basic.build(&BehaviorConfig::default()),
            ChaCha8Rng::seed_from_u64(0),
            now,
        )
    }

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn walks_to_goal_and_idles() {
        let f = fixture();
        let analysis = analyze_rows(&[[1, 0, 0]]).unwrap();
        let t0 = Instant::now();
        let mut a = basic(Coord::new(0, 2), t0);

        a.advance(t0, &analysis, &f.link);
        assert_eq!(a.state(), ActorState::Moving);
        assert_eq!(a.position(), (0.0, 2.0));
        assert_eq!(a.next_wake(), t0 + secs(0.1));

        a.advance(t0 + secs(0.5), &analysis, &f.link);
        assert_eq!(a.position(), (0.0, 1.5));

        a.advance(t0 + secs(1.01), &analysis, &f.link);
        assert_eq!(a.position(), (0.0, 1.0));
        assert_eq!(a.state(), ActorState::Moving);

        a.advance(t0 + secs(2.02), &analysis, &f.link);
        assert_eq!(a.position(), (0.0, 0.0));
        assert!(a.goal_reached());
        assert_eq!(a.state(), ActorState::Idling);
        assert!((a.score() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn final_position_is_exact() {
        let f = fixture();
        let analysis = analyze_rows(&[[1, 0]]).unwrap();
        let t0 = Instant::now();
        let mut a = basic(Coord::new(0, 1), t0);
        let mut now = t0;
        for _ in 0..37 {
            a.advance(now, &analysis, &f.link);
            now += secs(0.0291);
        }
        a.advance(t0 + secs(1.5), &analysis, &f.link);
        assert_eq!(a.cell(), Coord::new(0, 0));
        assert_eq!(a.position(), (0.0, 0.0));
    }

    #[test]
    fn every_update_is_reported() {
        let f = fixture();
        let analysis = analyze_rows(&[[1, 0]]).unwrap();
        let t0 = Instant::now();
        let mut a = basic(Coord::new(0, 1), t0);
        a.advance(t0, &analysis, &f.link);
        a.advance(t0 + secs(0.3), &analysis, &f.link);
        a.advance(t0 + secs(0.6), &analysis, &f.link);
        let moves = f.log.moves.lock().unwrap();
        assert_eq!(moves.len(), 3);
        assert!((moves[1].col - 0.7).abs() < 1e-9);
        assert!(moves.iter().all(|v| v.id == ActorId(0) && v.kind == 2));
    }

    #[test]
    fn wall_and_unreachable_cells_idle() {
        let f = fixture();
        let analysis = analyze_rows(&[[1, -1, 0]]).unwrap();
        let t0 = Instant::now();
        for col in [1, 2] {
            let mut a = basic(Coord::new(0, col), t0);
            a.advance(t0, &analysis, &f.link);
            assert_eq!(a.state(), ActorState::Idling);
            assert!(!a.goal_reached());
        }
    }

    #[test]
    fn off_grid_actor_idles() {
        let f = fixture();
        let analysis = analyze_rows(&[[1, 0]]).unwrap();
        let t0 = Instant::now();
        let mut a = basic(Coord::new(3, 3), t0);
        a.advance(t0, &analysis, &f.link);
        assert_eq!(a.state(), ActorState::Idling);
    }

    #[test]
    fn hop_rises_and_lands() {
        let f = fixture();
        let analysis = analyze_rows(&[[1]]).unwrap();
        let t0 = Instant::now();
        let mut a = basic(Coord::new(0, 0), t0);
        a.advance(t0, &analysis, &f.link);
        assert_eq!(a.next_wake(), t0 + secs(0.04));
        a.advance(t0 + secs(0.1), &analysis, &f.link);
        assert!(a.position().0 < 0.0);
        a.advance(t0 + secs(0.21), &analysis, &f.link);
        // A new hop starts from the landing spot.
        assert_eq!(a.position(), (0.0, 0.0));
    }

    #[test]
    fn cancellation_stops_motion_and_notifications() {
        let f = fixture();
        let analysis = analyze_rows(&[[1, 0, 0]]).unwrap();
        let t0 = Instant::now();
        let mut a = basic(Coord::new(0, 2), t0);
        a.advance(t0, &analysis, &f.link);
        let before = f.log.moves.lock().unwrap().len();

        f.flag.store(true, Ordering::Release);
        a.advance(t0 + secs(0.5), &analysis, &f.link);
        assert_eq!(a.state(), ActorState::Cancelled);
        assert_eq!(a.position(), (0.0, 2.0));
        a.advance(t0 + secs(5.0), &analysis, &f.link);
        assert_eq!(f.log.moves.lock().unwrap().len(), before);
    }

    #[test]
    fn teleport_plan_runs_in_order() {
        let f = fixture();
        let mut grid = maze_core::Grid::new(12, 12).unwrap();
        grid.set(0, 0, 1).unwrap();
        let analysis = maze_core::analyze(&grid);
        let mut config = BehaviorConfig::default();
        config.teleport.teleport_prob = 1.0;
        let t0 = Instant::now();
        let mut a = Actor::new(
            ActorId(3),
            4,
            Coord::new(1, 1),
            BehaviorKind::Teleporter.build(&config),
            ChaCha8Rng::seed_from_u64(42),
            t0,
        );
        a.advance(t0, &analysis, &f.link);
        assert_eq!(a.state(), ActorState::Moving);
        // First shiver ends, relocation is instant, second shiver begins.
        a.advance(t0 + secs(0.6), &analysis, &f.link);
        let moved_to = a.cell();
        assert_ne!(moved_to, Coord::new(1, 1));
        assert!(analysis.distance(moved_to.row, moved_to.col).unwrap() > 5);
        a.advance(t0 + secs(1.2), &analysis, &f.link);
        assert_eq!(a.cell(), moved_to);
        assert!((a.score() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn gone_surface_uses_fallback_pacing() {
        let log = Arc::new(Log::default());
        let surface: Arc<dyn MovementSurface> = log;
        let link = SurfaceLink::new(&surface, Arc::new(AtomicBool::new(false)), 20.0);
        drop(surface);
        let analysis = analyze_rows(&[[1, 0]]).unwrap();
        let t0 = Instant::now();
        let mut a = basic(Coord::new(0, 1), t0);
        a.advance(t0, &analysis, &link);
        assert_eq!(a.next_wake(), t0 + secs(0.05));
        assert_eq!(a.state(), ActorState::Moving);
    }

    #[test]
    fn overlong_step_does_not_overflow_the_wake() {
        let f = fixture();
        let analysis = analyze_rows(&[[1, 0]]).unwrap();
        let mut config = BehaviorConfig::default();
        config.motion.step_seconds = 1e21;
        let t0 = Instant::now();
        let mut a = Actor::new(
            ActorId(0),
            2,
            Coord::new(0, 1),
            BehaviorKind::Basic.build(&config),
            ChaCha8Rng::seed_from_u64(0),
            t0,
        );
        a.advance(t0, &analysis, &f.link);
        assert_eq!(a.state(), ActorState::Moving);
        assert_eq!(a.next_wake(), t0 + Duration::from_secs(60));
        a.advance(a.next_wake(), &analysis, &f.link);
        assert_eq!(a.cell(), Coord::new(0, 1));
    }
}
