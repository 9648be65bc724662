//! Test utilities and mock types for maze development.
//!
//! Provides a [`RecordingSurface`] that captures every actor notification,
//! the fixture mazes in [`fixtures`], invariant checkers for analysis
//! results and paths, and [`drive_until`] for running an actor on a
//! simulated clock.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use maze_actors::{Actor, ActorId, ActorState, ActorView, MovementSurface, SurfaceError, SurfaceLink};
use maze_core::{AnalysisResult, CellKind, Coord, Direction, Grid, Heading};

// ── RecordingSurface ───────────────────────────────────────────────

/// A [`MovementSurface`] that records every notification.
///
/// Bounds follow the grid shape it was built for. Set
/// [`refusing`](RecordingSurface::set_refusing) to make it reject updates.
pub struct RecordingSurface {
    rows: usize,
    cols: usize,
    scale: f64,
    moves: Mutex<Vec<ActorView>>,
    refusing: AtomicBool,
}

impl RecordingSurface {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            scale: 32.0,
            moves: Mutex::new(Vec::new()),
            refusing: AtomicBool::new(false),
        }
    }

    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.rows(), grid.cols())
    }

    /// Override the pacing constant (default 32).
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn set_refusing(&self, refusing: bool) {
        self.refusing.store(refusing, Ordering::Release);
    }

    /// Copy of every view received so far.
    pub fn moves(&self) -> Vec<ActorView> {
        self.moves.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.moves.lock().unwrap().len()
    }

    /// Latest view received for `id`.
    pub fn latest(&self, id: ActorId) -> Option<ActorView> {
        self.moves
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|v| v.id == id)
            .cloned()
    }
}

impl MovementSurface for RecordingSurface {
    fn actor_moved(&self, actor: &ActorView) -> Result<(), SurfaceError> {
        if self.refusing.load(Ordering::Acquire) {
            return Err(SurfaceError::Rejected {
                reason: "recording surface is refusing".into(),
            });
        }
        self.moves.lock().unwrap().push(actor.clone());
        Ok(())
    }

    fn cell_time_scale(&self) -> f64 {
        self.scale
    }

    fn is_inside_grid(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }
}

/// A live link to `surface` plus the cancel flag that controls it.
pub fn link_for(surface: &Arc<dyn MovementSurface>) -> (SurfaceLink, Arc<AtomicBool>) {
    let flag = Arc::new(AtomicBool::new(false));
    (SurfaceLink::new(surface, flag.clone(), 32.0), flag)
}

// ── Simulated clock ────────────────────────────────────────────────

/// Advance `actor` at exactly the times it asks for, from `start` until
/// `span` has elapsed. Returns the number of advances made.
pub fn drive_until(
    actor: &mut Actor,
    analysis: &AnalysisResult,
    link: &SurfaceLink,
    start: Instant,
    span: Duration,
) -> usize {
    let end = start + span;
    let mut now = start;
    let mut advances = 0;
    actor.advance(now, analysis, link);
    loop {
        advances += 1;
        // Never stand still, even if an interval rounds to zero.
        now = actor.next_wake().max(now + Duration::from_micros(1));
        if now > end || actor.state() == ActorState::Cancelled {
            return advances;
        }
        actor.advance(now, analysis, link);
    }
}

// ── Invariant checkers ─────────────────────────────────────────────

/// Check every documented field invariant of `analysis` against `grid`.
pub fn check_field(grid: &Grid, analysis: &AnalysisResult) -> Result<(), String> {
    if analysis.shape() != (grid.rows(), grid.cols()) {
        return Err(format!(
            "shape {:?} differs from grid {}x{}",
            analysis.shape(),
            grid.rows(),
            grid.cols()
        ));
    }
    check_raw_field(
        grid,
        analysis.distances(),
        analysis.directions(),
        analysis.reachable(),
    )
}

/// [`check_field`] over row-major distance and direction slices.
pub fn check_raw_field(
    grid: &Grid,
    distances: &[i32],
    directions: &[Direction],
    reachable: bool,
) -> Result<(), String> {
    let cells = grid.rows() * grid.cols();
    if distances.len() != cells || directions.len() != cells {
        return Err(format!(
            "fields hold {} distances and {} directions for {cells} cells",
            distances.len(),
            directions.len()
        ));
    }
    let index = |at: Coord| at.row as usize * grid.cols() + at.col as usize;
    let distance = |at: Coord| grid.contains(at.row, at.col).then(|| distances[index(at)]);
    let direction = |at: Coord| grid.contains(at.row, at.col).then(|| directions[index(at)]);

    let mut saw_unreachable = false;
    for at in grid.coords() {
        let kind = grid.kind(at.row, at.col).ok_or("coords() left the grid")?;
        let dist = distances[index(at)];
        let dir = directions[index(at)];
        let non_wall_neighbours: Vec<Coord> = Heading::ALL
            .into_iter()
            .map(|h| h.step_from(at, 1))
            .filter(|n| grid.kind(n.row, n.col).is_some_and(CellKind::is_passable))
            .collect();

        match kind {
            CellKind::Wall => {
                if dist != -1 || dir != Direction::Wall {
                    return Err(format!("wall {at} has distance {dist}, direction {dir:?}"));
                }
                continue;
            }
            CellKind::Goal => {
                if dist != 0 || dir != Direction::Goal {
                    return Err(format!("goal {at} has distance {dist}, direction {dir:?}"));
                }
            }
            _ => {}
        }

        match dir {
            Direction::Unreachable => {
                saw_unreachable = true;
                if dist != -1 {
                    return Err(format!("unreachable {at} has distance {dist}"));
                }
                for &n in &non_wall_neighbours {
                    if direction(n) != Some(Direction::Unreachable) {
                        return Err(format!("unreachable {at} touches reachable {n}"));
                    }
                }
            }
            Direction::Move(h) => {
                let next = h.step_from(at, 1);
                match distance(next) {
                    Some(d) if d == dist - 1 && grid.kind(next.row, next.col) != Some(CellKind::Wall) => {}
                    other => {
                        return Err(format!(
                            "{at} points {h:?} to {next} with distance {other:?}, expected {}",
                            dist - 1
                        ))
                    }
                }
            }
            Direction::Goal => {
                if kind != CellKind::Goal {
                    return Err(format!("{at} is marked goal but is {kind:?}"));
                }
            }
            Direction::Wall => return Err(format!("floor cell {at} is marked wall")),
        }

        for &n in &non_wall_neighbours {
            let nd = distance(n).unwrap_or(-1);
            if (nd - dist).abs() > 1 {
                return Err(format!("{at}={dist} and neighbour {n}={nd} differ by more than 1"));
            }
        }
    }
    if reachable == saw_unreachable {
        return Err(format!(
            "reachable() is {reachable} but unreachable cells present: {saw_unreachable}"
        ));
    }
    Ok(())
}

/// Check that `path` is a valid route from `start` for `analysis`.
pub fn check_path(
    grid: &Grid,
    analysis: &AnalysisResult,
    start: Coord,
    path: &[Coord],
) -> Result<(), String> {
    let dist = analysis
        .distance(start.row, start.col)
        .ok_or_else(|| format!("{start} is outside the grid"))?;
    if path.len() != dist as usize + 1 {
        return Err(format!("path length {} for distance {dist}", path.len()));
    }
    if path.first() != Some(&start) {
        return Err(format!("path does not begin at {start}"));
    }
    for (i, at) in path.iter().enumerate() {
        if grid.kind(at.row, at.col) == Some(CellKind::Wall) {
            return Err(format!("path crosses wall at {at}"));
        }
        let expected = dist - i as i32;
        if analysis.distance(at.row, at.col) != Some(expected) {
            return Err(format!("{at} at step {i} is not at distance {expected}"));
        }
    }
    for pair in path.windows(2) {
        if !pair[0].is_adjacent(pair[1]) {
            return Err(format!("{} and {} are not adjacent", pair[0], pair[1]));
        }
    }
    match path.last() {
        Some(last) if grid.kind(last.row, last.col) == Some(CellKind::Goal) => Ok(()),
        other => Err(format!("path ends at {other:?}, not a goal")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::analyze;

    #[test]
    fn fixtures_parse() {
        assert_eq!(fixtures::all_mazes().len(), 11);
        fixtures::grid(fixtures::ARENA);
        fixtures::grid(fixtures::SEALED_START);
    }

    #[test]
    fn checker_rejects_tampered_field() {
        let grid = fixtures::grid(fixtures::SIMPLE[0]);
        let good = analyze(&grid);
        check_field(&grid, &good).unwrap();

        let other = analyze(&fixtures::grid("0,0,0,1\n0,-1,-1,0\n0,0,0,0\n"));
        assert!(check_field(&grid, &other).is_err());
    }

    #[test]
    fn recording_surface_bounds_and_refusal() {
        let s = RecordingSurface::new(2, 3);
        assert!(s.is_inside_grid(1, 2));
        assert!(!s.is_inside_grid(2, 0));
        s.set_refusing(true);
        let view = ActorView {
            id: ActorId(1),
            kind: 2,
            row: 0.0,
            col: 0.0,
            goal_reached: false,
            state: ActorState::Deciding,
            score: 0.0,
        };
        assert!(s.actor_moved(&view).is_err());
        s.set_refusing(false);
        s.actor_moved(&view).unwrap();
        assert_eq!(s.latest(ActorId(1)), Some(view));
    }

    #[test]
    fn checker_compares_goal_neighbours() {
        let grid = fixtures::grid("1,0\n");
        check_raw_field(&grid, &[0, 1], &[Direction::Goal, Direction::Move(Heading::Left)], true)
            .unwrap();

        // The goal sits first in row-major order, so its own neighbour
        // comparison is the first to trip.
        let err = check_raw_field(
            &grid,
            &[0, 2],
            &[Direction::Goal, Direction::Move(Heading::Left)],
            true,
        )
        .unwrap_err();
        assert_eq!(err, "(0, 0)=0 and neighbour (0, 1)=2 differ by more than 1");
    }
}
