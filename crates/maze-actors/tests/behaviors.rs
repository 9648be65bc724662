//! Actors running on a simulated clock against recorded surfaces.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use maze_actors::{Actor, ActorId, ActorState, BehaviorConfig, BehaviorKind, MovementSurface};
use maze_core::{analyze, Coord, Grid};
use maze_test_utils::{drive_until, fixtures, link_for, RecordingSurface};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn spawn(kind: BehaviorKind, config: &BehaviorConfig, at: Coord, seed: u64, now: Instant) -> Actor {
    Actor::new(
        ActorId(seed as u32),
        2,
        at,
        kind.build(config),
        ChaCha8Rng::seed_from_u64(seed),
        now,
    )
}

fn surface_for(grid: &Grid) -> (Arc<RecordingSurface>, Arc<dyn MovementSurface>) {
    let recording = Arc::new(RecordingSurface::for_grid(grid));
    let surface: Arc<dyn MovementSurface> = recording.clone();
    (recording, surface)
}

#[test]
fn every_behaviour_reaches_the_arena_goal() {
    let grid = fixtures::grid(fixtures::ARENA);
    let analysis = analyze(&grid);
    // No random detours, so arrival time is bounded by the path length.
    let mut config = BehaviorConfig::default();
    config.teleport.teleport_prob = 0.0;
    config.scatter.mess_up_prob = 0.0;

    for kind in BehaviorKind::ALL {
        for marker in grid.start_markers() {
            let (_recording, surface) = surface_for(&grid);
            let (link, _flag) = link_for(&surface);
            let t0 = Instant::now();
            let mut actor = spawn(kind, &config, marker.at, 7, t0);
            drive_until(&mut actor, &analysis, &link, t0, Duration::from_secs(40));
            assert!(
                actor.goal_reached(),
                "{kind} from {} ended at {:?}",
                marker.at,
                actor.position()
            );
            assert_eq!(actor.cell(), Coord::new(0, 0));
        }
    }
}

#[test]
fn teleporter_never_lands_near_a_goal() {
    let mut grid = Grid::new(16, 16).unwrap();
    grid.set(8, 8, 1).unwrap();
    let analysis = analyze(&grid);
    let mut config = BehaviorConfig::default();
    config.teleport.teleport_prob = 0.5;

    let (recording, surface) = surface_for(&grid);
    let (link, _flag) = link_for(&surface);
    let t0 = Instant::now();
    let mut teleports = 0;
    for seed in 0..8 {
        let mut actor = spawn(BehaviorKind::Teleporter, &config, Coord::new(0, 0), seed, t0);
        drive_until(&mut actor, &analysis, &link, t0, Duration::from_secs(60));
    }

    let moves = recording.moves();
    for pair in moves.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.id != b.id {
            continue;
        }
        let jump = (a.row - b.row).powi(2) + (a.col - b.col).powi(2);
        if jump > 4.0 {
            teleports += 1;
            assert_eq!(b.row.fract(), 0.0);
            assert_eq!(b.col.fract(), 0.0);
            let d = analysis.distance(b.row as i32, b.col as i32).unwrap();
            assert!(d > 5, "teleported to ({}, {}) at distance {d}", b.row, b.col);
            assert!(jump > 25.0 - 2.0, "teleport of only {jump}");
        }
    }
    assert!(teleports > 0, "no teleport observed");
}

#[test]
fn jumper_shortcuts_the_hairpin() {
    let grid = fixtures::grid(fixtures::ARENA);
    let analysis = analyze(&grid);
    let start = Coord::new(4, 4);
    let t0 = Instant::now();

    let mut finish = Vec::new();
    for kind in [BehaviorKind::Basic, BehaviorKind::Jumper] {
        let (_recording, surface) = surface_for(&grid);
        let (link, _flag) = link_for(&surface);
        let mut actor = spawn(kind, &BehaviorConfig::default(), start, 1, t0);
        let mut now = t0;
        while !actor.goal_reached() && now < t0 + Duration::from_secs(60) {
            actor.advance(now, &analysis, &link);
            now = actor.next_wake().max(now + Duration::from_micros(1));
        }
        finish.push(now);
    }
    assert!(finish[1] < finish[0], "jumper was not faster: {finish:?}");
}

#[test]
fn speedy_beats_basic() {
    let grid = fixtures::grid(fixtures::SIMPLE[0]);
    let analysis = analyze(&grid);
    let start = Coord::new(2, 3);
    let t0 = Instant::now();

    let mut scores = Vec::new();
    for kind in [BehaviorKind::Basic, BehaviorKind::Speedy] {
        let (_recording, surface) = surface_for(&grid);
        let (link, _flag) = link_for(&surface);
        let mut actor = spawn(kind, &BehaviorConfig::default(), start, 3, t0);
        let mut now = t0;
        while !actor.goal_reached() {
            actor.advance(now, &analysis, &link);
            now = actor.next_wake().max(now + Duration::from_micros(1));
        }
        scores.push(actor.score());
    }
    // Five steps each.
    assert!((scores[0] - 5.0).abs() < 1e-9);
    assert!((scores[1] - 1.25).abs() < 1e-9);
}

#[test]
fn cancelled_link_silences_the_actor() {
    let grid = fixtures::grid(fixtures::SIMPLE[1]);
    let analysis = analyze(&grid);
    let (recording, surface) = surface_for(&grid);
    let (link, flag) = link_for(&surface);
    let t0 = Instant::now();
    let mut actor = spawn(BehaviorKind::Scatterbrain, &BehaviorConfig::default(), Coord::new(0, 0), 9, t0);

    drive_until(&mut actor, &analysis, &link, t0, Duration::from_secs(2));
    let before = recording.count();
    assert!(before > 0);

    flag.store(true, Ordering::Release);
    drive_until(&mut actor, &analysis, &link, t0 + Duration::from_secs(2), Duration::from_secs(5));
    assert_eq!(actor.state(), ActorState::Cancelled);
    assert_eq!(recording.count(), before);
}

#[test]
fn refused_notifications_do_not_stop_the_actor() {
    let grid = fixtures::grid(fixtures::SIMPLE[0]);
    let analysis = analyze(&grid);
    let (recording, surface) = surface_for(&grid);
    recording.set_refusing(true);
    let (link, _flag) = link_for(&surface);
    let t0 = Instant::now();
    let mut actor = spawn(BehaviorKind::Basic, &BehaviorConfig::default(), Coord::new(2, 3), 0, t0);
    drive_until(&mut actor, &analysis, &link, t0, Duration::from_secs(8));
    assert!(actor.goal_reached());
    assert_eq!(recording.count(), 0);
}
