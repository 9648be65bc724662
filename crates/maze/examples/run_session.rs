//! Run a maze session in the terminal.
//!
//! ```text
//! cargo run -p maze --example run_session -- [MAZE_FILE] [SECONDS]
//! ```
//!
//! The maze file uses the text grid format (one row per line, cells
//! separated by commas or whitespace). Without one, a built-in arena with
//! one actor of every behaviour is used. Set `RUST_LOG=debug` to see
//! vaults, teleports and other policy decisions.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use maze::prelude::*;
use tracing_subscriber::EnvFilter;

const ARENA: &str = "\
1,0,0,0,0,0,0,0,0,0,0,0
0,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,0
0,0,0,0,0,0,0,0,0,0,0,0
-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,0
0,0,0,0,0,0,0,0,0,0,0,0
0,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1
2,0,3,0,4,0,5,0,6,0,7,0
";

/// Keeps the latest view of every actor for the render loop.
struct Terminal {
    rows: usize,
    cols: usize,
    latest: Mutex<BTreeMap<ActorId, ActorView>>,
}

impl MovementSurface for Terminal {
    fn actor_moved(&self, actor: &ActorView) -> Result<(), SurfaceError> {
        let mut latest = self.latest.lock().map_err(|_| SurfaceError::Gone)?;
        latest.insert(actor.id, actor.clone());
        Ok(())
    }

    fn cell_time_scale(&self) -> f64 {
        32.0
    }

    fn is_inside_grid(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }
}

fn frame(grid: &Grid, terminal: &Terminal) -> String {
    let mut cells: Vec<Vec<char>> = (0..grid.rows() as i32)
        .map(|r| {
            (0..grid.cols() as i32)
                .map(|c| match grid.kind(r, c) {
                    Some(CellKind::Wall) => '#',
                    Some(CellKind::Goal) => '*',
                    _ => '.',
                })
                .collect()
        })
        .collect();
    if let Ok(latest) = terminal.latest.lock() {
        for view in latest.values() {
            let (r, c) = (view.row.round() as usize, view.col.round() as usize);
            if let Some(cell) = cells.get_mut(r).and_then(|row| row.get_mut(c)) {
                *cell = char::from_digit(view.kind as u32 % 10, 10).unwrap_or('@');
            }
        }
    }
    cells
        .into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let text = match args.next() {
        Some(path) => std::fs::read_to_string(path)?,
        None => ARENA.to_string(),
    };
    let seconds: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => 20,
    };

    let grid: Grid = text.parse()?;
    let analysis = Arc::new(analyze(&grid));
    println!("{}", analysis.render());

    let terminal = Arc::new(Terminal {
        rows: grid.rows(),
        cols: grid.cols(),
        latest: Mutex::new(BTreeMap::new()),
    });
    let surface: Arc<dyn MovementSurface> = terminal.clone();
    let mut session = ActorScheduler::start(&grid, analysis, &surface, SessionConfig::default())?;

    let end = Instant::now() + Duration::from_secs(seconds);
    while Instant::now() < end {
        println!("{}\n", frame(&grid, &terminal));
        let views = session.snapshot()?;
        if views.iter().all(|v| v.goal_reached) {
            break;
        }
        thread::sleep(Duration::from_millis(500));
    }

    let report = session.cancel();
    println!("{}", frame(&grid, &terminal));
    println!(
        "\n{} of {} actors reached a goal (cancelled in {} ms)",
        report.goals_reached,
        report.actors.len(),
        report.total_ms
    );
    for view in &report.actors {
        println!(
            "  actor {} kind {}: ({:.1}, {:.1}) animated {:.1}s",
            view.id, view.kind, view.row, view.col, view.score
        );
    }
    Ok(())
}
