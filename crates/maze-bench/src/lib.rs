//! Benchmark grids for maze analysis and actors.
//!
//! - [`open_field`]: no walls, one goal in the centre
//! - [`serpentine`]: a single winding corridor, the longest possible paths
//! - [`scattered`]: random walls at a given density, deterministic via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use maze_core::Grid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A `rows` x `cols` grid of free floor with one goal in the middle.
pub fn open_field(rows: usize, cols: usize) -> Grid {
    let mut cells = vec![0; rows * cols];
    cells[(rows / 2) * cols + cols / 2] = 1;
    Grid::from_vec(rows, cols, cells).unwrap()
}

/// A corridor that winds row by row, goal at the top-left and a start
/// marker at the far end.
///
/// Every odd row is a wall with a single gap, alternating sides.
pub fn serpentine(rows: usize, cols: usize) -> Grid {
    let mut cells = vec![0; rows * cols];
    for r in (1..rows).step_by(2) {
        let gap = if (r / 2) % 2 == 0 { cols - 1 } else { 0 };
        for c in 0..cols {
            if c != gap {
                cells[r * cols + c] = -1;
            }
        }
    }
    cells[0] = 1;
    let last_row = if rows % 2 == 0 { rows - 2 } else { rows - 1 };
    let far_col = if (last_row / 2) % 2 == 0 { cols - 1 } else { 0 };
    cells[last_row * cols + far_col] = 2;
    Grid::from_vec(rows, cols, cells).unwrap()
}

/// Random walls with probability `density`, goals with probability
/// 1/1000 (at least one, at the top-left).
pub fn scattered(rows: usize, cols: usize, density: f64, seed: u64) -> Grid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut cells: Vec<i32> = (0..rows * cols)
        .map(|_| {
            let u = rng.random::<f64>();
            if u < density {
                -1
            } else if u < density + 0.001 {
                1
            } else {
                0
            }
        })
        .collect();
    cells[0] = 1;
    Grid::from_vec(rows, cols, cells).unwrap()
}
