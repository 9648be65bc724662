//! Fixture mazes in the text grid format.
//!
//! Three families:
//!
//! - [`SIMPLE`]: one goal, ordinary corridors and rooms.
//! - [`BOUNDS`]: degenerate shapes and goals pressed against the border.
//! - [`MULTIGOAL`]: several goals competing for the same cells.
//!
//! Some fixtures are written with float tokens, the way numeric matrix
//! writers save them.

use maze_core::Grid;

pub const SIMPLE: [&str; 3] = [
    "1,0,0,0\n\
     0,-1,-1,0\n\
     0,0,0,0\n",
    "0,0,0,0,0,0,0,0\n\
     0,-1,-1,-1,-1,-1,-1,0\n\
     0,-1,0,0,0,0,-1,0\n\
     0,-1,0,-1,-1,0,-1,0\n\
     0,-1,0,-1,1,0,-1,0\n\
     0,-1,0,-1,-1,-1,-1,0\n\
     0,0,0,-1,0,0,0,0\n\
     -1,-1,0,0,0,-1,-1,-1\n",
    "1.0,0.0,-1.0,0.0,0.0\n\
     0.0,0.0,-1.0,0.0,0.0\n\
     -1.0,-1.0,-1.0,0.0,0.0\n\
     0.0,0.0,0.0,-1.0,-1.0\n",
];

pub const BOUNDS: [&str; 4] = ["1\n", "0,0,0,0,1,0,0\n", "0\n0\n0\n1\n", "-1,-1,-1\n-1,1,0\n-1,-1,0\n"];

pub const MULTIGOAL: [&str; 4] = [
    "1,0,0,0,1\n",
    "1,0,0\n0,0,0\n0,0,1\n",
    "0,0,0,-1,0,0,0\n\
     0,1,0,-1,0,1,0\n\
     0,0,0,0,0,0,0\n\
     -1,-1,0,-1,0,-1,-1\n\
     0,0,0,1,0,0,0\n",
    "1,-1,0,0\n\
     0,-1,0,-1\n\
     0,0,0,1\n\
     -1,-1,-1,-1\n\
     0,0,0,0\n",
];

/// A session maze with one start marker of every kind from 2 to 7, all
/// reachable.
pub const ARENA: &str = "\
1,0,0,0,0,0,0,0,0,0
0,-1,-1,-1,-1,-1,-1,-1,-1,0
0,0,0,0,0,0,0,0,0,0
-1,-1,-1,-1,-1,-1,-1,-1,-1,0
2,0,3,0,4,0,5,0,6,7
";

/// A session maze whose only marker sits in a sealed pocket.
pub const SEALED_START: &str = "\
1,0,-1,0
0,0,-1,2
";

/// A session maze without any start marker.
pub const NO_MARKERS: &str = "1,0\n0,0\n";

/// Every analysis fixture as `(family, number, grid)`, numbered from 1.
pub fn all_mazes() -> Vec<(&'static str, usize, Grid)> {
    let families: [(&'static str, &[&str]); 3] = [
        ("simple", &SIMPLE),
        ("bounds", &BOUNDS),
        ("multigoal", &MULTIGOAL),
    ];
    let mut out = Vec::new();
    for (family, texts) in families {
        for (i, text) in texts.iter().enumerate() {
            let grid = text
                .parse::<Grid>()
                .unwrap_or_else(|e| panic!("fixture {family}/{:02} is malformed: {e}", i + 1));
            out.push((family, i + 1, grid));
        }
    }
    out
}

/// Parse a fixture, panicking with its text on failure.
pub fn grid(text: &str) -> Grid {
    text.parse()
        .unwrap_or_else(|e| panic!("bad fixture ({e}):\n{text}"))
}
