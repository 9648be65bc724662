//! Teleporting follower.

use maze_core::Coord;
use rand::seq::IndexedRandom;
use rand::Rng;
use smallvec::smallvec;

use super::{follow_default, Behavior, DecisionContext, Plan};
use crate::config::{MotionConfig, TeleportConfig};
use crate::motion::Motion;

/// Follows the field, but now and then shivers, reappears on a random
/// cell far from both the goal and its current spot, and shivers again.
#[derive(Clone, Debug)]
pub struct Teleporter {
    motion: MotionConfig,
    config: TeleportConfig,
}

impl Teleporter {
    /// Create a teleporter.
    pub fn new(motion: MotionConfig, config: TeleportConfig) -> Self {
        Self { motion, config }
    }

    /// Uniform rejection sampling first, then a uniform pick among every
    /// qualifying cell. `None` if nothing qualifies.
    fn pick_target(&self, ctx: &mut DecisionContext<'_>) -> Option<Coord> {
        let analysis = ctx.analysis();
        let here = ctx.cell();
        let clearance = i64::from(self.config.actor_clearance);
        let good = |c: Coord| {
            analysis
                .reachable_distance(c)
                .is_some_and(|d| d > self.config.goal_clearance)
                && here.squared_distance(c) > clearance * clearance
        };

        let (rows, cols) = analysis.shape();
        for _ in 0..self.config.max_attempts {
            let rng = ctx.rng();
            let c = Coord::new(
                rng.random_range(0..rows) as i32,
                rng.random_range(0..cols) as i32,
            );
            if good(c) {
                return Some(c);
            }
        }

        let candidates: Vec<Coord> = analysis
            .reachable_cells()
            .map(|(c, _)| c)
            .filter(|&c| good(c))
            .collect();
        candidates.choose(ctx.rng()).copied()
    }
}

impl Behavior for Teleporter {
    fn name(&self) -> &'static str {
        "teleporter"
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Plan {
        if !ctx.in_goal() && ctx.roll(self.config.teleport_prob) {
            if let Some(to) = self.pick_target(ctx) {
                tracing::debug!(actor = %ctx.actor(), from = %ctx.cell(), to = %to, "teleport");
                let shiver = Motion::Shiver {
                    seconds: self.config.shiver_seconds,
                };
                return smallvec![shiver, Motion::Relocate { to }, shiver];
            }
        }
        follow_default(ctx, &self.motion)
    }
}
