//! Scatterbrained follower.

use maze_core::{Direction, Heading};
use rand::seq::IndexedRandom;
use smallvec::{smallvec, SmallVec};

use super::{follow_default, Behavior, DecisionContext, Plan};
use crate::config::{MotionConfig, ScatterConfig};
use crate::motion::Motion;

/// Follows the field, but sometimes turns sideways into any reachable
/// neighbour, or backs up when there is no side turn.
#[derive(Clone, Debug)]
pub struct Scatterbrain {
    motion: MotionConfig,
    config: ScatterConfig,
}

impl Scatterbrain {
    /// Create a scatterbrain.
    pub fn new(motion: MotionConfig, config: ScatterConfig) -> Self {
        Self { motion, config }
    }

    fn mess_up(&self, ctx: &mut DecisionContext<'_>, heading: Heading) -> Heading {
        let analysis = ctx.analysis();
        let here = ctx.cell();
        let sideways: SmallVec<[Heading; 4]> = analysis
            .neighbours(here)
            .into_iter()
            .filter(|&(h, n)| {
                h != heading && h != heading.reverse() && analysis.reachable_distance(n).is_some()
            })
            .map(|(h, _)| h)
            .collect();
        if let Some(&h) = sideways.choose(ctx.rng()) {
            return h;
        }
        let back = heading.reverse().step_from(here, 1);
        match analysis.direction(back.row, back.col) {
            Some(d) if d != Direction::Wall => heading.reverse(),
            _ => heading,
        }
    }
}

impl Behavior for Scatterbrain {
    fn name(&self) -> &'static str {
        "scatterbrain"
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Plan {
        let messed = ctx.roll(self.config.mess_up_prob);
        match ctx.direction().and_then(Direction::heading) {
            Some(intended) if messed => {
                let chosen = self.mess_up(ctx, intended);
                tracing::debug!(actor = %ctx.actor(), ?intended, ?chosen, "scattered");
                smallvec![Motion::step(chosen, self.motion.step_seconds)]
            }
            _ => follow_default(ctx, &self.motion),
        }
    }
}
