//! Wall-vaulting follower.

use maze_core::{Direction, Heading};
use smallvec::smallvec;

use super::{follow_default, Behavior, DecisionContext, Plan};
use crate::config::{MotionConfig, VaultConfig};
use crate::motion::Motion;

/// Follows the field, but vaults over a single wall when landing two cells
/// away is a real shortcut that does not end too close to a goal.
#[derive(Clone, Debug)]
pub struct Jumper {
    motion: MotionConfig,
    config: VaultConfig,
    steps_without_vault: u32,
}

impl Jumper {
    /// Create a jumper.
    pub fn new(motion: MotionConfig, config: VaultConfig) -> Self {
        Self {
            motion,
            config,
            steps_without_vault: 0,
        }
    }

    /// Decisions taken since the last vault.
    pub fn steps_without_vault(&self) -> u32 {
        self.steps_without_vault
    }

    /// First heading, in discovery order, with a worthwhile vault.
    fn pick_vault(&self, ctx: &DecisionContext<'_>) -> Option<Heading> {
        ctx.direction()?;
        let analysis = ctx.analysis();
        let here = ctx.cell();
        let source = analysis.reachable_distance(here)?;
        Heading::ALL.into_iter().find(|&h| {
            let landing = h.step_from(here, 2);
            let Some(target) = analysis.reachable_distance(landing) else {
                return false;
            };
            let over = h.step_from(here, 1);
            source > target
                && source - target > self.config.min_gain
                && target > self.config.min_goal_distance
                && analysis.direction(over.row, over.col) == Some(Direction::Wall)
        })
    }
}

impl Behavior for Jumper {
    fn name(&self) -> &'static str {
        "jumper"
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Plan {
        self.steps_without_vault = self.steps_without_vault.saturating_add(1);

        if let Some(h) = self.pick_vault(ctx) {
            if self.steps_without_vault > self.config.min_steps_between
                && ctx.roll(self.config.vault_prob)
            {
                self.steps_without_vault = 0;
                tracing::debug!(actor = %ctx.actor(), from = %ctx.cell(), heading = ?h, "vault");
                return smallvec![Motion::vault(h, self.config.vault_seconds)];
            }
        }
        follow_default(ctx, &self.motion)
    }
}
