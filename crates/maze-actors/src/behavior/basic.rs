use super::{follow_default, Behavior, DecisionContext, Plan};
use crate::config::MotionConfig;

/// Follows the direction field; bounces on goals, walls and dead cells.
#[derive(Clone, Debug, Default)]
pub struct Basic {
    motion: MotionConfig,
}

impl Basic {
    /// Create a basic follower.
    pub fn new(motion: MotionConfig) -> Self {
        Self { motion }
    }
}

impl Behavior for Basic {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Plan {
        follow_default(ctx, &self.motion)
    }
}
