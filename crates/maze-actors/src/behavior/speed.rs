//! Speed-modified followers.

use super::{follow_field, Behavior, DecisionContext, Plan};
use crate::config::{AccelerationConfig, MotionConfig, SpeedConfig};

/// Follows the field with every step shortened by a constant factor.
#[derive(Clone, Debug)]
pub struct Speedy {
    motion: MotionConfig,
    speed: SpeedConfig,
}

impl Speedy {
    /// Create a speedy follower.
    pub fn new(motion: MotionConfig, speed: SpeedConfig) -> Self {
        Self { motion, speed }
    }
}

impl Behavior for Speedy {
    fn name(&self) -> &'static str {
        "speedy"
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Plan {
        follow_field(
            ctx.direction(),
            self.motion.step_seconds * self.speed.speed_factor,
            self.motion.hop_seconds,
        )
    }
}

/// Follows the field; before each step there is a chance the step
/// multiplier drops for good, down to a floor.
#[derive(Clone, Debug)]
pub struct Accelerator {
    motion: MotionConfig,
    config: AccelerationConfig,
    factor: f64,
}

impl Accelerator {
    /// Create an accelerator starting at `config.initial_factor`.
    pub fn new(motion: MotionConfig, config: AccelerationConfig) -> Self {
        let factor = config.initial_factor;
        Self {
            motion,
            config,
            factor,
        }
    }

    /// Current step-duration multiplier.
    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl Behavior for Accelerator {
    fn name(&self) -> &'static str {
        "accelerator"
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Plan {
        let direction = ctx.direction();
        // Only actual steps get a chance to accelerate.
        if direction.and_then(|d| d.heading()).is_some()
            && self.factor > self.config.min_factor
            && ctx.roll(self.config.accelerate_prob)
        {
            self.factor = (self.factor - self.config.accelerate_step).max(self.config.min_factor);
            tracing::debug!(actor = %ctx.actor(), factor = self.factor, "accelerated");
        }
        follow_field(
            direction,
            self.motion.step_seconds * self.factor,
            self.motion.hop_seconds,
        )
    }
}
