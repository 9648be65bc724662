//! Decision policies layered over the base "follow the field" rule.
//!
//! A [`Behavior`] is consulted whenever its actor has nothing left to
//! animate. It reads the analysis through a [`DecisionContext`] and returns
//! a short [`Plan`]. Decisions never block.

mod basic;
mod scatter;
mod speed;
mod teleport;
mod wall_jump;

use std::fmt;
use std::str::FromStr;

use maze_core::{AnalysisResult, Coord, Direction};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use smallvec::{smallvec, SmallVec};

use crate::config::{BehaviorConfig, MotionConfig};
use crate::id::ActorId;
use crate::motion::Motion;

pub use basic::Basic;
pub use scatter::Scatterbrain;
pub use speed::{Accelerator, Speedy};
pub use teleport::Teleporter;
pub use wall_jump::Jumper;

/// Motions to perform, in order, before the next decision.
pub type Plan = SmallVec<[Motion; 3]>;

/// Read-only view of the maze plus the actor's RNG for one decision.
pub struct DecisionContext<'a> {
    actor: ActorId,
    analysis: &'a AnalysisResult,
    cell: Coord,
    inside: bool,
    rng: &'a mut ChaCha8Rng,
}

impl<'a> DecisionContext<'a> {
    /// Context for an actor standing on `cell`. `inside` is the host's
    /// bounds verdict; cells outside the analysis count as outside anyway.
    pub fn new(
        actor: ActorId,
        analysis: &'a AnalysisResult,
        cell: Coord,
        inside: bool,
        rng: &'a mut ChaCha8Rng,
    ) -> Self {
        let inside = inside && analysis.contains(cell.row, cell.col);
        Self {
            actor,
            analysis,
            cell,
            inside,
            rng,
        }
    }

    /// The deciding actor.
    pub fn actor(&self) -> ActorId {
        self.actor
    }

    /// The shared analysis.
    pub fn analysis(&self) -> &'a AnalysisResult {
        self.analysis
    }

    /// The actor's integer cell.
    pub fn cell(&self) -> Coord {
        self.cell
    }

    /// Direction entry under the actor, `None` off the grid.
    pub fn direction(&self) -> Option<Direction> {
        if !self.inside {
            return None;
        }
        self.analysis.direction(self.cell.row, self.cell.col)
    }

    /// Whether the actor stands on a goal.
    pub fn in_goal(&self) -> bool {
        self.direction() == Some(Direction::Goal)
    }

    /// Uniform draw in `[0, 1)` compared against `prob`.
    pub fn roll(&mut self, prob: f64) -> bool {
        self.rng.random::<f64>() < prob
    }

    /// The actor's RNG.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut *self.rng
    }
}

/// A movement policy.
pub trait Behavior: Send {
    /// Registry name, e.g. `"jumper"`.
    fn name(&self) -> &'static str;

    /// Choose what to animate next. Must return at least one timed motion.
    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Plan;
}

/// The base rule: step along the field, bounce otherwise.
pub(crate) fn follow_field(direction: Option<Direction>, step_seconds: f64, hop_seconds: f64) -> Plan {
    match direction.and_then(Direction::heading) {
        Some(h) => smallvec![Motion::step(h, step_seconds)],
        None => smallvec![Motion::Hop {
            seconds: hop_seconds
        }],
    }
}

pub(crate) fn follow_default(ctx: &DecisionContext<'_>, motion: &MotionConfig) -> Plan {
    follow_field(ctx.direction(), motion.step_seconds, motion.hop_seconds)
}

// ── Registry ───────────────────────────────────────────────────────

/// The named behaviour variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    /// Follow the field.
    Basic,
    /// Follow the field with a constant faster step.
    Speedy,
    /// Follow the field, speeding up at random.
    Accelerator,
    /// Vault over single walls.
    Jumper,
    /// Teleport at random.
    Teleporter,
    /// Wander off course at random.
    Scatterbrain,
}

impl BehaviorKind {
    /// Every variant, in registry order.
    pub const ALL: [BehaviorKind; 6] = [
        BehaviorKind::Basic,
        BehaviorKind::Speedy,
        BehaviorKind::Accelerator,
        BehaviorKind::Jumper,
        BehaviorKind::Teleporter,
        BehaviorKind::Scatterbrain,
    ];

    /// Registry name.
    pub const fn name(self) -> &'static str {
        match self {
            BehaviorKind::Basic => "basic",
            BehaviorKind::Speedy => "speedy",
            BehaviorKind::Accelerator => "accelerator",
            BehaviorKind::Jumper => "jumper",
            BehaviorKind::Teleporter => "teleporter",
            BehaviorKind::Scatterbrain => "scatterbrain",
        }
    }

    /// Instantiate the policy with `config`'s tunables.
    pub fn build(self, config: &BehaviorConfig) -> Box<dyn Behavior> {
        let motion = config.motion.clone();
        match self {
            BehaviorKind::Basic => Box::new(Basic::new(motion)),
            BehaviorKind::Speedy => Box::new(Speedy::new(motion, config.speed.clone())),
            BehaviorKind::Accelerator => {
                Box::new(Accelerator::new(motion, config.acceleration.clone()))
            }
            BehaviorKind::Jumper => Box::new(Jumper::new(motion, config.vault.clone())),
            BehaviorKind::Teleporter => Box::new(Teleporter::new(motion, config.teleport.clone())),
            BehaviorKind::Scatterbrain => {
                Box::new(Scatterbrain::new(motion, config.scatter.clone()))
            }
        }
    }
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A behaviour name that is not in the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownBehavior(pub String);

impl fmt::Display for UnknownBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown behaviour '{}'", self.0)
    }
}

impl std::error::Error for UnknownBehavior {}

impl FromStr for BehaviorKind {
    type Err = UnknownBehavior;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BehaviorKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownBehavior(s.to_string()))
    }
}
