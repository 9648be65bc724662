//! Behaviour tunables, validation, and error types.
//!
//! Every struct's [`Default`] reproduces the classic game's constants.
//! [`BehaviorConfig::validate`] checks ranges once, before any actor is
//! built, so behaviours can use the values without re-checking.

use std::error::Error;
use std::fmt;

// ── MotionConfig ───────────────────────────────────────────────────

/// Base animation timings shared by every behaviour.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    /// Seconds to slide one cell. Default: 1.0.
    pub step_seconds: f64,
    /// Seconds of one in-place bounce. Default: 0.2.
    pub hop_seconds: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            step_seconds: 1.0,
            hop_seconds: 0.2,
        }
    }
}

// ── SpeedConfig ────────────────────────────────────────────────────

/// Constant speed-up for `speedy` actors.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeedConfig {
    /// Multiplier applied to the step duration. Default: 0.25.
    pub speed_factor: f64,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self { speed_factor: 0.25 }
    }
}

// ── AccelerationConfig ─────────────────────────────────────────────

/// Gradual speed-up for `accelerator` actors.
#[derive(Clone, Debug, PartialEq)]
pub struct AccelerationConfig {
    /// Step-duration multiplier at spawn. Default: 1.0.
    pub initial_factor: f64,
    /// Floor for the multiplier. Default: 0.2.
    pub min_factor: f64,
    /// Chance per step of lowering the multiplier. Default: 0.1.
    pub accelerate_prob: f64,
    /// Amount the multiplier drops each time. Default: 0.2.
    pub accelerate_step: f64,
}

impl Default for AccelerationConfig {
    fn default() -> Self {
        Self {
            initial_factor: 1.0,
            min_factor: 0.2,
            accelerate_prob: 0.1,
            accelerate_step: 0.2,
        }
    }
}

// ── VaultConfig ────────────────────────────────────────────────────

/// Wall-vaulting for `jumper` actors.
#[derive(Clone, Debug, PartialEq)]
pub struct VaultConfig {
    /// Chance of taking an available vault. Default: 1.0.
    pub vault_prob: f64,
    /// Decisions that must pass since the last vault, exclusive. Default: 0.
    pub min_steps_between: u32,
    /// The landing cell must be strictly farther than this from a goal.
    /// Default: 5.
    pub min_goal_distance: i32,
    /// The vault must save strictly more than this many hops. Default: 0.
    pub min_gain: i32,
    /// Seconds per vault. Default: 1.0.
    pub vault_seconds: f64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            vault_prob: 1.0,
            min_steps_between: 0,
            min_goal_distance: 5,
            min_gain: 0,
            vault_seconds: 1.0,
        }
    }
}

// ── TeleportConfig ─────────────────────────────────────────────────

/// Random relocation for `teleporter` actors.
#[derive(Clone, Debug, PartialEq)]
pub struct TeleportConfig {
    /// Chance per decision of teleporting. Default: 0.2.
    pub teleport_prob: f64,
    /// The destination must be strictly farther than this from a goal.
    /// Default: 5.
    pub goal_clearance: i32,
    /// The destination must be strictly farther than this, in Euclidean
    /// cells, from the current cell. Default: 5.
    pub actor_clearance: i32,
    /// Seconds of each shiver around the jump. Default: 0.5.
    pub shiver_seconds: f64,
    /// Uniform draws before falling back to an exhaustive pick. Default: 64.
    pub max_attempts: u32,
}

impl Default for TeleportConfig {
    fn default() -> Self {
        Self {
            teleport_prob: 0.2,
            goal_clearance: 5,
            actor_clearance: 5,
            shiver_seconds: 0.5,
            max_attempts: 64,
        }
    }
}

// ── ScatterConfig ──────────────────────────────────────────────────

/// Misdirection for `scatterbrain` actors.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterConfig {
    /// Chance per decision of ignoring the field. Default: 0.25.
    pub mess_up_prob: f64,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self { mess_up_prob: 0.25 }
    }
}

// ── BehaviorConfig ─────────────────────────────────────────────────

/// All behaviour tunables.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BehaviorConfig {
    /// Shared timings.
    pub motion: MotionConfig,
    /// `speedy`.
    pub speed: SpeedConfig,
    /// `accelerator`.
    pub acceleration: AccelerationConfig,
    /// `jumper`.
    pub vault: VaultConfig,
    /// `teleporter`.
    pub teleport: TeleportConfig,
    /// `scatterbrain`.
    pub scatter: ScatterConfig,
}

fn check_prob(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}

/// Longest accepted animation, in seconds (about eleven days).
pub const MAX_SECONDS: f64 = 1e6;

fn check_seconds(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= MAX_SECONDS {
        Ok(())
    } else {
        Err(ConfigError::InvalidDuration { name, value })
    }
}

fn check_distance(name: &'static str, value: i32) -> Result<(), ConfigError> {
    if value >= 0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDistance { name, value })
    }
}

fn check_factor(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidFactor { name, value })
    }
}

impl BehaviorConfig {
    /// Check every tunable's range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_seconds("motion.step_seconds", self.motion.step_seconds)?;
        check_seconds("motion.hop_seconds", self.motion.hop_seconds)?;

        check_factor("speed.speed_factor", self.speed.speed_factor)?;

        let acc = &self.acceleration;
        check_factor("acceleration.initial_factor", acc.initial_factor)?;
        check_factor("acceleration.min_factor", acc.min_factor)?;
        check_prob("acceleration.accelerate_prob", acc.accelerate_prob)?;
        if !acc.accelerate_step.is_finite() || acc.accelerate_step < 0.0 {
            return Err(ConfigError::InvalidFactor {
                name: "acceleration.accelerate_step",
                value: acc.accelerate_step,
            });
        }
        if acc.min_factor > acc.initial_factor {
            return Err(ConfigError::Inconsistent {
                reason: format!(
                    "acceleration.min_factor {} exceeds initial_factor {}",
                    acc.min_factor, acc.initial_factor
                ),
            });
        }

        check_prob("vault.vault_prob", self.vault.vault_prob)?;
        check_seconds("vault.vault_seconds", self.vault.vault_seconds)?;
        check_distance("vault.min_goal_distance", self.vault.min_goal_distance)?;

        check_prob("teleport.teleport_prob", self.teleport.teleport_prob)?;
        check_seconds("teleport.shiver_seconds", self.teleport.shiver_seconds)?;
        check_distance("teleport.goal_clearance", self.teleport.goal_clearance)?;
        check_distance("teleport.actor_clearance", self.teleport.actor_clearance)?;

        check_prob("scatter.mess_up_prob", self.scatter.mess_up_prob)?;
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// A behaviour tunable is out of range.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A probability lies outside `[0, 1]` or is NaN.
    InvalidProbability {
        /// Dotted field name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A duration is not in `(0, MAX_SECONDS]`.
    InvalidDuration {
        /// Dotted field name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A cell-count threshold is negative.
    InvalidDistance {
        /// Dotted field name.
        name: &'static str,
        /// The rejected value.
        value: i32,
    },
    /// A speed multiplier is zero, negative, or not finite.
    InvalidFactor {
        /// Dotted field name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Two tunables contradict each other.
    Inconsistent {
        /// Description of the conflict.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProbability { name, value } => {
                write!(f, "{name} must be a probability in [0, 1], got {value}")
            }
            Self::InvalidDuration { name, value } => {
                write!(f, "{name} must be in (0, {MAX_SECONDS}] seconds, got {value}")
            }
            Self::InvalidDistance { name, value } => {
                write!(f, "{name} must be zero or more cells, got {value}")
            }
            Self::InvalidFactor { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            Self::Inconsistent { reason } => write!(f, "inconsistent behaviour config: {reason}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        BehaviorConfig::default().validate().unwrap();
    }

    #[test]
    fn probability_out_of_range() {
        let mut c = BehaviorConfig::default();
        c.teleport.teleport_prob = 1.5;
        assert_eq!(
            c.validate(),
            Err(ConfigError::InvalidProbability {
                name: "teleport.teleport_prob",
                value: 1.5
            })
        );
    }

    #[test]
    fn nan_probability_rejected() {
        let mut c = BehaviorConfig::default();
        c.scatter.mess_up_prob = f64::NAN;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn zero_duration_rejected() {
        let mut c = BehaviorConfig::default();
        c.motion.hop_seconds = 0.0;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidDuration {
                name: "motion.hop_seconds",
                ..
            })
        ));
    }

    #[test]
    fn zero_speed_factor_rejected() {
        let mut c = BehaviorConfig::default();
        c.speed.speed_factor = 0.0;
        assert!(c.validate().is_err());
        let mut c = BehaviorConfig::default();
        c.acceleration.min_factor = 0.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn min_factor_above_initial_rejected() {
        let mut c = BehaviorConfig::default();
        c.acceleration.min_factor = 2.0;
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("min_factor"));
    }

    #[test]
    fn overlong_duration_rejected() {
        let mut c = BehaviorConfig::default();
        c.motion.step_seconds = 1e21;
        assert_eq!(
            c.validate(),
            Err(ConfigError::InvalidDuration {
                name: "motion.step_seconds",
                value: 1e21
            })
        );
        c.motion.step_seconds = MAX_SECONDS;
        c.validate().unwrap();
        c.vault.vault_seconds = f64::INFINITY;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidDuration { name: "vault.vault_seconds", .. })
        ));
    }

    #[test]
    fn negative_vault_distance_rejected() {
        let mut c = BehaviorConfig::default();
        c.vault.min_goal_distance = -2;
        assert_eq!(
            c.validate(),
            Err(ConfigError::InvalidDistance {
                name: "vault.min_goal_distance",
                value: -2
            })
        );
        c.vault.min_goal_distance = 0;
        c.validate().unwrap();
    }

    #[test]
    fn negative_teleport_clearances_rejected() {
        let mut c = BehaviorConfig::default();
        c.teleport.goal_clearance = -2;
        assert_eq!(
            c.validate(),
            Err(ConfigError::InvalidDistance {
                name: "teleport.goal_clearance",
                value: -2
            })
        );
        let mut c = BehaviorConfig::default();
        c.teleport.actor_clearance = -1;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidDistance { name: "teleport.actor_clearance", .. })
        ));
    }
}
