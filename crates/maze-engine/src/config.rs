//! Session configuration and validation.
//!
//! [`SessionConfig`] carries everything a session needs besides the grid
//! and the surface: the seed for actor RNGs, which behaviour each start
//! marker kind gets, the behaviour tunables and the driver's pacing limits.

use std::time::Duration;

use indexmap::IndexMap;
use maze_actors::{BehaviorConfig, BehaviorKind, ConfigError};

/// Configuration for one [`ActorScheduler`](crate::ActorScheduler) session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Base seed; actor `n` seeds its RNG with `seed ^ n`. Default: 0.
    pub seed: u64,
    /// Behaviour per start marker kind. Default: [`SessionConfig::classic_roster`].
    pub roster: IndexMap<i32, BehaviorKind>,
    /// Behaviour for kinds missing from the roster. Default: `basic`.
    pub default_behavior: BehaviorKind,
    /// Tunables passed to every behaviour.
    pub behaviors: BehaviorConfig,
    /// Pacing constant used when the surface is gone or reports a
    /// non-positive scale. Default: 32.0.
    pub fallback_cell_time_scale: f64,
    /// Longest the driver sleeps between sweeps, so it notices new
    /// commands and fields even with no actor due. Default: 50 ms.
    pub max_park: Duration,
    /// How long [`cancel`](crate::ActorScheduler::cancel) waits for the
    /// driver to stop before detaching it. Default: 500 ms.
    pub cancel_timeout: Duration,
}

impl SessionConfig {
    /// Kinds 2 through 7 mapped onto the six behaviours in registry order.
    pub fn classic_roster() -> IndexMap<i32, BehaviorKind> {
        (2..).zip(BehaviorKind::ALL).collect()
    }

    /// Behaviour for a start marker of `kind`.
    pub fn behavior_for(&self, kind: i32) -> BehaviorKind {
        self.roster
            .get(&kind)
            .copied()
            .unwrap_or(self.default_behavior)
    }

    /// Check every tunable, including the behaviour config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.behaviors.validate()?;
        if !self.fallback_cell_time_scale.is_finite() || self.fallback_cell_time_scale <= 0.0 {
            return Err(ConfigError::InvalidFactor {
                name: "fallback_cell_time_scale",
                value: self.fallback_cell_time_scale,
            });
        }
        if self.max_park.is_zero() {
            return Err(ConfigError::InvalidDuration {
                name: "max_park",
                value: 0.0,
            });
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            roster: Self::classic_roster(),
            default_behavior: BehaviorKind::Basic,
            behaviors: BehaviorConfig::default(),
            fallback_cell_time_scale: 32.0,
            max_park: Duration::from_millis(50),
            cancel_timeout: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn classic_roster_order() {
        let roster = SessionConfig::classic_roster();
        assert_eq!(roster.len(), 6);
        assert_eq!(roster.get(&2), Some(&BehaviorKind::Basic));
        assert_eq!(roster.get(&5), Some(&BehaviorKind::Jumper));
        assert_eq!(roster.get(&7), Some(&BehaviorKind::Scatterbrain));
        assert_eq!(roster.keys().copied().collect::<Vec<_>>(), vec![2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn unknown_kind_uses_default() {
        let config = SessionConfig {
            default_behavior: BehaviorKind::Speedy,
            ..SessionConfig::default()
        };
        assert_eq!(config.behavior_for(42), BehaviorKind::Speedy);
        assert_eq!(config.behavior_for(6), BehaviorKind::Teleporter);
    }

    #[test]
    fn rejects_bad_pacing() {
        let config = SessionConfig {
            fallback_cell_time_scale: 0.0,
            ..SessionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFactor { name: "fallback_cell_time_scale", .. })
        ));

        let config = SessionConfig {
            max_park: Duration::ZERO,
            ..SessionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn behaviour_errors_surface() {
        let mut config = SessionConfig::default();
        config.behaviors.scatter.mess_up_prob = 1.5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidProbability {
                name: "scatter.mess_up_prob",
                value: 1.5
            })
        );
    }
}
