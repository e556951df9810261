//! Coin/XP reward configuration.
//!
//! Resolution order, highest precedence first:
//!
//! 1. overrides supplied when the game is launched (e.g. by a level map),
//! 2. overrides declared on the game definition,
//! 3. application defaults.
//!
//! Each field resolves independently, so a launch can override only
//! `coins_per_level` and inherit the rest.

use serde::{Deserialize, Serialize};

use crate::game::summary::SessionSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConfig {
    pub coins_per_level: u32,
    pub total_coins: u32,
    pub total_xp: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            coins_per_level: 5,
            total_coins: 50,
            total_xp: 100,
        }
    }
}

/// Partial reward settings; `None` falls through to the next source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardOverrides {
    #[serde(default)]
    pub coins_per_level: Option<u32>,
    #[serde(default)]
    pub total_coins: Option<u32>,
    #[serde(default)]
    pub total_xp: Option<u32>,
}

impl RewardConfig {
    /// Applies `game` then `launch` overrides on top of `defaults`.
    #[must_use]
    pub fn resolve(
        defaults: RewardConfig,
        game: Option<&RewardOverrides>,
        launch: Option<&RewardOverrides>,
    ) -> Self {
        let pick = |field: fn(&RewardOverrides) -> Option<u32>, fallback: u32| {
            launch
                .and_then(field)
                .or_else(|| game.and_then(field))
                .unwrap_or(fallback)
        };
        Self {
            coins_per_level: pick(|o| o.coins_per_level, defaults.coins_per_level),
            total_coins: pick(|o| o.total_coins, defaults.total_coins),
            total_xp: pick(|o| o.total_xp, defaults.total_xp),
        }
    }

    /// `self` with every field `overrides` sets replaced.
    #[must_use]
    pub fn with_overrides(self, overrides: &RewardOverrides) -> Self {
        Self::resolve(self, Some(overrides), None)
    }

    /// Reward for a finished session. `badge` is only granted on a pass.
    #[must_use]
    pub fn earned(&self, summary: &SessionSummary, badge: Option<&str>) -> Reward {
        let coins = summary
            .score
            .saturating_mul(self.coins_per_level)
            .min(self.total_coins);
        let xp = if summary.total == 0 {
            0
        } else {
            let scaled = u64::from(self.total_xp) * u64::from(summary.score) / u64::from(summary.total);
            u32::try_from(scaled).unwrap_or(self.total_xp)
        };
        Reward {
            coins,
            xp,
            badge: badge.filter(|_| summary.passed).map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reward {
    pub coins: u32,
    pub xp: u32,
    pub badge: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::summary::PassThreshold;

    #[test]
    fn launch_beats_game_beats_defaults_per_field() {
        let game = RewardOverrides {
            coins_per_level: Some(10),
            total_coins: Some(80),
            total_xp: None,
        };
        let launch = RewardOverrides {
            coins_per_level: Some(20),
            ..RewardOverrides::default()
        };
        let resolved = RewardConfig::resolve(RewardConfig::default(), Some(&game), Some(&launch));
        assert_eq!(
            resolved,
            RewardConfig {
                coins_per_level: 20,
                total_coins: 80,
                total_xp: 100,
            }
        );
    }

    #[test]
    fn no_overrides_yields_defaults() {
        let defaults = RewardConfig::default();
        assert_eq!(RewardConfig::resolve(defaults, None, None), defaults);
    }

    #[test]
    fn coins_are_capped_and_xp_scales_with_score() {
        let config = RewardConfig {
            coins_per_level: 30,
            total_coins: 50,
            total_xp: 90,
        };
        let summary = SessionSummary::new(2, 3, PassThreshold::default());
        let reward = config.earned(&summary, Some("Kindness Star"));
        assert_eq!(reward.coins, 50);
        assert_eq!(reward.xp, 60);
        assert_eq!(reward.badge.as_deref(), Some("Kindness Star"));
    }

    #[test]
    fn failed_session_earns_no_badge() {
        let summary = SessionSummary::new(1, 5, PassThreshold::default());
        let reward = RewardConfig::default().earned(&summary, Some("Road Safety Hero"));
        assert_eq!(reward.badge, None);
        assert_eq!(reward.coins, 5);
        assert_eq!(reward.xp, 20);
    }
}
