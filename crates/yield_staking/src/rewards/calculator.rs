use serde::{Deserialize, Serialize};

use super::bonus::{BonusKind, BonusPolicy};
use crate::constants::DAYS_PER_YEAR;
use crate::state::PositionSnapshot;

/// Outcome of one bonus check. Recorded whether or not it applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedBonus {
    pub kind: BonusKind,
    pub eligible: bool,
    /// `1 + rate`, e.g. 1.2 for the early adopter bonus.
    pub multiplier: f64,
    /// Amount added to the base reward; zero when not eligible.
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    pub base_reward: f64,
    pub bonus_reward: f64,
    pub total_reward: f64,
    pub calculation_time: i64,
    pub applied_multipliers: Vec<AppliedBonus>,
}

impl RewardBreakdown {
    pub fn eligible(&self) -> impl Iterator<Item = BonusKind> + '_ {
        self.applied_multipliers
            .iter()
            .filter(|b| b.eligible)
            .map(|b| b.kind)
    }
}

/// `amount * (annual_rate / 365) * days`
pub fn base_reward(position: &PositionSnapshot) -> f64 {
    position.amount * (position.reward_rate / DAYS_PER_YEAR) * position.days as f64
}

/// Base reward plus each applicable bonus.
///
/// Bonuses are independent percentages of the base reward; they add, they
/// do not compound on each other.
pub fn calculate_rewards(
    position: &PositionSnapshot,
    policy: &BonusPolicy,
    now: i64,
) -> RewardBreakdown {
    let base = base_reward(position);

    let applied_multipliers: Vec<AppliedBonus> = BonusKind::ALL
        .iter()
        .map(|&kind| {
            let rate = policy.rate(kind);
            let eligible = policy.is_eligible(kind, position, now);
            AppliedBonus {
                kind,
                eligible,
                multiplier: 1.0 + rate,
                contribution: if eligible { base * rate } else { 0.0 },
            }
        })
        .collect();

    let bonus: f64 = applied_multipliers.iter().map(|b| b.contribution).sum();

    RewardBreakdown {
        base_reward: base,
        bonus_reward: bonus,
        total_reward: base + bonus,
        calculation_time: now,
        applied_multipliers,
    }
}
