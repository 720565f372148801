use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{bonus, SECONDS_PER_DAY};
use crate::state::PositionSnapshot;

/// Additive bonus categories on top of the base reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    EarlyAdopter,
    LargeStake,
    LongTerm,
}

impl BonusKind {
    /// Evaluation order; every kind is checked for every calculation.
    pub const ALL: [BonusKind; 3] = [
        BonusKind::EarlyAdopter,
        BonusKind::LargeStake,
        BonusKind::LongTerm,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BonusKind::EarlyAdopter => "early_adopter",
            BonusKind::LargeStake => "large_stake",
            BonusKind::LongTerm => "long_term",
        }
    }
}

impl fmt::Display for BonusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Eligibility thresholds and uplift rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusPolicy {
    pub early_adopter_window_days: i64,
    pub early_adopter_rate: f64,
    pub large_stake_threshold: f64,
    pub large_stake_rate: f64,
    pub long_term_min_lock_days: u32,
    pub long_term_rate: f64,
}

impl Default for BonusPolicy {
    fn default() -> Self {
        Self {
            early_adopter_window_days: bonus::EARLY_ADOPTER_WINDOW_DAYS,
            early_adopter_rate: bonus::EARLY_ADOPTER_RATE,
            large_stake_threshold: bonus::LARGE_STAKE_THRESHOLD,
            large_stake_rate: bonus::LARGE_STAKE_RATE,
            long_term_min_lock_days: bonus::LONG_TERM_MIN_LOCK_DAYS,
            long_term_rate: bonus::LONG_TERM_RATE,
        }
    }
}

impl BonusPolicy {
    pub fn rate(&self, kind: BonusKind) -> f64 {
        match kind {
            BonusKind::EarlyAdopter => self.early_adopter_rate,
            BonusKind::LargeStake => self.large_stake_rate,
            BonusKind::LongTerm => self.long_term_rate,
        }
    }

    pub fn is_eligible(&self, kind: BonusKind, position: &PositionSnapshot, now: i64) -> bool {
        match kind {
            BonusKind::EarlyAdopter => {
                let age = now.saturating_sub(position.start_time);
                age <= self.early_adopter_window_days.saturating_mul(SECONDS_PER_DAY)
            }
            BonusKind::LargeStake => position.amount >= self.large_stake_threshold,
            BonusKind::LongTerm => position.lock_period.days() >= self.long_term_min_lock_days,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.early_adopter_window_days < 0 {
            return Err("early_adopter_window_days must be non-negative".into());
        }
        if !(self.large_stake_threshold >= 0.0) || !self.large_stake_threshold.is_finite() {
            return Err("large_stake_threshold must be finite and non-negative".into());
        }
        for kind in BonusKind::ALL {
            let rate = self.rate(kind);
            if !(rate >= 0.0) || !rate.is_finite() {
                return Err(format!("{kind} rate must be finite and non-negative"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LockPeriod;

    fn snapshot(amount: f64, lock: LockPeriod, start: i64) -> PositionSnapshot {
        PositionSnapshot {
            investor_address: "alice".into(),
            amount,
            reward_rate: 0.1,
            lock_period: lock,
            start_time: start,
            days: 0,
        }
    }

    #[test]
    fn test_early_adopter_window_is_inclusive() {
        let policy = BonusPolicy::default();
        let p = snapshot(100.0, LockPeriod::Days30, 0);
        assert!(policy.is_eligible(BonusKind::EarlyAdopter, &p, 30 * SECONDS_PER_DAY));
        assert!(!policy.is_eligible(BonusKind::EarlyAdopter, &p, 30 * SECONDS_PER_DAY + 1));
    }

    #[test]
    fn test_large_stake_threshold() {
        let policy = BonusPolicy::default();
        let at_threshold = snapshot(10_000.0, LockPeriod::Days30, 0);
        let below = snapshot(9_999.99, LockPeriod::Days30, 0);
        assert!(policy.is_eligible(BonusKind::LargeStake, &at_threshold, 0));
        assert!(!policy.is_eligible(BonusKind::LargeStake, &below, 0));

        let custom = BonusPolicy {
            large_stake_threshold: 500.0,
            ..Default::default()
        };
        let small = snapshot(500.0, LockPeriod::Days30, 0);
        assert!(custom.is_eligible(BonusKind::LargeStake, &small, 0));
    }

    #[test]
    fn test_long_term_lock() {
        let policy = BonusPolicy::default();
        let eligible: Vec<bool> = LockPeriod::ALL
            .iter()
            .map(|l| policy.is_eligible(BonusKind::LongTerm, &snapshot(1.0, *l, 0), 0))
            .collect();
        assert_eq!(eligible, vec![false, false, true, true]);
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let policy = BonusPolicy {
            long_term_rate: -0.1,
            ..Default::default()
        };
        assert!(policy.validate().unwrap_err().contains("long_term"));
        assert!(BonusPolicy::default().validate().is_ok());
    }
}
