use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{Result, StakingError};

/// Supported lock periods. Longer locks earn a higher reward multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum LockPeriod {
    Days30,
    Days90,
    Days180,
    Days360,
}

impl LockPeriod {
    pub const ALL: [LockPeriod; 4] = [
        LockPeriod::Days30,
        LockPeriod::Days90,
        LockPeriod::Days180,
        LockPeriod::Days360,
    ];

    pub fn days(self) -> u32 {
        match self {
            LockPeriod::Days30 => 30,
            LockPeriod::Days90 => 90,
            LockPeriod::Days180 => 180,
            LockPeriod::Days360 => 360,
        }
    }

    pub fn seconds(self) -> i64 {
        i64::from(self.days()) * SECONDS_PER_DAY
    }

    /// Multiplier applied to the pool's base reward rate.
    pub fn multiplier(self) -> f64 {
        match self {
            LockPeriod::Days30 => lock_multiplier::DAYS_30,
            LockPeriod::Days90 => lock_multiplier::DAYS_90,
            LockPeriod::Days180 => lock_multiplier::DAYS_180,
            LockPeriod::Days360 => lock_multiplier::DAYS_360,
        }
    }
}

impl TryFrom<u32> for LockPeriod {
    type Error = StakingError;

    fn try_from(days: u32) -> Result<Self> {
        match days {
            30 => Ok(LockPeriod::Days30),
            90 => Ok(LockPeriod::Days90),
            180 => Ok(LockPeriod::Days180),
            360 => Ok(LockPeriod::Days360),
            other => Err(StakingError::InvalidLockPeriod(other)),
        }
    }
}

impl From<LockPeriod> for u32 {
    fn from(period: LockPeriod) -> Self {
        period.days()
    }
}

/// Lifecycle status of a position.
///
/// `ACTIVE -> UNSTAKING -> COMPLETED` on the normal path,
/// `ACTIVE -> CANCELLED` on admin cancel. Nothing returns to `ACTIVE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionStatus {
    Active,
    Unstaking,
    Completed,
    Cancelled,
}

impl PositionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PositionStatus::Active => "ACTIVE",
            PositionStatus::Unstaking => "UNSTAKING",
            PositionStatus::Completed => "COMPLETED",
            PositionStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PositionStatus::Completed | PositionStatus::Cancelled)
    }

    pub fn can_transition_to(self, next: PositionStatus) -> bool {
        matches!(
            (self, next),
            (PositionStatus::Active, PositionStatus::Unstaking)
                | (PositionStatus::Unstaking, PositionStatus::Completed)
                | (PositionStatus::Active, PositionStatus::Cancelled)
        )
    }
}

impl fmt::Display for PositionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single investor's stake in a pool. Owned by its [`StakingPool`](super::StakingPool).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingPosition {
    pub investor_address: String,
    pub amount: f64,
    pub start_time: i64,
    pub lock_period: LockPeriod,
    pub status: PositionStatus,
    /// Pool base rate times the lock period multiplier.
    pub reward_rate: f64,
    pub accumulated_rewards: f64,
    pub last_claim_time: Option<i64>,
}

impl StakingPosition {
    pub fn new(
        investor_address: impl Into<String>,
        amount: f64,
        base_reward_rate: f64,
        lock_period: LockPeriod,
        now: i64,
    ) -> Self {
        Self {
            investor_address: investor_address.into(),
            amount,
            start_time: now,
            lock_period,
            status: PositionStatus::Active,
            reward_rate: base_reward_rate * lock_period.multiplier(),
            accumulated_rewards: 0.0,
            last_claim_time: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PositionStatus::Active
    }

    pub fn unlocks_at(&self) -> i64 {
        self.start_time.saturating_add(self.lock_period.seconds())
    }

    pub fn is_lock_ended(&self, now: i64) -> bool {
        now >= self.unlocks_at()
    }

    /// Start of the current accrual window.
    pub fn accrual_start(&self) -> i64 {
        self.last_claim_time.unwrap_or(self.start_time)
    }

    /// Whole days accrued since the last claim (or since the stake started).
    pub fn days_accrued(&self, now: i64) -> i64 {
        now.saturating_sub(self.accrual_start()).max(0) / SECONDS_PER_DAY
    }

    /// Moves the position along a lifecycle edge.
    pub fn transition(&mut self, next: PositionStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(StakingError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Read-only view used by reward calculations.
    pub fn snapshot(&self, now: i64) -> PositionSnapshot {
        PositionSnapshot {
            investor_address: self.investor_address.clone(),
            amount: self.amount,
            reward_rate: self.reward_rate,
            lock_period: self.lock_period,
            start_time: self.start_time,
            days: self.days_accrued(now),
        }
    }
}

/// Detached copy of the fields reward calculations need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub investor_address: String,
    pub amount: f64,
    /// Annual rate.
    pub reward_rate: f64,
    pub lock_period: LockPeriod,
    pub start_time: i64,
    /// Days of accrual to reward.
    pub days: i64,
}
