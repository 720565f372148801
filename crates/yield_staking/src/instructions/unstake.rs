//! Unstake handler.
//!
//! Closes an ACTIVE position once its lock period has elapsed and computes the
//! single terminal reward payout.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::*;
use crate::error::{Result, StakingError};
use crate::math::round_half_even;
use crate::state::{PositionStatus, StakingPool, StakingPosition};

/// Amounts owed to the investor after unstaking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnstakeReceipt {
    pub principal: f64,
    pub rewards: f64,
    pub total: f64,
}

/// Simple-interest rewards accrued on an ACTIVE position.
///
/// `rewards = amount * (reward_rate / 365) * whole_days`, rounded half-even
/// to six places. Whole days are counted from `last_claim_time`, or from
/// `start_time` when the position was never claimed.
pub fn calculate_accrued_rewards(position: &StakingPosition, now: i64) -> f64 {
    if !position.is_active() {
        return 0.0;
    }
    let days = position.days_accrued(now) as f64;
    let rewards = position.amount * (position.reward_rate / DAYS_PER_YEAR) * days;
    round_half_even(rewards, REWARD_DECIMALS)
}

/// Unstake the investor's ACTIVE position.
///
/// # Errors
/// - `PositionNotFound` if the investor has no ACTIVE position
/// - `LockPeriodNotEnded` before `start_time + lock_period`
///
/// On success the position moves to UNSTAKING and leaves `total_staked`.
pub fn handler(pool: &mut StakingPool, investor: &str, now: i64) -> Result<UnstakeReceipt> {
    let pool_id = pool.pool_id.clone();
    let position = pool
        .position_with_status(investor, PositionStatus::Active)
        .ok_or_else(|| StakingError::PositionNotFound {
            pool_id: pool_id.clone(),
            investor: investor.to_string(),
            status: PositionStatus::Active,
        })?;

    // Check lock period
    let unlocks_at = position.unlocks_at();
    if !position.is_lock_ended(now) {
        let remaining = Duration::from_secs(unlocks_at.saturating_sub(now).max(0) as u64);
        return Err(StakingError::LockPeriodNotEnded {
            unlocks_at,
            remaining,
        });
    }

    // Final rewards, computed before the status change
    let rewards = calculate_accrued_rewards(position, now);
    let principal = position.amount;

    position.transition(PositionStatus::Unstaking)?;
    position.accumulated_rewards = rewards;
    position.last_claim_time = Some(now);

    pool.total_staked -= principal;
    if pool.total_staked.abs() < 1e-9 {
        pool.total_staked = 0.0;
    }
    pool.last_updated = now;

    debug_assert!(pool.check_total_staked());

    info!(
        %pool_id,
        investor,
        principal,
        rewards,
        total_staked = pool.total_staked,
        "Unstaked"
    );

    Ok(UnstakeReceipt {
        principal,
        rewards,
        total: principal + rewards,
    })
}
