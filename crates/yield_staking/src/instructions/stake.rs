//! Stake handler.
//!
//! Opens a new position in an already-locked pool.

use tracing::info;

use crate::error::{Result, StakingError};
use crate::state::{LockPeriod, StakingPool, StakingPosition};

/// Stake `amount` for `lock_days` days.
///
/// # Arguments
/// * `pool` - The pool, held exclusively by the caller
/// * `investor` - Investor address
/// * `amount` - Amount to stake, within `[min_stake, max_stake]`
/// * `lock_days` - One of 30, 90, 180, 360
/// * `now` - Current time
///
/// # Errors
/// - `AmountOutOfRange` outside the pool bounds
/// - `InvalidLockPeriod` for an unsupported lock period
/// - `DuplicatePosition` if the investor's position is still ACTIVE or UNSTAKING
///
/// Nothing is modified when an error is returned.
pub fn handler(
    pool: &mut StakingPool,
    investor: &str,
    amount: f64,
    lock_days: u32,
    now: i64,
) -> Result<StakingPosition> {
    let (min, max) = (pool.config.min_stake, pool.config.max_stake);

    // Validate amount (inclusive on both ends, NaN rejected)
    if !(min <= amount && amount <= max) {
        return Err(StakingError::AmountOutOfRange { amount, min, max });
    }

    // Validate lock period
    let lock_period = LockPeriod::try_from(lock_days)?;

    // One live position per investor
    if let Some(existing) = pool.positions.get(investor) {
        if !existing.status.is_terminal() {
            return Err(StakingError::DuplicatePosition {
                pool_id: pool.pool_id.clone(),
                investor: investor.to_string(),
                status: existing.status,
            });
        }
    }

    let position = StakingPosition::new(
        investor,
        amount,
        pool.config.base_reward_rate,
        lock_period,
        now,
    );

    // Replaces a terminal position, if any; it no longer counts toward the total
    pool.positions.insert(investor.to_string(), position.clone());
    pool.total_staked += amount;
    pool.last_updated = now;

    debug_assert!(pool.check_total_staked());

    info!(
        pool_id = %pool.pool_id,
        investor,
        amount,
        lock_days,
        reward_rate = position.reward_rate,
        total_staked = pool.total_staked,
        "Staked"
    );

    Ok(position)
}
