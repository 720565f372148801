//! Cancel position handler.
//!
//! Administrative cancel of an ACTIVE position. No reward is paid.

use tracing::warn;

use crate::error::{Result, StakingError};
use crate::state::{PositionStatus, StakingPool, StakingPosition};

/// Cancel the investor's ACTIVE position and release its amount from the pool total.
///
/// # Errors
/// - `PositionNotFound` if the investor has no position
/// - `InvalidTransition` unless the position is ACTIVE
pub fn handler(pool: &mut StakingPool, investor: &str, now: i64) -> Result<StakingPosition> {
    let pool_id = pool.pool_id.clone();
    let position = pool
        .positions
        .get_mut(investor)
        .ok_or_else(|| StakingError::PositionNotFound {
            pool_id: pool_id.clone(),
            investor: investor.to_string(),
            status: PositionStatus::Active,
        })?;

    position.transition(PositionStatus::Cancelled)?;
    let cancelled = position.clone();

    pool.total_staked -= cancelled.amount;
    if pool.total_staked.abs() < 1e-9 {
        pool.total_staked = 0.0;
    }
    pool.last_updated = now;

    debug_assert!(pool.check_total_staked());

    warn!(
        %pool_id,
        investor,
        amount = cancelled.amount,
        total_staked = pool.total_staked,
        "Position cancelled"
    );

    Ok(cancelled)
}
