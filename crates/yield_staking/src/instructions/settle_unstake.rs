//! Settle unstake handler.
//!
//! Marks an UNSTAKING position COMPLETED once the external ledger has paid out.

use tracing::info;

use crate::error::{Result, StakingError};
use crate::state::{PositionStatus, StakingPool, StakingPosition};

/// Acknowledge settlement of an unstaked position.
///
/// # Errors
/// - `PositionNotFound` if the investor has no position
/// - `InvalidTransition` unless the position is UNSTAKING
pub fn handler(pool: &mut StakingPool, investor: &str, now: i64) -> Result<StakingPosition> {
    let pool_id = pool.pool_id.clone();
    let position = pool
        .positions
        .get_mut(investor)
        .ok_or_else(|| StakingError::PositionNotFound {
            pool_id: pool_id.clone(),
            investor: investor.to_string(),
            status: PositionStatus::Unstaking,
        })?;

    position.transition(PositionStatus::Completed)?;
    let settled = position.clone();
    pool.last_updated = now;

    info!(%pool_id, investor, rewards = settled.accumulated_rewards, "Unstake settled");

    Ok(settled)
}
