//! Create pool handler.
//!
//! Validates pool parameters and builds an empty pool.

use chrono::DateTime;
use tracing::info;

use crate::error::{Result, StakingError};
use crate::state::{PoolConfig, StakingPool};

/// Checks pool parameters.
///
/// # Errors
/// `InvalidConfig` if `min_stake <= 0`, `max_stake < min_stake`,
/// `base_reward_rate < 0`, or any value is not finite.
pub fn validate_config(min_stake: f64, max_stake: f64, base_reward_rate: f64) -> Result<()> {
    if !(min_stake > 0.0) || !min_stake.is_finite() {
        return Err(StakingError::InvalidConfig(format!(
            "min_stake must be positive, got {min_stake}"
        )));
    }
    if !(max_stake >= min_stake) || !max_stake.is_finite() {
        return Err(StakingError::InvalidConfig(format!(
            "max_stake {max_stake} must be at least min_stake {min_stake}"
        )));
    }
    if !(base_reward_rate >= 0.0) || !base_reward_rate.is_finite() {
        return Err(StakingError::InvalidConfig(format!(
            "base_reward_rate must be non-negative, got {base_reward_rate}"
        )));
    }
    Ok(())
}

/// Pool id of the form `POOL_{business}_{YYYYMMDD}_{sequence}`.
pub fn pool_id(business_id: &str, now: i64, sequence: u64) -> String {
    let day = DateTime::from_timestamp(now, 0)
        .map(|t| t.format("%Y%m%d").to_string())
        .unwrap_or_else(|| now.to_string());
    format!("POOL_{business_id}_{day}_{sequence}")
}

/// Builds a validated, empty pool.
///
/// # Arguments
/// * `pool_id` - Collision-free id assigned by the registry
/// * `business_id` - Owning business
/// * `min_stake` / `max_stake` - Inclusive stake bounds
/// * `base_reward_rate` - Annual rate before lock multipliers
/// * `now` - Creation time
pub fn handler(
    pool_id: String,
    business_id: &str,
    min_stake: f64,
    max_stake: f64,
    base_reward_rate: f64,
    now: i64,
) -> Result<StakingPool> {
    validate_config(min_stake, max_stake, base_reward_rate)?;

    let pool = StakingPool::new(
        pool_id,
        PoolConfig {
            business_id: business_id.to_string(),
            min_stake,
            max_stake,
            base_reward_rate,
            created_at: now,
        },
    );

    info!(
        pool_id = %pool.pool_id,
        business_id,
        min_stake,
        max_stake,
        base_reward_rate,
        "Created staking pool"
    );

    Ok(pool)
}
