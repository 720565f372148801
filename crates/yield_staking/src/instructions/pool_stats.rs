//! Pool statistics.

use serde::{Deserialize, Serialize};

use crate::state::{PoolConfig, StakingPool};

/// Consistent point-in-time view of a pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolStats {
    pub pool_id: String,
    pub total_staked: f64,
    pub active_positions: usize,
    /// Zero when there are no active positions.
    pub average_stake: f64,
    pub config: PoolConfig,
    pub last_updated: i64,
}

pub fn handler(pool: &StakingPool) -> PoolStats {
    let active_positions = pool.active_positions().count();
    let average_stake = if active_positions > 0 {
        pool.total_staked / active_positions as f64
    } else {
        0.0
    };

    PoolStats {
        pool_id: pool.pool_id.clone(),
        total_staked: pool.total_staked,
        active_positions,
        average_stake,
        config: pool.config.clone(),
        last_updated: pool.last_updated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::{cancel_position, create_pool, stake};

    #[test]
    fn test_stats_count_only_active() {
        let mut pool = create_pool::handler("P".into(), "b", 1.0, 1000.0, 0.1, 0).unwrap();
        let empty = handler(&pool);
        assert_eq!(empty.active_positions, 0);
        assert_eq!(empty.average_stake, 0.0);

        stake::handler(&mut pool, "a", 100.0, 30, 0).unwrap();
        stake::handler(&mut pool, "b", 300.0, 30, 0).unwrap();
        stake::handler(&mut pool, "c", 500.0, 30, 0).unwrap();
        cancel_position::handler(&mut pool, "c", 1).unwrap();

        let stats = handler(&pool);
        assert_eq!(stats.active_positions, 2);
        assert_eq!(stats.total_staked, 400.0);
        assert_eq!(stats.average_stake, 200.0);
        assert_eq!(stats.config.min_stake, 1.0);
        assert_eq!(stats.last_updated, 1);
    }
}
