use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::staking_position::{PositionStatus, StakingPosition};

/// Immutable pool parameters, fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    pub business_id: String,
    pub min_stake: f64,
    pub max_stake: f64,
    /// Annual rate before the lock period multiplier.
    pub base_reward_rate: f64,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingPool {
    pub pool_id: String,
    pub config: PoolConfig,

    /// Sum of `amount` over ACTIVE positions.
    pub total_staked: f64,
    /// One position per investor, in insertion order.
    pub positions: IndexMap<String, StakingPosition>,

    pub metadata: BTreeMap<String, String>,
    pub last_updated: i64,
}

impl StakingPool {
    pub fn new(pool_id: impl Into<String>, config: PoolConfig) -> Self {
        let created_at = config.created_at;
        Self {
            pool_id: pool_id.into(),
            config,
            total_staked: 0.0,
            positions: IndexMap::new(),
            metadata: BTreeMap::new(),
            last_updated: created_at,
        }
    }

    pub fn active_positions(&self) -> impl Iterator<Item = &StakingPosition> {
        self.positions.values().filter(|p| p.is_active())
    }

    pub fn active_position(&self, investor: &str) -> Option<&StakingPosition> {
        self.positions.get(investor).filter(|p| p.is_active())
    }

    pub fn position_with_status(
        &mut self,
        investor: &str,
        status: PositionStatus,
    ) -> Option<&mut StakingPosition> {
        self.positions
            .get_mut(investor)
            .filter(|p| p.status == status)
    }

    /// Recomputes the ACTIVE sum from scratch.
    pub fn recompute_total_staked(&self) -> f64 {
        self.active_positions().map(|p| p.amount).sum()
    }

    /// Whether the maintained counter matches the positions it summarises.
    pub fn check_total_staked(&self) -> bool {
        let expected = self.recompute_total_staked();
        (self.total_staked - expected).abs() <= 1e-9 * expected.abs().max(1.0)
    }
}
