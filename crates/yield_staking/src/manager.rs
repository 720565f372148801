//! Staking manager.
//!
//! Entry point for pool and position operations. Looks the pool up, takes its
//! lock, reads the clock and hands off to the matching handler in
//! [`crate::instructions`]. Because the handler validates before it writes and
//! the lock is held for the whole call, no caller ever observes a half-applied
//! stake or unstake.

use std::sync::Arc;

use tracing::debug;

use crate::access::{AccessGate, AdminAction, OpenAccess};
use crate::clock::Clock;
use crate::error::{Result, StakingError};
use crate::instructions::{
    cancel_position, pool_stats, settle_unstake, stake, unstake, PoolStats, UnstakeReceipt,
};
use crate::registry::PoolRegistry;
use crate::state::{PositionSnapshot, StakingPool, StakingPosition};

pub struct StakingManager {
    registry: PoolRegistry,
    clock: Arc<dyn Clock>,
    access: Arc<dyn AccessGate>,
}

impl StakingManager {
    /// Manager with an open access gate.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_access_gate(clock, Arc::new(OpenAccess))
    }

    pub fn with_access_gate(clock: Arc<dyn Clock>, access: Arc<dyn AccessGate>) -> Self {
        Self {
            registry: PoolRegistry::new(),
            clock,
            access,
        }
    }

    pub fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Creates a pool on behalf of `caller`.
    ///
    /// # Errors
    /// - `Unauthorized` if the access gate denies `caller`
    /// - `InvalidConfig` for invalid pool parameters
    pub fn create_pool(
        &self,
        caller: &str,
        business_id: &str,
        min_stake: f64,
        max_stake: f64,
        base_reward_rate: f64,
    ) -> Result<StakingPool> {
        self.access.require(caller, AdminAction::CreatePool)?;
        self.registry
            .create_pool(business_id, min_stake, max_stake, base_reward_rate, self.clock.now())
            .inspect_err(|e| debug!(business_id, error = %e, "Pool creation rejected"))
    }

    /// Opens a position. See [`stake::handler`] for the validation order.
    pub fn stake(
        &self,
        pool_id: &str,
        investor: &str,
        amount: f64,
        lock_days: u32,
    ) -> Result<StakingPosition> {
        self.registry
            .with_pool(pool_id, |pool| {
                stake::handler(pool, investor, amount, lock_days, self.clock.now())
            })
            .inspect_err(|e| debug!(pool_id, investor, error = %e, "Stake rejected"))
    }

    /// Closes an ACTIVE position after its lock period.
    pub fn unstake(&self, pool_id: &str, investor: &str) -> Result<UnstakeReceipt> {
        self.registry
            .with_pool(pool_id, |pool| unstake::handler(pool, investor, self.clock.now()))
            .inspect_err(|e| debug!(pool_id, investor, error = %e, "Unstake rejected"))
    }

    /// Records the ledger's acknowledgement of an unstake payout.
    pub fn settle_unstake(&self, pool_id: &str, investor: &str) -> Result<StakingPosition> {
        self.registry.with_pool(pool_id, |pool| {
            settle_unstake::handler(pool, investor, self.clock.now())
        })
    }

    /// Cancels an ACTIVE position on behalf of `caller`. No reward is paid.
    pub fn cancel_position(
        &self,
        caller: &str,
        pool_id: &str,
        investor: &str,
    ) -> Result<StakingPosition> {
        self.access.require(caller, AdminAction::CancelPosition)?;
        self.registry.with_pool(pool_id, |pool| {
            cancel_position::handler(pool, investor, self.clock.now())
        })
    }

    pub fn get_pool_stats(&self, pool_id: &str) -> Result<PoolStats> {
        self.registry
            .with_pool(pool_id, |pool| Ok(pool_stats::handler(pool)))
    }

    /// Current state of the investor's position, whatever its status.
    pub fn position(&self, pool_id: &str, investor: &str) -> Result<StakingPosition> {
        self.registry.with_pool(pool_id, |pool| {
            pool.positions
                .get(investor)
                .cloned()
                .ok_or_else(|| not_found(pool, investor))
        })
    }

    /// Reward calculation input for the investor's ACTIVE position.
    pub fn position_snapshot(&self, pool_id: &str, investor: &str) -> Result<PositionSnapshot> {
        self.registry.with_pool(pool_id, |pool| {
            pool.active_position(investor)
                .map(|p| p.snapshot(self.clock.now()))
                .ok_or_else(|| not_found(pool, investor))
        })
    }

    pub fn pool_ids(&self) -> Vec<String> {
        self.registry.pool_ids()
    }
}

fn not_found(pool: &StakingPool, investor: &str) -> StakingError {
    StakingError::PositionNotFound {
        pool_id: pool.pool_id.clone(),
        investor: investor.to_string(),
        status: crate::state::PositionStatus::Active,
    }
}
