//! Pool registry.
//!
//! Owns every [`StakingPool`]. Each pool sits behind its own mutex, so
//! operations on one pool are serialised while different pools proceed
//! independently. The outer map lock is held only long enough to look a pool up.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use indexmap::IndexMap;

use crate::error::{Result, StakingError};
use crate::instructions::create_pool;
use crate::state::StakingPool;

pub type PoolHandle = Arc<Mutex<StakingPool>>;

#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools: RwLock<IndexMap<String, PoolHandle>>,
    sequence: AtomicU64,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and registers a new, empty pool.
    ///
    /// # Errors
    /// `InvalidConfig` if `min_stake <= 0`, `max_stake < min_stake` or
    /// `base_reward_rate < 0`. No id is consumed on failure.
    pub fn create_pool(
        &self,
        business_id: &str,
        min_stake: f64,
        max_stake: f64,
        base_reward_rate: f64,
        now: i64,
    ) -> Result<StakingPool> {
        create_pool::validate_config(min_stake, max_stake, base_reward_rate)?;

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let pool_id = create_pool::pool_id(business_id, now, sequence);
        let pool = create_pool::handler(
            pool_id,
            business_id,
            min_stake,
            max_stake,
            base_reward_rate,
            now,
        )?;

        let mut pools = self.pools.write().unwrap_or_else(PoisonError::into_inner);
        pools.insert(pool.pool_id.clone(), Arc::new(Mutex::new(pool.clone())));
        Ok(pool)
    }

    pub fn get(&self, pool_id: &str) -> Result<PoolHandle> {
        self.pools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(pool_id)
            .cloned()
            .ok_or_else(|| StakingError::PoolNotFound(pool_id.to_string()))
    }

    /// Runs `f` with exclusive access to the pool.
    pub fn with_pool<T>(
        &self,
        pool_id: &str,
        f: impl FnOnce(&mut StakingPool) -> Result<T>,
    ) -> Result<T> {
        let handle = self.get(pool_id)?;
        let mut pool = lock(&handle);
        f(&mut *pool)
    }

    /// Cloned snapshot of a pool.
    pub fn snapshot(&self, pool_id: &str) -> Result<StakingPool> {
        let handle = self.get(pool_id)?;
        let pool = lock(&handle);
        Ok(pool.clone())
    }

    pub fn contains(&self, pool_id: &str) -> bool {
        self.pools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(pool_id)
    }

    /// Pool ids in creation order.
    pub fn pool_ids(&self) -> Vec<String> {
        self.pools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pools.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock(handle: &PoolHandle) -> MutexGuard<'_, StakingPool> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}
