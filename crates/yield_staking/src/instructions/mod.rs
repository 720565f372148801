//! Pool operation handlers.
//!
//! Each handler works on a pool the caller already holds exclusively and
//! validates everything before the first write.

pub mod cancel_position;
pub mod create_pool;
pub mod pool_stats;
pub mod settle_unstake;
pub mod stake;
pub mod unstake;

pub use pool_stats::PoolStats;
pub use unstake::{calculate_accrued_rewards, UnstakeReceipt};
