//! # Yield Staking Engine
//!
//! Staking pools for tokenized businesses: investors lock an amount for one of
//! four lock periods and earn a rate that grows with the lock:
//!
//! - **30 days**: base rate
//! - **90 days**: 1.2x base rate
//! - **180 days**: 1.5x base rate
//! - **360 days**: 2x base rate
//!
//! ## Features
//! - Per-pool serialised stake/unstake; `total_staked` always equals the sum of ACTIVE positions
//! - Single terminal reward payout at unstake, rounded half-even to six places
//! - Additive early adopter, large stake and long term reward bonuses
//! - Concurrent reward settlement against an external ledger with a per-transfer timeout
//! - Append-only, timestamp-ordered distribution history
//! - Pure yield analytics: APY/APR, compounded return, projections, volatility, Sharpe
//! - Injectable clock for deterministic lock and accrual checks

pub mod access;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod logging;
pub mod manager;
pub mod math;
pub mod registry;
pub mod rewards;
pub mod state;
pub mod yields;

pub use access::{AccessGate, AdminAction, AdminList, OpenAccess};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use error::{Result, StakingError};
pub use instructions::{PoolStats, UnstakeReceipt};
pub use manager::StakingManager;
pub use registry::PoolRegistry;
pub use rewards::{
    BonusKind, BonusPolicy, LedgerSettlement, RewardBreakdown, RewardDistributor, RewardEntry,
    SettlementError,
};
pub use state::{
    EventStatus, LockPeriod, PoolConfig, PositionSnapshot, PositionStatus, RewardEvent,
    RewardType, StakingPool, StakingPosition,
};
pub use yields::{
    calculate_optimal_compound_period, calculate_yield_metrics, project_yields,
    CompoundingPeriod, YieldMetrics,
};
