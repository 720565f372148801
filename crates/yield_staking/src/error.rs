//! Error types for the staking engine.
//!
//! Every fallible operation returns [`StakingError`]. Validation always runs
//! before any state is touched, so an `Err` means nothing was changed.
//!
//! Settlement failures are not part of this enum: they are recorded on the
//! reward event itself (see [`crate::rewards::SettlementError`]).

use std::time::Duration;

use thiserror::Error;

use crate::state::PositionStatus;

/// Result alias used across the engine.
pub type Result<T> = std::result::Result<T, StakingError>;

/// Errors returned by pool, position and analytics operations.
#[derive(Error, Debug)]
pub enum StakingError {
    // ========== Input Validation Errors ==========

    /// Pool or engine configuration is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Stake amount outside the pool's inclusive bounds.
    #[error("Amount {amount} must be between {min} and {max}")]
    AmountOutOfRange { amount: f64, min: f64, max: f64 },

    /// Lock period is not one of 30, 90, 180 or 360 days.
    #[error("Invalid lock period {0} days (must be one of 30, 90, 180, 360)")]
    InvalidLockPeriod(u32),

    /// Compounding period name not recognised.
    #[error("Invalid compounding period: {0}")]
    InvalidCompoundingPeriod(String),

    /// Reward type name not recognised.
    #[error("Invalid reward type: {0}")]
    InvalidRewardType(String),

    // ========== Lookup Errors ==========

    /// No pool registered under this id.
    #[error("Pool {0} not found")]
    PoolNotFound(String),

    /// No matching position for this investor.
    #[error("No {status} staking position found for {investor} in pool {pool_id}")]
    PositionNotFound {
        pool_id: String,
        investor: String,
        status: PositionStatus,
    },

    // ========== State Errors ==========

    /// Investor already holds a live position in this pool.
    #[error("Investor {investor} already has a {status} position in pool {pool_id}")]
    DuplicatePosition {
        pool_id: String,
        investor: String,
        status: PositionStatus,
    },

    /// Requested status change is not an edge of the position lifecycle.
    #[error("Cannot move position from {from} to {to}")]
    InvalidTransition {
        from: PositionStatus,
        to: PositionStatus,
    },

    // ========== Time/Lock Errors ==========

    /// The lock period has not yet ended for this position.
    #[error("Lock period not ended - unlocks at {unlocks_at} ({remaining:?} remaining)")]
    LockPeriodNotEnded { unlocks_at: i64, remaining: Duration },

    // ========== Authorization Errors ==========

    /// Caller is not allowed to perform this administrative action.
    #[error("Unauthorized: {caller} may not {action}")]
    Unauthorized { caller: String, action: String },

    // ========== Configuration Loading Errors ==========

    /// Engine configuration could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
