//! Engine constants.
//!
//! This module defines the fixed values used throughout the staking engine,
//! including time units, the lock period table, bonus rates and the
//! risk-free rate used by the yield analytics.

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Days in a year for simple (non-compounded) accrual
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Decimal places kept on reward payouts
pub const REWARD_DECIMALS: u32 = 6;

/// Decimal places kept on percentage metrics
pub const PERCENT_DECIMALS: u32 = 2;

/// Decimal places kept on the daily rate metric
pub const DAILY_RATE_DECIMALS: u32 = 4;

/// Annual risk-free rate used by the simplified Sharpe ratio (3%)
pub const RISK_FREE_RATE: f64 = 0.03;

/// Interval between key points of a yield projection
pub const KEY_POINT_INTERVAL_DAYS: u32 = 30;

/// Default timeout for a single settlement call
pub const DEFAULT_SETTLEMENT_TIMEOUT_MS: u64 = 5_000;

/// Lock period reward multipliers
pub mod lock_multiplier {
    /// 30 days - base rate
    pub const DAYS_30: f64 = 1.0;
    /// 90 days - +20% on the base rate
    pub const DAYS_90: f64 = 1.2;
    /// 180 days - +50% on the base rate
    pub const DAYS_180: f64 = 1.5;
    /// 360 days - +100% on the base rate
    pub const DAYS_360: f64 = 2.0;
}

/// Default bonus eligibility thresholds and rates
pub mod bonus {
    /// Positions younger than this (inclusive) count as early adopters
    pub const EARLY_ADOPTER_WINDOW_DAYS: i64 = 30;
    /// +20% of the base reward for early adopters
    pub const EARLY_ADOPTER_RATE: f64 = 0.20;

    /// Minimum amount for the large stake bonus
    pub const LARGE_STAKE_THRESHOLD: f64 = 10_000.0;
    /// +15% of the base reward for large stakes
    pub const LARGE_STAKE_RATE: f64 = 0.15;

    /// Minimum lock period (days) for the long term bonus
    pub const LONG_TERM_MIN_LOCK_DAYS: u32 = 180;
    /// +25% of the base reward for long term locks
    pub const LONG_TERM_RATE: f64 = 0.25;
}
