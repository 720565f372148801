//! Yield metrics: APR/APY, compounded return and simple risk measures.
//!
//! All functions are pure. [`calculate_yield_metrics`] reports percentages
//! multiplied by 100 and rounded half-even; the helpers return raw fractions.

use serde::{Deserialize, Serialize};

use super::compounding::CompoundingPeriod;
use crate::constants::*;
use crate::math::{round_half_even, sample_std_dev, simple_returns};

/// Reported yield figures.
///
/// `apy`, `apr`, `risk_adjusted_return` and `volatility` are percentages with
/// two decimals, `daily_rate` a percentage with four, `total_return` an amount
/// with two and `sharpe_ratio` a plain ratio with two.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldMetrics {
    pub apy: f64,
    pub apr: f64,
    pub daily_rate: f64,
    pub total_return: f64,
    pub risk_adjusted_return: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
}

/// `(1 + r/n)^n - 1`. Yearly compounding returns the nominal rate unchanged.
pub fn apy(rate: f64, period: CompoundingPeriod) -> f64 {
    let n = period.frequency();
    if n == 1 {
        return rate;
    }
    compound_growth(rate, n as f64, n as f64)
}

/// `principal * ((1 + r/n)^(n*t) - 1)` with `t = days / 365`.
pub fn total_return(principal: f64, rate: f64, days: u32, period: CompoundingPeriod) -> f64 {
    let n = period.frequency() as f64;
    let t = days as f64 / DAYS_PER_YEAR;
    principal * compound_growth(rate, n, n * t)
}

/// `(1 + r/n)^periods - 1`, evaluated through `ln_1p`/`exp_m1` so small
/// rates keep their precision.
fn compound_growth(rate: f64, n: f64, periods: f64) -> f64 {
    (periods * (rate / n).ln_1p()).exp_m1()
}

/// Sample standard deviation of simple returns. Zero below two prices.
pub fn volatility(historical_prices: &[f64]) -> f64 {
    if historical_prices.len() < 2 {
        return 0.0;
    }
    sample_std_dev(&simple_returns(historical_prices))
}

pub fn risk_adjusted_return(apy: f64, volatility: f64) -> f64 {
    apy / (1.0 + volatility)
}

/// `(apy - risk_free) / volatility`, or zero without volatility.
pub fn sharpe_ratio(apy: f64, volatility: f64) -> f64 {
    if volatility > 0.0 {
        (apy - RISK_FREE_RATE) / volatility
    } else {
        0.0
    }
}

pub fn calculate_yield_metrics(
    principal: f64,
    reward_rate: f64,
    lock_period_days: u32,
    period: CompoundingPeriod,
    historical_prices: Option<&[f64]>,
) -> YieldMetrics {
    let apy = apy(reward_rate, period);
    let daily_rate = reward_rate / DAYS_PER_YEAR;
    let total = total_return(principal, reward_rate, lock_period_days, period);
    let volatility = historical_prices.map_or(0.0, volatility);

    YieldMetrics {
        apy: percent(apy),
        apr: percent(reward_rate),
        daily_rate: round_half_even(daily_rate * 100.0, DAILY_RATE_DECIMALS),
        total_return: round_half_even(total, PERCENT_DECIMALS),
        risk_adjusted_return: percent(risk_adjusted_return(apy, volatility)),
        volatility: percent(volatility),
        sharpe_ratio: round_half_even(sharpe_ratio(apy, volatility), PERCENT_DECIMALS),
    }
}

fn percent(fraction: f64) -> f64 {
    round_half_even(fraction * 100.0, PERCENT_DECIMALS)
}
