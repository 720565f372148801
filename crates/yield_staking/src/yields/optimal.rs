use serde::{Deserialize, Serialize};

use super::compounding::CompoundingPeriod;
use super::metrics::apy;
use crate::constants::PERCENT_DECIMALS;
use crate::math::round_half_even;

/// APY achieved by one compounding period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodApy {
    pub period: CompoundingPeriod,
    pub frequency: u32,
    /// Percent, two decimals.
    pub apy: f64,
    /// APY above the nominal rate, percent, two decimals.
    pub effective_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalCompounding {
    pub lock_period_days: u32,
    /// Canonical order: daily, weekly, monthly, quarterly, yearly.
    pub periods: Vec<PeriodApy>,
    pub optimal_period: CompoundingPeriod,
    pub optimal: PeriodApy,
}

/// Compares APY across every compounding period.
///
/// The optimum is the highest unrounded APY; ties go to the earlier period in
/// canonical order, so any positive rate selects daily.
pub fn calculate_optimal_compound_period(
    reward_rate: f64,
    lock_period_days: u32,
) -> OptimalCompounding {
    let mut best: Option<(CompoundingPeriod, f64)> = None;
    let mut periods = Vec::with_capacity(CompoundingPeriod::ALL.len());

    for period in CompoundingPeriod::ALL {
        let value = apy(reward_rate, period);
        if best.map_or(true, |(_, top)| value > top) {
            best = Some((period, value));
        }
        periods.push(PeriodApy {
            period,
            frequency: period.frequency(),
            apy: round_half_even(value * 100.0, PERCENT_DECIMALS),
            effective_rate: round_half_even((value - reward_rate) * 100.0, PERCENT_DECIMALS),
        });
    }

    let optimal_period = best.map_or(CompoundingPeriod::Daily, |(period, _)| period);
    let optimal = periods
        .iter()
        .copied()
        .find(|p| p.period == optimal_period)
        .unwrap_or(periods[0]);

    OptimalCompounding {
        lock_period_days,
        periods,
        optimal_period,
        optimal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_wins_for_positive_rates() {
        for rate in [1e-9, 0.0001, 0.05, 0.10, 0.35, 2.0] {
            let result = calculate_optimal_compound_period(rate, 90);
            assert_eq!(result.optimal_period, CompoundingPeriod::Daily, "rate {rate}");
        }
    }

    #[test]
    fn test_zero_rate_tie_goes_to_first() {
        let result = calculate_optimal_compound_period(0.0, 30);
        assert_eq!(result.optimal_period, CompoundingPeriod::Daily);
        assert!(result.periods.iter().all(|p| p.apy == 0.0));
    }

    #[test]
    fn test_period_table() {
        let result = calculate_optimal_compound_period(0.10, 365);
        let order: Vec<CompoundingPeriod> = result.periods.iter().map(|p| p.period).collect();
        assert_eq!(order, CompoundingPeriod::ALL.to_vec());

        let yearly = result.periods[4];
        assert_eq!(yearly.frequency, 1);
        assert_eq!(yearly.apy, 10.0);
        assert_eq!(yearly.effective_rate, 0.0);

        assert_eq!(result.optimal.apy, 10.52);
        assert_eq!(result.optimal.effective_rate, 0.52);
        assert_eq!(result.lock_period_days, 365);
    }
}
