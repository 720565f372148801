use serde::{Deserialize, Serialize};

use super::compounding::CompoundingPeriod;
use crate::constants::*;
use crate::math::round_half_even;

/// Projected position value on one day of the lock period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub day: u32,
    pub value: f64,
    #[serde(rename = "yield")]
    pub yield_amount: f64,
    pub yield_percentage: f64,
}

/// Day-by-day projection from day 0 through the last day of the lock period.
///
/// Cloning (or [`restart`](Self::restart)) starts the sequence over; every run
/// produces the same points.
#[derive(Debug, Clone)]
pub struct YieldProjection {
    principal: f64,
    reward_rate: f64,
    lock_period_days: u32,
    period: CompoundingPeriod,
    next_day: u32,
    done: bool,
    /// Running value after `credits` interest credits.
    value: f64,
    credits: u64,
}

impl YieldProjection {
    pub fn new(
        principal: f64,
        reward_rate: f64,
        lock_period_days: u32,
        period: CompoundingPeriod,
    ) -> Self {
        Self {
            principal,
            reward_rate,
            lock_period_days,
            period,
            next_day: 0,
            done: false,
            value: principal,
            credits: 0,
        }
    }

    pub fn restart(&mut self) {
        self.next_day = 0;
        self.done = false;
        self.value = self.principal;
        self.credits = 0;
    }

    /// Unrounded value at the end of `day`.
    ///
    /// Interest is credited on day 0 too: daily compounding credits every day,
    /// coarser periods on each day divisible by
    /// [`CompoundingPeriod::interval_days`]. The factor is applied one credit
    /// at a time, in day order.
    pub fn value_at(&self, day: u32) -> f64 {
        let factor = 1.0 + self.period_rate();
        let mut value = self.principal;
        for _ in 0..self.credits_through(day) {
            let next = value * factor;
            // fixed point: zero rate, zero principal or overflow to infinity
            if next == value {
                break;
            }
            value = next;
        }
        value
    }

    fn period_rate(&self) -> f64 {
        match self.period {
            CompoundingPeriod::Daily => self.reward_rate / DAYS_PER_YEAR,
            other => self.reward_rate / other.frequency() as f64,
        }
    }

    /// Number of interest credits on days `0..=day`.
    fn credits_through(&self, day: u32) -> u64 {
        match self.period {
            CompoundingPeriod::Daily => u64::from(day) + 1,
            other => u64::from(day / other.interval_days()) + 1,
        }
    }

    pub fn point(&self, day: u32) -> ProjectionPoint {
        self.point_from_value(day, self.value_at(day))
    }

    fn point_from_value(&self, day: u32, value: f64) -> ProjectionPoint {
        let gain = value - self.principal;
        let yield_percentage = if self.principal != 0.0 {
            gain / self.principal * 100.0
        } else {
            0.0
        };
        ProjectionPoint {
            day,
            value: round_half_even(value, PERCENT_DECIMALS),
            yield_amount: round_half_even(gain, PERCENT_DECIMALS),
            yield_percentage: round_half_even(yield_percentage, PERCENT_DECIMALS),
        }
    }

    pub fn is_key_day(&self, day: u32) -> bool {
        day == 0 || day == self.lock_period_days || day % KEY_POINT_INTERVAL_DAYS == 0
    }

    /// Day 0, every 30th day and the final day.
    pub fn key_points(&self) -> Vec<ProjectionPoint> {
        let mut run = self.clone();
        run.restart();
        run.filter(|p| self.is_key_day(p.day)).collect()
    }
}

impl Iterator for YieldProjection {
    type Item = ProjectionPoint;

    fn next(&mut self) -> Option<ProjectionPoint> {
        if self.done {
            return None;
        }
        let day = self.next_day;
        if day >= self.lock_period_days {
            self.done = true;
        } else {
            self.next_day += 1;
        }

        let factor = 1.0 + self.period_rate();
        let target = self.credits_through(day);
        while self.credits < target {
            self.value *= factor;
            self.credits += 1;
        }
        Some(self.point_from_value(day, self.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = if self.done {
            0
        } else {
            (self.lock_period_days - self.next_day) as usize + 1
        };
        (left, Some(left))
    }
}

impl ExactSizeIterator for YieldProjection {}

pub fn project_yields(
    principal: f64,
    reward_rate: f64,
    lock_period_days: u32,
    period: CompoundingPeriod,
) -> YieldProjection {
    YieldProjection::new(principal, reward_rate, lock_period_days, period)
}
