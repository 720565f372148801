use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StakingError};

/// How often yield is notionally reinvested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundingPeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl CompoundingPeriod {
    /// Canonical order, most frequent first.
    pub const ALL: [CompoundingPeriod; 5] = [
        CompoundingPeriod::Daily,
        CompoundingPeriod::Weekly,
        CompoundingPeriod::Monthly,
        CompoundingPeriod::Quarterly,
        CompoundingPeriod::Yearly,
    ];

    /// Compounding events per year.
    pub fn frequency(self) -> u32 {
        match self {
            CompoundingPeriod::Daily => 365,
            CompoundingPeriod::Weekly => 52,
            CompoundingPeriod::Monthly => 12,
            CompoundingPeriod::Quarterly => 4,
            CompoundingPeriod::Yearly => 1,
        }
    }

    /// Whole days between compounding events: 1, 7, 30, 91, 365.
    pub fn interval_days(self) -> u32 {
        365 / self.frequency()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompoundingPeriod::Daily => "daily",
            CompoundingPeriod::Weekly => "weekly",
            CompoundingPeriod::Monthly => "monthly",
            CompoundingPeriod::Quarterly => "quarterly",
            CompoundingPeriod::Yearly => "yearly",
        }
    }
}

impl FromStr for CompoundingPeriod {
    type Err = StakingError;

    fn from_str(s: &str) -> Result<Self> {
        CompoundingPeriod::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| StakingError::InvalidCompoundingPeriod(s.to_string()))
    }
}

impl fmt::Display for CompoundingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
