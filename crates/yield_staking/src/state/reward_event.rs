use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StakingError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardType {
    #[default]
    Staking,
    Performance,
    Referral,
    Special,
}

impl RewardType {
    pub fn as_str(self) -> &'static str {
        match self {
            RewardType::Staking => "STAKING",
            RewardType::Performance => "PERFORMANCE",
            RewardType::Referral => "REFERRAL",
            RewardType::Special => "SPECIAL",
        }
    }
}

impl FromStr for RewardType {
    type Err = StakingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "STAKING" => Ok(RewardType::Staking),
            "PERFORMANCE" => Ok(RewardType::Performance),
            "REFERRAL" => Ok(RewardType::Referral),
            "SPECIAL" => Ok(RewardType::Special),
            other => Err(StakingError::InvalidRewardType(other.to_string())),
        }
    }
}

impl fmt::Display for RewardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement status. Terminal once it leaves `PENDING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Pending,
    Completed,
    Failed,
}

impl EventStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, EventStatus::Pending)
    }
}

/// One reward payout attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardEvent {
    pub event_id: String,
    /// Global creation order, breaks timestamp ties.
    pub sequence: u64,
    pub reward_type: RewardType,
    pub amount: f64,
    pub timestamp: i64,
    pub recipient: String,
    pub pool_id: String,
    pub status: EventStatus,
    pub metadata: BTreeMap<String, String>,
}

impl RewardEvent {
    /// Records the settlement outcome. Returns `false` if the event was already settled.
    pub fn settle(&mut self, status: EventStatus) -> bool {
        if self.status.is_terminal() || !status.is_terminal() {
            return false;
        }
        self.status = status;
        true
    }

    /// Ordering key for history: timestamp first, creation order second.
    pub fn order_key(&self) -> (i64, u64) {
        (self.timestamp, self.sequence)
    }
}
