//! Reward distribution.
//!
//! A batch is settled in three steps:
//! 1. every entry becomes a PENDING [`RewardEvent`] with a fresh id and timestamp,
//! 2. all transfers run concurrently, each bounded by the settlement timeout,
//! 3. each event is settled exactly once and appended to history.
//!
//! History is only ever appended to. Appends take one short lock and insert by
//! `(timestamp, sequence)`, so a pool's history stays in timestamp order even
//! when two batches finish out of order.

use std::collections::{BTreeMap, HashMap};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::DateTime;
use futures_util::future::join_all;
use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::bonus::BonusPolicy;
use super::calculator::{self, RewardBreakdown};
use super::settlement::{LedgerSettlement, SettlementError};
use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::state::{EventStatus, PositionSnapshot, RewardEvent, RewardType};

/// One payout requested in a distribution batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardEntry {
    #[serde(rename = "type", default)]
    pub reward_type: RewardType,
    pub amount: f64,
    pub recipient: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl RewardEntry {
    pub fn new(recipient: impl Into<String>, amount: f64) -> Self {
        Self {
            reward_type: RewardType::default(),
            amount,
            recipient: recipient.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_type(mut self, reward_type: RewardType) -> Self {
        self.reward_type = reward_type;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Default)]
struct DistributionLog {
    by_pool: HashMap<String, Vec<RewardEvent>>,
    all: Vec<RewardEvent>,
}

impl DistributionLog {
    fn append(&mut self, event: RewardEvent) {
        insert_ordered(
            self.by_pool.entry(event.pool_id.clone()).or_default(),
            event.clone(),
        );
        insert_ordered(&mut self.all, event);
    }
}

fn insert_ordered(events: &mut Vec<RewardEvent>, event: RewardEvent) {
    let key = event.order_key();
    let at = events.partition_point(|e| e.order_key() <= key);
    events.insert(at, event);
}

pub struct RewardDistributor {
    settlement: Arc<dyn LedgerSettlement>,
    clock: Arc<dyn Clock>,
    policy: BonusPolicy,
    settlement_timeout: Duration,
    sequence: AtomicU64,
    log: Mutex<DistributionLog>,
}

impl RewardDistributor {
    pub fn new(
        settlement: Arc<dyn LedgerSettlement>,
        clock: Arc<dyn Clock>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            settlement,
            clock,
            policy: config.bonus.clone(),
            settlement_timeout: config.settlement_timeout(),
            sequence: AtomicU64::new(0),
            log: Mutex::new(DistributionLog::default()),
        }
    }

    pub fn policy(&self) -> &BonusPolicy {
        &self.policy
    }

    /// Base and bonus reward for a position.
    ///
    /// `policy` overrides the configured bonus thresholds for this call.
    pub fn calculate_rewards(
        &self,
        position: &PositionSnapshot,
        policy: Option<&BonusPolicy>,
    ) -> RewardBreakdown {
        let policy = policy.unwrap_or(&self.policy);
        calculator::calculate_rewards(position, policy, self.clock.now())
    }

    /// Pays out a batch of rewards for `pool_id`.
    ///
    /// Every returned event is COMPLETED or FAILED. Failures carry the reason
    /// under the `error` metadata key. Must be called from within a tokio
    /// runtime.
    pub async fn distribute_rewards(
        &self,
        pool_id: &str,
        entries: Vec<RewardEntry>,
    ) -> Vec<RewardEvent> {
        let pending: Vec<RewardEvent> = entries
            .into_iter()
            .map(|entry| self.open_event(pool_id, entry))
            .collect();

        let outcomes = join_all(
            pending
                .iter()
                .map(|event| self.submit(&event.recipient, event.amount)),
        )
        .await;

        let settled: Vec<RewardEvent> = pending
            .into_iter()
            .zip(outcomes)
            .map(|(event, outcome)| self.close_event(event, outcome))
            .collect();

        {
            let mut log = self.log.lock().unwrap_or_else(PoisonError::into_inner);
            for event in &settled {
                log.append(event.clone());
            }
        }

        let completed = settled
            .iter()
            .filter(|e| e.status == EventStatus::Completed)
            .count();
        info!(
            pool_id,
            events = settled.len(),
            completed,
            failed = settled.len() - completed,
            "Reward batch distributed"
        );

        settled
    }

    /// Events for one pool, or for all pools when `pool_id` is `None`,
    /// within the inclusive `[start, end]` window, newest first.
    pub fn get_distribution_history(
        &self,
        pool_id: Option<&str>,
        start: Option<i64>,
        end: Option<i64>,
    ) -> Vec<RewardEvent> {
        let log = self.log.lock().unwrap_or_else(PoisonError::into_inner);
        let events = match pool_id {
            Some(id) => match log.by_pool.get(id) {
                Some(events) => events,
                None => return Vec::new(),
            },
            None => &log.all,
        };

        // stored oldest first
        events
            .iter()
            .rev()
            .filter(|e| start.map_or(true, |s| e.timestamp >= s))
            .filter(|e| end.map_or(true, |t| e.timestamp <= t))
            .cloned()
            .collect()
    }

    fn open_event(&self, pool_id: &str, entry: RewardEntry) -> RewardEvent {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let timestamp = self.clock.now();
        RewardEvent {
            event_id: event_id(timestamp, sequence),
            sequence,
            reward_type: entry.reward_type,
            amount: entry.amount,
            timestamp,
            recipient: entry.recipient,
            pool_id: pool_id.to_string(),
            status: EventStatus::Pending,
            metadata: entry.metadata,
        }
    }

    async fn submit(&self, recipient: &str, amount: f64) -> Result<(), SettlementError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(SettlementError::InvalidAmount(amount));
        }

        let transfer = AssertUnwindSafe(self.settlement.submit_transfer(recipient, amount))
            .catch_unwind();

        match tokio::time::timeout(self.settlement_timeout, transfer).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(SettlementError::Panicked),
            Err(_) => Err(SettlementError::TimedOut(self.settlement_timeout)),
        }
    }

    fn close_event(
        &self,
        mut event: RewardEvent,
        outcome: Result<(), SettlementError>,
    ) -> RewardEvent {
        match outcome {
            Ok(()) => {
                event.settle(EventStatus::Completed);
                debug!(
                    event_id = %event.event_id,
                    recipient = %event.recipient,
                    amount = event.amount,
                    "Reward settled"
                );
            }
            Err(err) => {
                event.metadata.insert("error".into(), err.to_string());
                event
                    .metadata
                    .insert("error_time".into(), rfc3339(self.clock.now()));
                event.settle(EventStatus::Failed);
                warn!(
                    event_id = %event.event_id,
                    recipient = %event.recipient,
                    amount = event.amount,
                    error = %err,
                    "Reward settlement failed"
                );
            }
        }
        event
    }
}

/// `REW_{YYYYMMDD_HHMMSS}_{sequence}`
fn event_id(timestamp: i64, sequence: u64) -> String {
    let stamp = DateTime::from_timestamp(timestamp, 0)
        .map(|t| t.format("%Y%m%d_%H%M%S").to_string())
        .unwrap_or_else(|| timestamp.to_string());
    format!("REW_{stamp}_{sequence}")
}

fn rfc3339(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| timestamp.to_string())
}
