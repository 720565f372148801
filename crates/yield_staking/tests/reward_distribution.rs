use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use yield_staking::{
    BonusKind, EngineConfig, EventStatus, LedgerSettlement, ManualClock, RewardDistributor,
    RewardEntry, RewardType, SettlementError, StakingManager,
};

const START: i64 = 1_700_000_000;

#[derive(Default)]
struct RecordingLedger {
    transfers: Mutex<Vec<(String, f64)>>,
}

#[async_trait]
impl LedgerSettlement for RecordingLedger {
    async fn submit_transfer(&self, recipient: &str, amount: f64) -> Result<(), SettlementError> {
        if recipient == "frozen" {
            return Err(SettlementError::Rejected("account frozen".into()));
        }
        self.transfers.lock().unwrap().push((recipient.to_string(), amount));
        Ok(())
    }
}

#[tokio::test]
async fn test_rewards_for_unstaked_position_are_paid() {
    let clock = Arc::new(ManualClock::new(START));
    let manager = StakingManager::new(clock.clone());
    let ledger = Arc::new(RecordingLedger::default());
    let distributor =
        RewardDistributor::new(ledger.clone(), clock.clone(), &EngineConfig::default());

    let pool_id = manager
        .create_pool("admin", "BIZ7", 100.0, 50_000.0, 0.10)
        .unwrap()
        .pool_id;
    manager.stake(&pool_id, "whale", 20_000.0, 180).unwrap();
    clock.advance_days(180);

    let snapshot = manager.position_snapshot(&pool_id, "whale").unwrap();
    assert_eq!(snapshot.days, 180);
    let breakdown = distributor.calculate_rewards(&snapshot, None);

    let expected_base = 20_000.0 * (0.15 / 365.0) * 180.0;
    assert!((breakdown.base_reward - expected_base).abs() < 1e-6);
    let eligible: Vec<BonusKind> = breakdown.eligible().collect();
    assert_eq!(eligible, vec![BonusKind::LargeStake, BonusKind::LongTerm]);
    assert!((breakdown.total_reward - expected_base * 1.40).abs() < 1e-6);

    let receipt = manager.unstake(&pool_id, "whale").unwrap();
    let events = distributor
        .distribute_rewards(
            &pool_id,
            vec![
                RewardEntry::new("whale", receipt.rewards),
                RewardEntry::new("whale", breakdown.bonus_reward)
                    .with_type(RewardType::Performance),
                RewardEntry::new("frozen", 1.0),
            ],
        )
        .await;

    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.status != EventStatus::Pending));
    assert_eq!(events[0].status, EventStatus::Completed);
    assert_eq!(events[1].reward_type, RewardType::Performance);
    assert_eq!(events[2].status, EventStatus::Failed);
    assert!(events[2].metadata["error"].contains("account frozen"));
    assert_eq!(ledger.transfers.lock().unwrap().len(), 2);

    manager.settle_unstake(&pool_id, "whale").unwrap();

    let history = distributor.get_distribution_history(Some(&pool_id), None, None);
    assert_eq!(history.len(), 3);
    assert!(history.windows(2).all(|w| w[0].order_key() >= w[1].order_key()));
    assert!(distributor
        .get_distribution_history(Some("POOL_UNKNOWN"), None, None)
        .is_empty());
    assert!(distributor
        .get_distribution_history(None, Some(START + 181 * 86_400), None)
        .is_empty());
}

#[tokio::test]
async fn test_history_across_pools() {
    let clock = Arc::new(ManualClock::new(START));
    let distributor = RewardDistributor::new(
        Arc::new(RecordingLedger::default()),
        clock.clone(),
        &EngineConfig::default(),
    );

    distributor
        .distribute_rewards("POOL_A", vec![RewardEntry::new("a", 1.0)])
        .await;
    clock.advance_days(1);
    distributor
        .distribute_rewards("POOL_B", vec![RewardEntry::new("b", 2.0)])
        .await;

    let all = distributor.get_distribution_history(None, None, None);
    let pools: Vec<&str> = all.iter().map(|e| e.pool_id.as_str()).collect();
    assert_eq!(pools, vec!["POOL_B", "POOL_A"]);

    let first_day = distributor.get_distribution_history(None, Some(START), Some(START));
    assert_eq!(first_day.len(), 1);
    assert_eq!(first_day[0].recipient, "a");
    assert!(first_day[0].event_id.starts_with("REW_20231114_"));
}
