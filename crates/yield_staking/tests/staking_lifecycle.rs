use std::sync::Arc;
use std::thread;

use yield_staking::{
    AdminList, Clock, LockPeriod, ManualClock, PositionStatus, StakingError, StakingManager,
};

const START: i64 = 1_700_000_000;

fn setup() -> (StakingManager, Arc<ManualClock>, String) {
    let clock = Arc::new(ManualClock::new(START));
    let manager = StakingManager::new(clock.clone());
    let pool = manager
        .create_pool("admin", "BIZ1", 100.0, 10_000.0, 0.10)
        .unwrap();
    (manager, clock, pool.pool_id)
}

#[test]
fn test_stake_hold_unstake_settle() {
    let (manager, clock, pool_id) = setup();
    assert!(pool_id.starts_with("POOL_BIZ1_"));

    let position = manager.stake(&pool_id, "alice", 1000.0, 90).unwrap();
    assert_eq!(position.status, PositionStatus::Active);
    assert!((position.reward_rate - 0.12).abs() < 1e-12);
    assert_eq!(manager.get_pool_stats(&pool_id).unwrap().total_staked, 1000.0);

    clock.advance_days(89);
    match manager.unstake(&pool_id, "alice") {
        Err(StakingError::LockPeriodNotEnded { unlocks_at, .. }) => {
            assert_eq!(unlocks_at, START + 90 * 86_400);
        }
        other => panic!("expected lock error, got {other:?}"),
    }

    clock.advance_days(1);
    let receipt = manager.unstake(&pool_id, "alice").unwrap();
    assert_eq!(receipt.principal, 1000.0);
    assert_eq!(receipt.rewards, 29.589041);
    assert!((receipt.total - 1029.589041).abs() < 1e-9);

    let stats = manager.get_pool_stats(&pool_id).unwrap();
    assert_eq!(stats.total_staked, 0.0);
    assert_eq!(stats.active_positions, 0);
    assert_eq!(stats.average_stake, 0.0);

    let settled = manager.settle_unstake(&pool_id, "alice").unwrap();
    assert_eq!(settled.status, PositionStatus::Completed);
    assert_eq!(settled.last_claim_time, Some(clock.now()));

    // a finished position does not block a new stake
    manager.stake(&pool_id, "alice", 500.0, 30).unwrap();
    assert_eq!(manager.get_pool_stats(&pool_id).unwrap().total_staked, 500.0);
}

#[test]
fn test_rejections_leave_pool_untouched() {
    let (manager, _clock, pool_id) = setup();
    manager.stake(&pool_id, "alice", 1000.0, 30).unwrap();
    let before = manager.registry().snapshot(&pool_id).unwrap();

    assert!(matches!(
        manager.stake(&pool_id, "bob", 99.99, 30),
        Err(StakingError::AmountOutOfRange { .. })
    ));
    assert!(matches!(
        manager.stake(&pool_id, "bob", 10_000.01, 30),
        Err(StakingError::AmountOutOfRange { .. })
    ));
    assert!(matches!(
        manager.stake(&pool_id, "bob", 500.0, 45),
        Err(StakingError::InvalidLockPeriod(45))
    ));
    assert!(matches!(
        manager.stake(&pool_id, "alice", 500.0, 30),
        Err(StakingError::DuplicatePosition { .. })
    ));
    assert!(matches!(
        manager.stake("POOL_MISSING", "bob", 500.0, 30),
        Err(StakingError::PoolNotFound(_))
    ));
    assert!(matches!(
        manager.unstake(&pool_id, "nobody"),
        Err(StakingError::PositionNotFound { .. })
    ));

    assert_eq!(manager.registry().snapshot(&pool_id).unwrap(), before);
}

#[test]
fn test_bounds_are_inclusive() {
    let (manager, _clock, pool_id) = setup();
    manager.stake(&pool_id, "min", 100.0, 30).unwrap();
    manager.stake(&pool_id, "max", 10_000.0, 360).unwrap();

    let stats = manager.get_pool_stats(&pool_id).unwrap();
    assert_eq!(stats.active_positions, 2);
    assert_eq!(stats.total_staked, 10_100.0);
    assert_eq!(stats.average_stake, 5_050.0);

    let max = manager.position(&pool_id, "max").unwrap();
    assert_eq!(max.lock_period, LockPeriod::Days360);
    assert!((max.reward_rate - 0.20).abs() < 1e-12);
}

#[test]
fn test_invalid_pool_configs() {
    let clock = Arc::new(ManualClock::new(START));
    let manager = StakingManager::new(clock);
    for (min, max, rate) in [
        (0.0, 100.0, 0.1),
        (100.0, 50.0, 0.1),
        (10.0, 100.0, -0.01),
        (f64::NAN, 100.0, 0.1),
    ] {
        assert!(
            matches!(
                manager.create_pool("admin", "BIZ", min, max, rate),
                Err(StakingError::InvalidConfig(_))
            ),
            "({min}, {max}, {rate})"
        );
    }
    assert!(manager.pool_ids().is_empty());
    assert!(manager.create_pool("admin", "BIZ", 10.0, 100.0, 0.0).is_ok());
    assert!(manager.create_pool("admin", "BIZ", 100.0, 100.0, 0.1).is_ok());
}

#[test]
fn test_cancel_requires_admin() {
    let clock = Arc::new(ManualClock::new(START));
    let manager =
        StakingManager::with_access_gate(clock, Arc::new(AdminList::new(["ops".to_string()])));

    assert!(matches!(
        manager.create_pool("mallory", "BIZ", 10.0, 100.0, 0.1),
        Err(StakingError::Unauthorized { .. })
    ));
    let pool_id = manager
        .create_pool("ops", "BIZ", 10.0, 100.0, 0.1)
        .unwrap()
        .pool_id;
    manager.stake(&pool_id, "alice", 50.0, 30).unwrap();

    assert!(matches!(
        manager.cancel_position("alice", &pool_id, "alice"),
        Err(StakingError::Unauthorized { .. })
    ));
    let cancelled = manager.cancel_position("ops", &pool_id, "alice").unwrap();
    assert_eq!(cancelled.status, PositionStatus::Cancelled);
    assert_eq!(manager.get_pool_stats(&pool_id).unwrap().total_staked, 0.0);
}

#[test]
fn test_concurrent_stakes_keep_total_consistent() {
    let (manager, clock, pool_id) = setup();
    let manager = Arc::new(manager);

    thread::scope(|s| {
        for i in 0..16 {
            let manager = manager.clone();
            let pool_id = pool_id.clone();
            s.spawn(move || {
                let investor = format!("investor-{i}");
                manager.stake(&pool_id, &investor, 100.0 + i as f64, 30).unwrap();
                // second attempt always loses
                assert!(manager.stake(&pool_id, &investor, 200.0, 30).is_err());
            });
        }
    });

    let expected: f64 = (0..16).map(|i| 100.0 + i as f64).sum();
    let pool = manager.registry().snapshot(&pool_id).unwrap();
    assert_eq!(pool.positions.len(), 16);
    assert!((pool.total_staked - expected).abs() < 1e-9);
    assert!(pool.check_total_staked());

    clock.advance_days(30);
    thread::scope(|s| {
        for i in 0..16 {
            let manager = manager.clone();
            let pool_id = pool_id.clone();
            s.spawn(move || {
                let investor = format!("investor-{i}");
                manager.unstake(&pool_id, &investor).unwrap();
                assert!(manager.unstake(&pool_id, &investor).is_err());
            });
        }
    });

    let pool = manager.registry().snapshot(&pool_id).unwrap();
    assert_eq!(pool.total_staked, 0.0);
    assert!(pool
        .positions
        .values()
        .all(|p| p.status == PositionStatus::Unstaking));
}

#[test]
fn test_wire_names() {
    let (manager, _clock, pool_id) = setup();
    let position = manager.stake(&pool_id, "alice", 1000.0, 90).unwrap();

    let json = serde_json::to_value(&position).unwrap();
    assert_eq!(json["status"], "ACTIVE");
    assert_eq!(json["lock_period"], 90);

    let back: yield_staking::StakingPosition = serde_json::from_value(json).unwrap();
    assert_eq!(back, position);

    assert!(serde_json::from_str::<LockPeriod>("45").is_err());
    assert_eq!(
        serde_json::to_string(&PositionStatus::Unstaking).unwrap(),
        "\"UNSTAKING\""
    );
}
