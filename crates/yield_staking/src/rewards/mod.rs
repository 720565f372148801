//! Reward calculation and distribution.

pub mod bonus;
pub mod calculator;
pub mod distributor;
pub mod settlement;

pub use bonus::{BonusKind, BonusPolicy};
pub use calculator::{calculate_rewards, AppliedBonus, RewardBreakdown};
pub use distributor::{RewardDistributor, RewardEntry};
pub use settlement::{LedgerSettlement, SettlementError};
