//! State structures for the staking engine.
//!
//! Pools own their positions; reward events are owned by the distributor's log.

pub mod reward_event;
pub mod stake_pool;
pub mod staking_position;

pub use reward_event::*;
pub use stake_pool::*;
pub use staking_position::*;
