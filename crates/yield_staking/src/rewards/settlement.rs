use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Why a reward transfer did not settle. Stored on the event, never raised.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettlementError {
    #[error("Transfer rejected: {0}")]
    Rejected(String),
    #[error("Transfer timed out after {0:?}")]
    TimedOut(Duration),
    #[error("Settlement backend panicked")]
    Panicked,
    #[error("Invalid transfer amount {0}")]
    InvalidAmount(f64),
}

/// External ledger that moves reward funds.
///
/// Retries, if any, are the implementation's business; the distributor calls
/// each transfer exactly once.
#[async_trait]
pub trait LedgerSettlement: Send + Sync {
    async fn submit_transfer(&self, recipient: &str, amount: f64) -> Result<(), SettlementError>;
}
