use alloy::primitives::U256;
use thiserror::Error;

/// Unified error type for the on-chain flows.
///
/// `InsufficientBalance` and `InvalidInput` are always raised before any
/// transaction is submitted; `Transaction` means a transaction was sent (or
/// rejected at the node) and is never retried.
#[derive(Debug, Error)]
pub enum OpsError {
    #[error("insufficient {symbol} balance: need {needed}, have {have}")]
    InsufficientBalance {
        symbol: String,
        needed: U256,
        have: U256,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("transaction failed: {0}")]
    Transaction(String),

    #[error("contract call error: {0}")]
    Contract(#[from] alloy::contract::Error),
}
