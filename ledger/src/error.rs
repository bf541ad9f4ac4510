//! Ledger-specific errors.

use aureus_bridge::BridgeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("transfer amount must be positive")]
    InvalidAmount,

    #[error("unknown account: {0}")]
    UnknownAccount(String),

    #[error("account {0} has no signing keys")]
    MissingKeyPair(String),

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    #[error("balance overflow crediting {0}")]
    BalanceOverflow(String),

    #[error("settlement export failed: {0}")]
    Bridge(#[from] BridgeError),
}
