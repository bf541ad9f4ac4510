//! Service-level errors.

use std::path::PathBuf;

use aureus_ledger::LedgerError;
use aureus_quota::QuotaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Quota(#[from] QuotaError),
}
