//! Quota-specific errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuotaError {
    #[error("spend amount must be positive")]
    InvalidAmount,

    #[error("insufficient quota: need {needed}, have {available}")]
    InsufficientQuota { needed: u64, available: u64 },

    #[error("failed to persist spend log: {0}")]
    Persist(String),
}
