//! The account ledger — a local balance view in front of the external
//! settlement process.
//!
//! This crate handles:
//! - Account creation with per-account Ed25519 keypairs
//! - Balance bookkeeping with a non-negative invariant
//! - Signed transfers: check → debit/credit → sign → record → export
//! - In-memory transfer history

pub mod engine;
pub mod error;

pub use engine::AccountLedger;
pub use error::LedgerError;
