//! Transaction types for the aureus wallet core.
//!
//! Two record families live here:
//! - **Send**: the signed transfer handed to the settlement layer, plus the
//!   in-memory history record kept per successful transfer.
//! - **Spend**: the quota-burn log entry persisted by the quota engine.

pub mod send;
pub mod spend;

pub use send::{signing_message, SignedTransfer, TransferRecord};
pub use spend::SpendRecord;
