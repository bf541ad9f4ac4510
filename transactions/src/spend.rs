//! Spend record: one entry in the quota engine's append-only log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A quota spend. Strictly a burn on the sender's quota; the recipient is
/// recorded for audit but receives nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendRecord {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
    pub timestamp: DateTime<Utc>,
}
