//! Daily token quota — a rate-limiting balance independent of the account
//! ledger.
//!
//! Each user holds a quota balance that refills to the daily allowance the
//! first time the user is touched on a new UTC calendar day. Spending burns
//! quota on the sender only and appends to a persisted spend log. There is
//! no interaction with account balances.

pub mod engine;
pub mod error;

pub use engine::{QuotaEngine, DAILY_QUOTA};
pub use error::QuotaError;
