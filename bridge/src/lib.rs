//! Settlement bridge — the file-based hand-off between the wallet core and
//! the external settlement process.
//!
//! The contract is a single slot: one JSON object at a fixed path holding
//! the most recently finalized transfer. The settlement consumer polls the
//! slot; this side overwrites it on every successful transfer.

pub mod error;
pub mod exporter;

pub use error::BridgeError;
pub use exporter::BridgeExporter;
