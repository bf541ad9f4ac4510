//! Writes finalized transfers to the settlement slot.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use aureus_transactions::SignedTransfer;

use crate::error::BridgeError;

/// Exports finalized transfers to a fixed path for the settlement consumer.
///
/// The slot holds at most one transfer and is overwritten on every export
/// (last-write-wins). If two transfers complete before the consumer reads
/// the slot, the earlier one is dropped. The contract is a slot, not a
/// queue.
pub struct BridgeExporter {
    path: PathBuf,
}

impl BridgeExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the transfer and overwrite the slot.
    pub fn export(&self, transfer: &SignedTransfer) -> Result<(), BridgeError> {
        let json = serde_json::to_vec(transfer)
            .map_err(|e| BridgeError::Serialization(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| BridgeError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        tracing::debug!(
            sender = %transfer.sender,
            recipient = %transfer.recipient,
            amount = transfer.amount,
            path = %self.path.display(),
            "transfer exported to settlement slot"
        );
        Ok(())
    }

    /// Read back the current slot contents.
    ///
    /// `None` when nothing has been exported yet.
    pub fn last_exported(&self) -> Result<Option<SignedTransfer>, BridgeError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(BridgeError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| BridgeError::Serialization(e.to_string()))
    }
}
