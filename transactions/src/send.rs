//! Signed transfer: the transaction exported to the settlement layer.

use aureus_crypto::{sign_message, verify_signature_detailed, VerifyError};
use aureus_types::{KeyPair, PublicKey, Signature};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical signing message for a transfer.
///
/// The three fields joined by `:` into one byte string. Signatures cover
/// these literal bytes; there is no hashing or framing step.
pub fn signing_message(sender: &str, recipient: &str, amount: u64) -> Vec<u8> {
    format!("{sender}:{recipient}:{amount}").into_bytes()
}

/// A finalized, signed transfer.
///
/// Constructed per transfer, exported through the bridge, then dropped.
/// These five fields, with the key material hex-encoded, are exactly the
/// settlement snapshot contract.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignedTransfer {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
    pub public_key: PublicKey,
    pub signature: Signature,
}

impl SignedTransfer {
    /// Build and sign a transfer with the sender's keys.
    pub fn sign(sender: &str, recipient: &str, amount: u64, keys: &KeyPair) -> Self {
        let message = signing_message(sender, recipient, amount);
        let signature = sign_message(&message, &keys.private);
        Self {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
            public_key: keys.public.clone(),
            signature,
        }
    }

    /// Check the embedded signature against the embedded public key.
    pub fn verify(&self) -> Result<(), VerifyError> {
        let message = signing_message(&self.sender, &self.recipient, self.amount);
        verify_signature_detailed(&message, &self.signature, &self.public_key)
    }
}

/// In-memory history entry, appended once per successful transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use aureus_crypto::generate_keypair;

    #[test]
    fn canonical_message_bytes() {
        assert_eq!(signing_message("alice", "bob", 40), b"alice:bob:40");
        assert_eq!(signing_message("", "", 0), b"::0");
    }

    #[test]
    fn sign_then_verify() {
        let keys = generate_keypair();
        let transfer = SignedTransfer::sign("alice", "bob", 40, &keys);
        assert!(transfer.verify().is_ok());
    }

    #[test]
    fn tampered_amount_fails_verification() {
        let keys = generate_keypair();
        let mut transfer = SignedTransfer::sign("alice", "bob", 40, &keys);
        transfer.amount = 41;
        assert!(transfer.verify().is_err());
    }

    #[test]
    fn tampered_recipient_fails_verification() {
        let keys = generate_keypair();
        let mut transfer = SignedTransfer::sign("alice", "bob", 40, &keys);
        transfer.recipient = "mallory".to_string();
        assert!(transfer.verify().is_err());
    }

    #[test]
    fn json_shape_matches_settlement_contract() {
        let keys = generate_keypair();
        let transfer = SignedTransfer::sign("alice", "bob", 40, &keys);
        let value: serde_json::Value = serde_json::to_value(&transfer).unwrap();

        assert_eq!(value["sender"], "alice");
        assert_eq!(value["recipient"], "bob");
        assert_eq!(value["amount"], 40);
        assert_eq!(
            value["public_key"].as_str().unwrap(),
            keys.public.to_hex()
        );
        assert_eq!(value["signature"].as_str().unwrap().len(), 128);
        assert_eq!(value.as_object().unwrap().len(), 5);
    }

    #[test]
    fn json_roundtrip_preserves_signature() {
        let keys = generate_keypair();
        let transfer = SignedTransfer::sign("alice", "bob", 7, &keys);
        let json = serde_json::to_string(&transfer).unwrap();
        let back: SignedTransfer = serde_json::from_str(&json).unwrap();
        assert!(back.verify().is_ok());
        assert_eq!(back.amount, 7);
    }
}
