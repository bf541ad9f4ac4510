//! Ed25519 message signing and verification.
//!
//! Verification comes in two flavors: a boolean boundary that collapses
//! every failure mode to `false` (what request handlers want), and a typed
//! [`verify_signature_detailed`] underneath for diagnostics.

use aureus_types::{PrivateKey, PublicKey, Signature};
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use thiserror::Error;

/// Why a signature check failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("public key bytes are not a valid Ed25519 point")]
    InvalidPublicKey,

    #[error("signature does not match message and public key")]
    BadSignature,

    #[error("public key is not valid hex of the right length")]
    MalformedKey,

    #[error("signature is not valid hex of the right length")]
    MalformedSignature,
}

/// Sign a message with a private key, returning the signature.
///
/// Ed25519 is deterministic: the same message and key always produce the
/// same signature.
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    Signature(signing_key.sign(message).to_bytes())
}

/// Verify a signature, reporting which stage failed.
pub fn verify_signature_detailed(
    message: &[u8],
    signature: &Signature,
    public_key: &PublicKey,
) -> Result<(), VerifyError> {
    let verifying_key =
        VerifyingKey::from_bytes(&public_key.0).map_err(|_| VerifyError::InvalidPublicKey)?;
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key
        .verify(message, &dalek_sig)
        .map_err(|_| VerifyError::BadSignature)
}

/// Verify a signature against a message and public key.
///
/// Returns `true` if the signature is valid, `false` otherwise. Never
/// panics: malformed keys and genuine mismatches both collapse to `false`.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    verify_signature_detailed(message, signature, public_key).is_ok()
}

/// Verify a signature supplied in wire form (hex strings), as read back from
/// a settlement snapshot.
pub fn verify_signature_hex(
    message: &[u8],
    signature_hex: &str,
    public_key_hex: &str,
) -> Result<(), VerifyError> {
    let public_key = PublicKey::from_hex(public_key_hex).ok_or(VerifyError::MalformedKey)?;
    let signature = Signature::from_hex(signature_hex).ok_or(VerifyError::MalformedSignature)?;
    verify_signature_detailed(message, &signature, &public_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{generate_keypair, keypair_from_seed};

    #[test]
    fn sign_and_verify() {
        let kp = generate_keypair();
        let msg = b"alice:bob:40";
        let sig = sign_message(msg, &kp.private);
        assert!(verify_signature(msg, &sig, &kp.public));
    }

    #[test]
    fn wrong_message_fails() {
        let kp = generate_keypair();
        let sig = sign_message(b"alice:bob:40", &kp.private);
        assert!(!verify_signature(b"alice:bob:41", &sig, &kp.public));
    }

    #[test]
    fn wrong_key_fails() {
        let kp1 = generate_keypair();
        let kp2 = generate_keypair();
        let sig = sign_message(b"payload", &kp1.private);
        assert!(!verify_signature(b"payload", &sig, &kp2.public));
    }

    #[test]
    fn signature_deterministic() {
        let kp = keypair_from_seed(&[99u8; 32]);
        let sig1 = sign_message(b"deterministic", &kp.private);
        let sig2 = sign_message(b"deterministic", &kp.private);
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn flipping_one_message_byte_fails() {
        let kp = generate_keypair();
        let mut msg = b"alice:bob:40".to_vec();
        let sig = sign_message(&msg, &kp.private);
        msg[0] ^= 0x01;
        assert!(!verify_signature(&msg, &sig, &kp.public));
    }

    #[test]
    fn flipping_one_signature_byte_fails() {
        let kp = generate_keypair();
        let mut sig = sign_message(b"alice:bob:40", &kp.private);
        sig.0[17] ^= 0x01;
        assert!(!verify_signature(b"alice:bob:40", &sig, &kp.public));
    }

    #[test]
    fn flipping_one_public_key_byte_fails() {
        let kp = generate_keypair();
        let sig = sign_message(b"alice:bob:40", &kp.private);
        let mut tampered = kp.public.clone();
        tampered.0[5] ^= 0x01;
        assert!(!verify_signature(b"alice:bob:40", &sig, &tampered));
    }

    #[test]
    fn invalid_public_key_reported() {
        let kp = generate_keypair();
        let sig = sign_message(b"payload", &kp.private);
        let bad_key = PublicKey([0xFF; 32]);
        assert_eq!(
            verify_signature_detailed(b"payload", &sig, &bad_key),
            Err(VerifyError::InvalidPublicKey)
        );
        assert!(!verify_signature(b"payload", &sig, &bad_key));
    }

    #[test]
    fn mismatch_reported_as_bad_signature() {
        let kp = generate_keypair();
        let sig = sign_message(b"payload", &kp.private);
        assert_eq!(
            verify_signature_detailed(b"other", &sig, &kp.public),
            Err(VerifyError::BadSignature)
        );
    }

    #[test]
    fn hex_verification_roundtrip() {
        let kp = generate_keypair();
        let sig = sign_message(b"alice:bob:40", &kp.private);
        assert_eq!(
            verify_signature_hex(b"alice:bob:40", &sig.to_hex(), &kp.public.to_hex()),
            Ok(())
        );
    }

    #[test]
    fn hex_verification_rejects_malformed_input() {
        let kp = generate_keypair();
        let sig = sign_message(b"payload", &kp.private);
        assert_eq!(
            verify_signature_hex(b"payload", &sig.to_hex(), "not-hex"),
            Err(VerifyError::MalformedKey)
        );
        assert_eq!(
            verify_signature_hex(b"payload", "abcd", &kp.public.to_hex()),
            Err(VerifyError::MalformedSignature)
        );
    }
}
