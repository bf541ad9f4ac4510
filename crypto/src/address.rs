//! Address derivation from public keys.
//!
//! An address is the lowercase hex encoding of the account's Ed25519 public
//! key: 64 characters, no prefix, no checksum. The mapping is bijective,
//! so key rotation is not possible; changing keys changes the identity.

use aureus_types::PublicKey;

/// Derive the external address for a public key.
pub fn derive_address(public_key: &PublicKey) -> String {
    public_key.to_hex()
}

/// Recover the public key encoded in an address.
///
/// Returns `None` if the address is not 64 hex characters.
pub fn decode_address(address: &str) -> Option<PublicKey> {
    PublicKey::from_hex(address)
}

/// Whether an address string is well-formed.
pub fn validate_address(address: &str) -> bool {
    decode_address(address).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{generate_keypair, keypair_from_seed};

    #[test]
    fn derive_and_validate() {
        let kp = generate_keypair();
        let addr = derive_address(&kp.public);
        assert_eq!(addr.len(), 64);
        assert!(validate_address(&addr));
    }

    #[test]
    fn derive_is_deterministic() {
        let kp = keypair_from_seed(&[7u8; 32]);
        assert_eq!(derive_address(&kp.public), derive_address(&kp.public));
    }

    #[test]
    fn decode_roundtrip() {
        let kp = generate_keypair();
        let addr = derive_address(&kp.public);
        assert_eq!(decode_address(&addr), Some(kp.public));
    }

    #[test]
    fn malformed_addresses_rejected() {
        assert!(!validate_address(""));
        assert!(!validate_address("tooshort"));
        assert!(!validate_address(&"g".repeat(64)));
        assert!(!validate_address(&"ab".repeat(33)));
    }

    #[test]
    fn different_keys_different_addresses() {
        let k1 = generate_keypair();
        let k2 = generate_keypair();
        assert_ne!(derive_address(&k1.public), derive_address(&k2.public));
    }
}
