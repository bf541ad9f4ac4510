//! Cryptographic primitives for the aureus wallet core.
//!
//! - **Ed25519** for transfer signing and signature verification
//! - Address derivation: the hex-encoded public key *is* the address
//!
//! There is deliberately no hashing step anywhere in this flow: signatures
//! are computed over the raw canonical message bytes, and addresses carry no
//! checksum.

pub mod address;
pub mod keys;
pub mod sign;

pub use address::{decode_address, derive_address, validate_address};
pub use keys::{generate_keypair, keypair_from_seed, public_from_private};
pub use sign::{
    sign_message, verify_signature, verify_signature_detailed, verify_signature_hex, VerifyError,
};
