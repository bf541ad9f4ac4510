//! Fundamental types for the aureus wallet core.
//!
//! This crate defines the key material shared across every other crate in
//! the workspace. Accounts are keyed by username; an account's hex-encoded
//! public key doubles as its external identity.

pub mod keys;

pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
