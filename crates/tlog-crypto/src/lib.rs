//! Key material and signature verification
//!
//! This crate holds the cryptographic half of the entry verification core:
//! decoding PEM-encoded public keys and X.509 certificates into verification
//! keys, deriving submission-stable fingerprints, and verifying signatures
//! over digests or messages across the supported algorithm families.
//!
//! Verification fails closed: malformed encodings, unsupported algorithms,
//! and length mismatches are all errors, never an inconclusive pass.

pub mod error;
pub mod key;
pub mod verify;

pub use error::{CryptoError, Result};
pub use key::{KeyAlgorithm, KeyMaterial, PublicKey};
pub use verify::{verify_message, verify_prehashed};

use sha2::{Digest as _, Sha256};

/// SHA-256 of a byte slice
pub fn sha256(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}
