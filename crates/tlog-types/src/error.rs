//! Error types for `tlog-types`

use thiserror::Error;

use crate::hash::HashAlgorithm;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while decoding or validating core types
#[derive(Debug, Error)]
pub enum Error {
    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A digest value that is not valid hex
    #[error("invalid hex in digest value: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// A digest whose hex length does not match its declared algorithm
    #[error("invalid {algorithm} digest length: got {actual} hex characters, want {expected}")]
    DigestLength {
        algorithm: HashAlgorithm,
        expected: usize,
        actual: usize,
    },

    /// An unrecognized hash algorithm name
    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),

    /// A required field was absent
    #[error("missing field: {0}")]
    MissingField(&'static str),
}
