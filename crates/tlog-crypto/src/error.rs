//! Error types for `tlog-crypto`

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors from key decoding and signature verification
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The submitted bytes are not a single well-formed PEM block
    #[error("invalid PEM: {0}")]
    InvalidPem(String),

    /// The PEM block tag is not one this core understands
    #[error("unsupported PEM block type: {0}")]
    UnsupportedPemTag(String),

    /// DER-level decode failure (SPKI, certificate, signature structure)
    #[error("invalid DER: {0}")]
    Der(#[from] x509_cert::der::Error),

    /// The key decoded but is not usable as a verification key
    #[error("invalid public key: {0}")]
    InvalidKey(String),

    /// The key's algorithm is outside the supported set
    #[error("unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The signature bytes are not a valid encoding for the key's algorithm
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// The digest length does not match the hash algorithm
    #[error("digest length {actual} does not match {algorithm} ({expected} bytes)")]
    DigestLength {
        algorithm: tlog_types::HashAlgorithm,
        expected: usize,
        actual: usize,
    },

    /// The algorithm cannot verify over a pre-computed digest
    #[error("{0} does not support verification over a pre-hashed digest")]
    PrehashUnsupported(&'static str),

    /// The signature does not verify over the given input with the given key
    #[error("signature verification failed")]
    VerificationFailed,
}
