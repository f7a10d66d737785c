//! Error taxonomy for entry processing
//!
//! Every error here describes a terminal condition: client input that cannot
//! be accepted, or an unexpected internal failure. Nothing is retryable, and
//! validation failures are never downgraded to a partial success.

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, EntryError>;

/// Errors produced while processing a proposed entry
#[derive(Debug, Error)]
pub enum EntryError {
    /// The declared kind or schema version has no registered implementation
    #[error("unsupported entry kind {kind} version {version} (supported: {supported})")]
    UnsupportedKind {
        kind: String,
        version: String,
        supported: String,
    },

    /// The spec does not match the declared schema's shape
    #[error("failed to unmarshal entry spec: {0}")]
    Unmarshal(#[source] serde_json::Error),

    /// Structurally well-formed but semantically invalid: missing sub-fields,
    /// bad digest length, unsupported key algorithm, or a signature that does
    /// not verify
    #[error("entry validation failed: {0}")]
    Validation(String),

    /// An unexpected failure in a supporting library
    #[error("internal error: {0}")]
    Internal(String),
}

impl EntryError {
    /// Shorthand for a validation failure with a formatted cause
    pub fn validation(cause: impl Into<String>) -> Self {
        EntryError::Validation(cause.into())
    }
}
