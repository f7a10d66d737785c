//! Submission pipeline: proposed entry in, canonical record out
//!
//! [`process`] runs the full intake path for one proposed entry: resolve
//! the kind against the registry, unmarshal, validate through
//! canonicalization, and derive index keys. Any panic escaping an entry
//! implementation is caught and surfaced as an internal error instead of
//! taking the calling thread down.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tlog_types::ProposedEntry;
use tracing::debug;

use crate::error::{EntryError, Result};
use crate::registry::Registry;

/// The durable output of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalizedEntry {
    /// Entry kind of the implementation that produced the body
    pub kind: String,
    /// Schema version the body conforms to
    pub api_version: String,
    /// Canonical JSON bytes, safe to hash and persist
    pub body: Vec<u8>,
    /// Derived lookup keys for the search index
    pub index_keys: Vec<String>,
}

/// Validate and canonicalize a proposed entry
pub fn process(registry: &Registry, proposed: &ProposedEntry) -> Result<CanonicalizedEntry> {
    let result = catch_unwind(AssertUnwindSafe(|| process_inner(registry, proposed)));
    match result {
        Ok(outcome) => outcome,
        Err(panic) => {
            let cause = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(EntryError::Internal(format!(
                "entry implementation for kind {} panicked: {}",
                proposed.kind, cause
            )))
        }
    }
}

fn process_inner(registry: &Registry, proposed: &ProposedEntry) -> Result<CanonicalizedEntry> {
    let entry = registry.unmarshal_entry(proposed)?;
    debug!(
        kind = %proposed.kind,
        api_version = entry.api_version(),
        "unmarshalled proposed entry"
    );

    let body = entry.canonicalize()?;
    let index_keys = entry.index_keys()?;
    debug!(
        kind = %proposed.kind,
        body_len = body.len(),
        index_keys = index_keys.len(),
        "canonicalized entry"
    );

    Ok(CanonicalizedEntry {
        kind: proposed.kind.clone(),
        api_version: entry.api_version().to_string(),
        body,
        index_keys,
    })
}
