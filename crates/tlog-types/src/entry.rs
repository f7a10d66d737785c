//! The generic proposed-entry envelope
//!
//! A proposed entry is the untrusted, client-submitted record: a kind, an
//! optional schema version, and an opaque spec object. The spec is held as
//! raw JSON here; the registered entry implementation for the declared kind
//! decodes it into strongly-typed fields.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A client-submitted, not-yet-validated transparency log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedEntry {
    /// Schema version of the spec; resolved to the kind's latest when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Entry kind, selecting the implementation that understands the spec
    pub kind: String,
    /// Kind-specific manifest, opaque at this layer
    pub spec: serde_json::Value,
}

impl ProposedEntry {
    /// Build a proposed entry for a kind and version from a spec value
    pub fn new(kind: &str, api_version: &str, spec: serde_json::Value) -> Self {
        ProposedEntry {
            api_version: Some(api_version.to_string()),
            kind: kind.to_string(),
            spec,
        }
    }

    /// Parse a proposed entry from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Serialize back to JSON (not canonical; canonical form comes from the
    /// entry implementation)
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
