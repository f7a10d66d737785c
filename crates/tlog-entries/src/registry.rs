//! Registry of entry kinds and schema versions
//!
//! The registry maps (kind, version) to a factory for the implementing
//! type. It is built once at startup and read-only afterwards; shared
//! references are safe across any number of threads.

use std::collections::HashMap;

use tlog_types::ProposedEntry;

use crate::error::{EntryError, Result};
use crate::types::EntryImpl;

/// Factory producing a fresh, zero-valued entry implementation
pub type EntryFactory = fn() -> Box<dyn EntryImpl>;

struct KindVersions {
    versions: HashMap<String, EntryFactory>,
    latest: String,
}

/// Mapping from (kind, schema version) to entry implementations
///
/// Explicitly constructed and passed by reference rather than held as a
/// process global, so the core stays testable in isolation.
#[derive(Default)]
pub struct Registry {
    kinds: HashMap<String, KindVersions>,
}

impl Registry {
    /// An empty registry
    pub fn new() -> Self {
        Registry {
            kinds: HashMap::new(),
        }
    }

    /// A registry with all built-in kinds registered
    pub fn with_defaults() -> Self {
        let mut registry = Registry::new();
        registry.register_kind(
            crate::hashedrekord::KIND,
            crate::hashedrekord::API_VERSION,
            crate::hashedrekord::new_entry,
        );
        registry
    }

    /// Register a kind/version pair
    ///
    /// Multiple versions of the same kind coexist; the numerically greatest
    /// registered version becomes the default when a client omits one.
    pub fn register_kind(&mut self, kind: &str, version: &str, factory: EntryFactory) {
        let entry = self
            .kinds
            .entry(kind.to_string())
            .or_insert_with(|| KindVersions {
                versions: HashMap::new(),
                latest: version.to_string(),
            });
        entry.versions.insert(version.to_string(), factory);
        if version_key(version) > version_key(&entry.latest) {
            entry.latest = version.to_string();
        }
    }

    /// Resolve a kind and optional version to a fresh implementation
    ///
    /// An omitted version resolves to the kind's latest registered version.
    pub fn new_entry_impl(&self, kind: &str, version: Option<&str>) -> Result<Box<dyn EntryImpl>> {
        let versions = self.kinds.get(kind).ok_or_else(|| EntryError::UnsupportedKind {
            kind: kind.to_string(),
            version: version.unwrap_or("latest").to_string(),
            supported: self.supported_list(),
        })?;
        let resolved = version.unwrap_or(&versions.latest);
        let factory =
            versions
                .versions
                .get(resolved)
                .ok_or_else(|| EntryError::UnsupportedKind {
                    kind: kind.to_string(),
                    version: resolved.to_string(),
                    supported: self.supported_list(),
                })?;
        Ok(factory())
    }

    /// Resolve and unmarshal a proposed entry in one step
    pub fn unmarshal_entry(&self, proposed: &ProposedEntry) -> Result<Box<dyn EntryImpl>> {
        let mut entry = self.new_entry_impl(&proposed.kind, proposed.api_version.as_deref())?;
        entry.unmarshal(proposed)?;
        Ok(entry)
    }

    /// All registered (kind, version) pairs, sorted
    pub fn supported(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .kinds
            .iter()
            .flat_map(|(kind, kv)| {
                kv.versions
                    .keys()
                    .map(move |version| (kind.clone(), version.clone()))
            })
            .collect();
        pairs.sort();
        pairs
    }

    fn supported_list(&self) -> String {
        let pairs = self.supported();
        if pairs.is_empty() {
            return "none".to_string();
        }
        pairs
            .iter()
            .map(|(kind, version)| format!("{} {}", kind, version))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Dot-separated numeric version ordering; non-numeric segments sort as zero
fn version_key(version: &str) -> Vec<u64> {
    version
        .split('.')
        .map(|segment| segment.parse().unwrap_or(0))
        .collect()
}
