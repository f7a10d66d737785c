//! The contract every entry kind implements
//!
//! Entry kinds are independent manifest schemas that share no state, only
//! this capability set. A kind is added by implementing [`EntryImpl`] and
//! registering a factory with the [`Registry`](crate::Registry); the
//! contract itself never changes when kinds are added.

use tlog_crypto::KeyMaterial;
use tlog_types::{ArtifactReference, ProposedEntry};

use crate::error::Result;

/// A signature together with the key material it was made with
#[derive(Debug, Clone)]
pub struct SignatureMaterial {
    /// Raw signature bytes
    pub content: Vec<u8>,
    /// The submitted public key or certificate
    pub key: KeyMaterial,
}

/// The polymorphic contract for a pluggable entry kind
///
/// Implementations are created zero-valued per request by the registry,
/// populated by [`unmarshal`](EntryImpl::unmarshal), and discarded after
/// producing canonical bytes and index keys. They hold no external
/// resources.
pub trait EntryImpl: Send + Sync {
    /// The schema version this instance implements
    fn api_version(&self) -> &'static str;

    /// Decode the proposed entry's opaque spec into typed fields
    ///
    /// Fails with [`EntryError::Unmarshal`](crate::EntryError::Unmarshal) on
    /// a spec whose shape does not match the schema. Cross-field and
    /// cryptographic checks are deferred to `validate`.
    fn unmarshal(&mut self, proposed: &ProposedEntry) -> Result<()>;

    /// Cross-field validation plus cryptographic signature verification
    ///
    /// This is the single authoritative gate: an entry is valid if and only
    /// if this returns `Ok`. On success it yields the artifact reference and
    /// signature material the entry binds together.
    fn validate(&self) -> Result<(ArtifactReference, SignatureMaterial)>;

    /// Serialize the entry into its kind's canonical JSON shape
    ///
    /// Re-runs `validate` internally rather than trusting earlier results,
    /// and fails with the same error `validate` would return. Output is
    /// byte-identical across repeated calls and across a round trip through
    /// `unmarshal`.
    fn canonicalize(&self) -> Result<Vec<u8>>;

    /// Derive the searchable key set for this entry
    ///
    /// One `<algorithm>:<hexdigest>` key for the artifact and one raw-bytes
    /// fingerprint for the signing key or certificate. Fails only if
    /// required fields are absent.
    fn index_keys(&self) -> Result<Vec<String>>;
}

impl core::fmt::Debug for dyn EntryImpl {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EntryImpl")
            .field("api_version", &self.api_version())
            .finish()
    }
}
