//! Core types for transparency log entries
//!
//! This crate provides the fundamental data structures shared by every layer
//! of the entry verification core: the generic proposed-entry envelope,
//! algorithm-tagged digests, artifact references, and the base64 encoding
//! newtypes used on the wire.
//!
//! No cryptography lives here; see `tlog-crypto` for key material and
//! signature verification.

pub mod artifact;
pub mod encoding;
pub mod entry;
pub mod error;
pub mod hash;

pub use artifact::ArtifactReference;
pub use encoding::{PemBytes, SignatureBytes};
pub use entry::ProposedEntry;
pub use error::{Error, Result};
pub use hash::{Digest, HashAlgorithm};
