//! Artifact references
//!
//! An entry describes a signed artifact in one of three ways: by an
//! algorithm-tagged digest (the artifact's bytes are never submitted), by
//! inline bytes, or by a URL some other entry kind may fetch. The contract
//! carries all three uniformly; the hashedrekord kind only ever produces the
//! digest form.

use url::Url;

use crate::hash::Digest;

/// How an entry refers to the artifact its signature covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactReference {
    /// A named digest of the artifact; the bytes themselves are absent
    Digest(Digest),
    /// The artifact bytes, submitted inline
    Inline(Vec<u8>),
    /// A location the artifact can be fetched from
    Remote(Url),
}

impl ArtifactReference {
    /// The digest, when this reference is the hashed form
    pub fn digest(&self) -> Option<&Digest> {
        match self {
            ArtifactReference::Digest(d) => Some(d),
            _ => None,
        }
    }

    /// The inline bytes, when present
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            ArtifactReference::Inline(b) => Some(b),
            _ => None,
        }
    }
}

impl From<Digest> for ArtifactReference {
    fn from(digest: Digest) -> Self {
        ArtifactReference::Digest(digest)
    }
}
