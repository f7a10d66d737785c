//! Algorithm-tagged content digests
//!
//! A [`Digest`] pairs a hash algorithm with a hex-encoded value. Decoding
//! enforces that the value's length matches the algorithm exactly; a
//! SHA-224-length string submitted under a `sha256` label is an error, never
//! a silent truncation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Digest length in bytes
    pub fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Expected length of the hex encoding
    pub fn hex_len(&self) -> usize {
        self.digest_len() * 2
    }

    /// Canonical lowercase name, as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// An algorithm-tagged, hex-encoded content digest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Digest {
    /// Digest algorithm
    pub algorithm: HashAlgorithm,
    /// Hex-encoded digest value
    pub value: String,
}

impl Digest {
    /// Build a digest from raw bytes, checking the length against the algorithm
    pub fn from_bytes(algorithm: HashAlgorithm, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != algorithm.digest_len() {
            return Err(Error::DigestLength {
                algorithm,
                expected: algorithm.hex_len(),
                actual: bytes.len() * 2,
            });
        }
        Ok(Digest {
            algorithm,
            value: hex::encode(bytes),
        })
    }

    /// Decode the hex value into raw digest bytes
    ///
    /// Fails if the value is not valid hex or its length does not match the
    /// declared algorithm.
    pub fn decode(&self) -> Result<Vec<u8>> {
        if self.value.len() != self.algorithm.hex_len() {
            return Err(Error::DigestLength {
                algorithm: self.algorithm,
                expected: self.algorithm.hex_len(),
                actual: self.value.len(),
            });
        }
        Ok(hex::decode(&self.value)?)
    }

    /// Hex value normalized to lowercase
    pub fn hex_lower(&self) -> String {
        self.value.to_ascii_lowercase()
    }
}

impl PartialEq for Digest {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm == other.algorithm && self.value.eq_ignore_ascii_case(&other.value)
    }
}

impl Eq for Digest {}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.hex_lower())
    }
}
