//! Key material: PEM-encoded public keys and X.509 certificates
//!
//! Submitted key material arrives as a single PEM block. A `PUBLIC KEY`
//! block is decoded as SPKI, an `RSA PUBLIC KEY` block as PKCS#1, and a
//! `CERTIFICATE` block as X.509 with the verification key taken from the
//! subjectPublicKeyInfo. The fingerprint is always computed over the raw,
//! as-submitted bytes, so the same key submitted bare and inside a
//! certificate yields two distinct, submission-stable fingerprints.

use std::fmt;

use const_oid::db::rfc5912::{ID_EC_PUBLIC_KEY, RSA_ENCRYPTION, SECP_256_R_1, SECP_384_R_1};
use const_oid::db::rfc8410::ID_ED_25519;
use const_oid::ObjectIdentifier;
use rsa::pkcs1::DecodeRsaPublicKey;
use x509_cert::der::Decode;
use x509_cert::spki::SubjectPublicKeyInfoOwned;
use x509_cert::Certificate;

use crate::error::{CryptoError, Result};

const PEM_TAG_PUBLIC_KEY: &str = "PUBLIC KEY";
const PEM_TAG_RSA_PUBLIC_KEY: &str = "RSA PUBLIC KEY";
const PEM_TAG_CERTIFICATE: &str = "CERTIFICATE";

/// Supported verification key algorithm families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    EcdsaP256,
    EcdsaP384,
    Rsa,
    Ed25519,
}

impl KeyAlgorithm {
    /// Stable lowercase name for error messages and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAlgorithm::EcdsaP256 => "ecdsa-p256",
            KeyAlgorithm::EcdsaP384 => "ecdsa-p384",
            KeyAlgorithm::Rsa => "rsa",
            KeyAlgorithm::Ed25519 => "ed25519",
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded verification key
#[derive(Debug, Clone)]
pub enum PublicKey {
    EcdsaP256(p256::ecdsa::VerifyingKey),
    EcdsaP384(p384::ecdsa::VerifyingKey),
    Rsa(rsa::RsaPublicKey),
    Ed25519(ed25519_dalek::VerifyingKey),
}

impl PublicKey {
    /// The key's algorithm family
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PublicKey::EcdsaP256(_) => KeyAlgorithm::EcdsaP256,
            PublicKey::EcdsaP384(_) => KeyAlgorithm::EcdsaP384,
            PublicKey::Rsa(_) => KeyAlgorithm::Rsa,
            PublicKey::Ed25519(_) => KeyAlgorithm::Ed25519,
        }
    }

    /// Decode a key from a DER-encoded SubjectPublicKeyInfo
    pub fn from_spki_der(der: &[u8]) -> Result<Self> {
        let spki = SubjectPublicKeyInfoOwned::from_der(der)?;
        Self::from_spki(&spki)
    }

    /// Decode a key from a parsed SubjectPublicKeyInfo, dispatching on the
    /// algorithm OID
    pub fn from_spki(spki: &SubjectPublicKeyInfoOwned) -> Result<Self> {
        let key_bytes = spki
            .subject_public_key
            .as_bytes()
            .ok_or_else(|| CryptoError::InvalidKey("public key has unused bits".to_string()))?;

        match spki.algorithm.oid {
            ID_EC_PUBLIC_KEY => {
                let params = spki.algorithm.parameters.as_ref().ok_or_else(|| {
                    CryptoError::InvalidKey("EC public key missing curve parameters".to_string())
                })?;
                let curve = ObjectIdentifier::from_bytes(params.value()).map_err(|e| {
                    CryptoError::InvalidKey(format!("invalid EC curve parameters: {}", e))
                })?;
                match curve {
                    SECP_256_R_1 => {
                        let key = p256::ecdsa::VerifyingKey::from_sec1_bytes(key_bytes)
                            .map_err(|e| CryptoError::InvalidKey(format!("P-256: {}", e)))?;
                        Ok(PublicKey::EcdsaP256(key))
                    }
                    SECP_384_R_1 => {
                        let key = p384::ecdsa::VerifyingKey::from_sec1_bytes(key_bytes)
                            .map_err(|e| CryptoError::InvalidKey(format!("P-384: {}", e)))?;
                        Ok(PublicKey::EcdsaP384(key))
                    }
                    other => Err(CryptoError::UnsupportedAlgorithm(format!(
                        "EC curve {}",
                        other
                    ))),
                }
            }
            RSA_ENCRYPTION => {
                let key = rsa::RsaPublicKey::from_pkcs1_der(key_bytes)
                    .map_err(|e| CryptoError::InvalidKey(format!("RSA: {}", e)))?;
                Ok(PublicKey::Rsa(key))
            }
            ID_ED_25519 => {
                let raw: &[u8; 32] = key_bytes.try_into().map_err(|_| {
                    CryptoError::InvalidKey(format!(
                        "ed25519 public key must be 32 bytes, got {}",
                        key_bytes.len()
                    ))
                })?;
                let key = ed25519_dalek::VerifyingKey::from_bytes(raw)
                    .map_err(|e| CryptoError::InvalidKey(format!("ed25519: {}", e)))?;
                Ok(PublicKey::Ed25519(key))
            }
            other => Err(CryptoError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Submitted key material: the raw PEM bytes plus the decoded key
#[derive(Debug, Clone)]
pub struct KeyMaterial {
    raw: Vec<u8>,
    key: PublicKey,
    certificate: bool,
}

impl KeyMaterial {
    /// Decode a single PEM block holding a public key or certificate
    pub fn from_pem_bytes(raw: &[u8]) -> Result<Self> {
        let mut blocks =
            pem::parse_many(raw).map_err(|e| CryptoError::InvalidPem(e.to_string()))?;
        let block = match blocks.len() {
            1 => blocks.remove(0),
            n => {
                return Err(CryptoError::InvalidPem(format!(
                    "expected exactly one PEM block, found {}",
                    n
                )))
            }
        };

        let (key, certificate) = match block.tag() {
            PEM_TAG_PUBLIC_KEY => (PublicKey::from_spki_der(block.contents())?, false),
            PEM_TAG_RSA_PUBLIC_KEY => {
                let key = rsa::RsaPublicKey::from_pkcs1_der(block.contents())
                    .map_err(|e| CryptoError::InvalidKey(format!("RSA: {}", e)))?;
                (PublicKey::Rsa(key), false)
            }
            PEM_TAG_CERTIFICATE => {
                let cert = Certificate::from_der(block.contents())?;
                let key = PublicKey::from_spki(&cert.tbs_certificate.subject_public_key_info)?;
                (key, true)
            }
            other => return Err(CryptoError::UnsupportedPemTag(other.to_string())),
        };

        Ok(KeyMaterial {
            raw: raw.to_vec(),
            key,
            certificate,
        })
    }

    /// The decoded verification key
    pub fn public_key(&self) -> &PublicKey {
        &self.key
    }

    /// The key's algorithm family
    pub fn algorithm(&self) -> KeyAlgorithm {
        self.key.algorithm()
    }

    /// Whether the material was submitted as an X.509 certificate
    pub fn is_certificate(&self) -> bool {
        self.certificate
    }

    /// The raw bytes exactly as submitted
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Lowercase hex SHA-256 of the raw submitted bytes
    ///
    /// For certificates this covers the whole certificate, not just the key,
    /// so a bare key and a certificate carrying the same key fingerprint
    /// differently.
    pub fn fingerprint(&self) -> String {
        hex::encode(crate::sha256(&self.raw))
    }
}
