//! hashedrekord: a signature over a named digest of an artifact
//!
//! The reference entry kind. The artifact's bytes are never submitted, only
//! an algorithm-tagged digest, so large artifacts never transit or land in
//! the log. Validation checks structural completeness, decodes the key
//! material, enforces the digest length against its declared algorithm, and
//! verifies the signature over the digest bytes.
//!
//! This kind deliberately supports a narrower key algorithm set than the
//! key model itself: Ed25519 keys decode fine one layer down but are
//! rejected here, because the schema only covers hash-then-sign algorithms
//! that can verify a pre-computed digest.

use serde::{Deserialize, Serialize};
use tlog_crypto::{verify_prehashed, KeyAlgorithm, KeyMaterial};
use tlog_types::{ArtifactReference, Digest, HashAlgorithm, PemBytes, ProposedEntry, SignatureBytes};

use crate::error::{EntryError, Result};
use crate::types::{EntryImpl, SignatureMaterial};

/// Entry kind name on the wire
pub const KIND: &str = "hashedrekord";

/// Schema version implemented by [`V001Entry`]
pub const API_VERSION: &str = "0.0.1";

/// Key algorithms this schema version accepts
const SUPPORTED_KEY_ALGORITHMS: [KeyAlgorithm; 3] = [
    KeyAlgorithm::EcdsaP256,
    KeyAlgorithm::EcdsaP384,
    KeyAlgorithm::Rsa,
];

/// Factory registered for (hashedrekord, 0.0.1)
pub fn new_entry() -> Box<dyn EntryImpl> {
    Box::<V001Entry>::default()
}

/// hashedrekord v0.0.1 spec as submitted
///
/// All fields are optional at the wire level; absence is reported by
/// `validate` with a cause naming the missing field, not by deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HashedRekordSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<SpecSignature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<SpecData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecSignature {
    /// Raw signature, base64 on the wire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<SignatureBytes>,
    /// The key material the signature verifies under
    #[serde(rename = "publicKey", skip_serializing_if = "Option::is_none")]
    pub public_key: Option<SpecPublicKey>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecPublicKey {
    /// PEM public key or certificate, base64 on the wire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<PemBytes>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<SpecHash>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecHash {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<HashAlgorithm>,
    /// Hex-encoded digest value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Canonical wire shape: every field present, hex lowercased, JCS ordering
#[derive(Serialize)]
struct CanonicalEntry<'a> {
    #[serde(rename = "apiVersion")]
    api_version: &'a str,
    kind: &'a str,
    spec: CanonicalSpec,
}

#[derive(Serialize)]
struct CanonicalSpec {
    data: CanonicalData,
    signature: CanonicalSignature,
}

#[derive(Serialize)]
struct CanonicalData {
    hash: CanonicalHash,
}

#[derive(Serialize)]
struct CanonicalHash {
    algorithm: HashAlgorithm,
    value: String,
}

#[derive(Serialize)]
struct CanonicalSignature {
    content: SignatureBytes,
    #[serde(rename = "publicKey")]
    public_key: CanonicalPublicKey,
}

#[derive(Serialize)]
struct CanonicalPublicKey {
    content: PemBytes,
}

/// hashedrekord v0.0.1 implementation
#[derive(Debug, Clone, Default)]
pub struct V001Entry {
    spec: Option<HashedRekordSpec>,
}

impl V001Entry {
    /// Wrap an already-decoded spec (used by tests and by callers that build
    /// entries programmatically)
    pub fn from_spec(spec: HashedRekordSpec) -> Self {
        V001Entry { spec: Some(spec) }
    }
}

impl EntryImpl for V001Entry {
    fn api_version(&self) -> &'static str {
        API_VERSION
    }

    fn unmarshal(&mut self, proposed: &ProposedEntry) -> Result<()> {
        if proposed.kind != KIND {
            return Err(EntryError::UnsupportedKind {
                kind: proposed.kind.clone(),
                version: proposed
                    .api_version
                    .clone()
                    .unwrap_or_else(|| "latest".to_string()),
                supported: format!("{} {}", KIND, API_VERSION),
            });
        }
        if let Some(version) = &proposed.api_version {
            if version != API_VERSION {
                return Err(EntryError::UnsupportedKind {
                    kind: proposed.kind.clone(),
                    version: version.clone(),
                    supported: format!("{} {}", KIND, API_VERSION),
                });
            }
        }
        let spec: HashedRekordSpec =
            serde_json::from_value(proposed.spec.clone()).map_err(EntryError::Unmarshal)?;
        self.spec = Some(spec);
        Ok(())
    }

    fn validate(&self) -> Result<(ArtifactReference, SignatureMaterial)> {
        let spec = self
            .spec
            .as_ref()
            .ok_or_else(|| EntryError::validation("missing spec"))?;

        let signature = spec
            .signature
            .as_ref()
            .ok_or_else(|| EntryError::validation("missing signature"))?;
        let content = signature
            .content
            .as_ref()
            .filter(|content| !content.is_empty())
            .ok_or_else(|| EntryError::validation("missing signature content"))?;
        let public_key = signature
            .public_key
            .as_ref()
            .ok_or_else(|| EntryError::validation("missing public key"))?;
        let key_bytes = public_key
            .content
            .as_ref()
            .filter(|bytes| !bytes.is_empty())
            .ok_or_else(|| EntryError::validation("missing public key content"))?;

        let key = KeyMaterial::from_pem_bytes(key_bytes.as_bytes())
            .map_err(|e| EntryError::validation(format!("invalid public key: {}", e)))?;
        if !SUPPORTED_KEY_ALGORITHMS.contains(&key.algorithm()) {
            return Err(EntryError::validation(format!(
                "unsupported public key algorithm for {}: {}",
                KIND,
                key.algorithm()
            )));
        }

        let data = spec
            .data
            .as_ref()
            .ok_or_else(|| EntryError::validation("missing data"))?;
        let hash = data
            .hash
            .as_ref()
            .ok_or_else(|| EntryError::validation("missing data hash"))?;
        let algorithm = hash
            .algorithm
            .ok_or_else(|| EntryError::validation("missing hash algorithm"))?;
        let value = hash
            .value
            .as_ref()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| EntryError::validation("missing hash value"))?;

        let digest = Digest {
            algorithm,
            value: value.clone(),
        };
        let digest_bytes = digest
            .decode()
            .map_err(|e| EntryError::validation(e.to_string()))?;

        verify_prehashed(key.public_key(), algorithm, &digest_bytes, content.as_bytes())
            .map_err(|e| EntryError::validation(format!("signature verification failed: {}", e)))?;

        Ok((
            ArtifactReference::Digest(digest),
            SignatureMaterial {
                content: content.as_bytes().to_vec(),
                key,
            },
        ))
    }

    fn canonicalize(&self) -> Result<Vec<u8>> {
        // Always re-validate; canonical bytes must not exist for an entry
        // that no longer verifies.
        let (artifact, signature) = self.validate()?;
        let digest = match artifact {
            ArtifactReference::Digest(digest) => digest,
            _ => {
                return Err(EntryError::Internal(
                    "hashedrekord validate returned a non-digest artifact".to_string(),
                ))
            }
        };

        let canonical = CanonicalEntry {
            api_version: API_VERSION,
            kind: KIND,
            spec: CanonicalSpec {
                data: CanonicalData {
                    hash: CanonicalHash {
                        algorithm: digest.algorithm,
                        value: digest.hex_lower(),
                    },
                },
                signature: CanonicalSignature {
                    content: SignatureBytes::new(signature.content),
                    public_key: CanonicalPublicKey {
                        content: PemBytes::new(signature.key.raw().to_vec()),
                    },
                },
            },
        };

        serde_jcs::to_vec(&canonical).map_err(|e| EntryError::Internal(e.to_string()))
    }

    fn index_keys(&self) -> Result<Vec<String>> {
        let spec = self
            .spec
            .as_ref()
            .ok_or_else(|| EntryError::validation("missing spec"))?;

        let hash = spec
            .data
            .as_ref()
            .and_then(|data| data.hash.as_ref())
            .ok_or_else(|| EntryError::validation("missing data hash"))?;
        let algorithm = hash
            .algorithm
            .ok_or_else(|| EntryError::validation("missing hash algorithm"))?;
        let value = hash
            .value
            .as_ref()
            .ok_or_else(|| EntryError::validation("missing hash value"))?;

        let key_bytes = spec
            .signature
            .as_ref()
            .and_then(|signature| signature.public_key.as_ref())
            .and_then(|public_key| public_key.content.as_ref())
            .ok_or_else(|| EntryError::validation("missing public key content"))?;

        // The key fingerprint covers the raw submitted bytes, certificate
        // metadata included, so lookups match exactly what was logged.
        Ok(vec![
            format!("{}:{}", algorithm, value.to_ascii_lowercase()),
            hex::encode(tlog_crypto::sha256(key_bytes.as_bytes())),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use p256::ecdsa::signature::hazmat::PrehashSigner;
    use p256::pkcs8::{DecodePrivateKey, EncodePublicKey, LineEnding};
    use rand::rngs::OsRng;
    use sha2::{Digest as _, Sha256};
    use tlog_types::ProposedEntry;

    struct TestMaterial {
        key_pem: Vec<u8>,
        signature_der: Vec<u8>,
        digest_hex: String,
    }

    /// Fresh P-256 key, SHA-256 of `artifact`, signature over that digest
    fn test_material(artifact: &[u8]) -> TestMaterial {
        let signing_key = p256::ecdsa::SigningKey::random(&mut OsRng);
        let key_pem = signing_key
            .verifying_key()
            .to_public_key_pem(LineEnding::LF)
            .unwrap()
            .into_bytes();
        let digest = Sha256::digest(artifact);
        let sig: p256::ecdsa::Signature = signing_key.sign_prehash(&digest).unwrap();
        TestMaterial {
            key_pem,
            signature_der: sig.to_der().as_bytes().to_vec(),
            digest_hex: hex::encode(digest),
        }
    }

    fn spec(
        signature: Option<SpecSignature>,
        data: Option<SpecData>,
    ) -> HashedRekordSpec {
        HashedRekordSpec { signature, data }
    }

    fn full_spec(material: &TestMaterial, digest_hex: &str) -> HashedRekordSpec {
        spec(
            Some(SpecSignature {
                content: Some(SignatureBytes::new(material.signature_der.clone())),
                public_key: Some(SpecPublicKey {
                    content: Some(PemBytes::new(material.key_pem.clone())),
                }),
            }),
            Some(SpecData {
                hash: Some(SpecHash {
                    algorithm: Some(HashAlgorithm::Sha256),
                    value: Some(digest_hex.to_string()),
                }),
            }),
        )
    }

    /// Runs an entry through the same gauntlet as a submitted one: direct
    /// validate, then proposed-entry round trip, then canonicalize.
    fn check_case(spec: HashedRekordSpec, expect_valid: bool, case: &str) {
        let entry = V001Entry::from_spec(spec.clone());
        assert_eq!(entry.validate().is_ok(), expect_valid, "validate: {}", case);

        let proposed = ProposedEntry::new(KIND, API_VERSION, serde_json::to_value(&spec).unwrap());
        let mut fresh = V001Entry::default();
        fresh.unmarshal(&proposed).unwrap();
        assert_eq!(
            fresh.validate().is_ok(),
            expect_valid,
            "unmarshal+validate: {}",
            case
        );

        let canonical = fresh.canonicalize();
        assert_eq!(canonical.is_ok(), expect_valid, "canonicalize: {}", case);
        if !expect_valid {
            assert!(
                matches!(canonical.unwrap_err(), EntryError::Validation(_)),
                "canonicalize error kind: {}",
                case
            );
        }
    }

    #[test]
    fn test_empty_entry_fails() {
        check_case(spec(None, None), false, "empty spec");
    }

    #[test]
    fn test_signature_without_content() {
        check_case(
            spec(Some(SpecSignature::default()), None),
            false,
            "signature without content",
        );
    }

    #[test]
    fn test_signature_without_public_key() {
        let material = test_material(b"sign me!");
        check_case(
            spec(
                Some(SpecSignature {
                    content: Some(SignatureBytes::new(material.signature_der.clone())),
                    public_key: None,
                }),
                None,
            ),
            false,
            "signature without public key",
        );
    }

    #[test]
    fn test_signature_with_empty_public_key() {
        let material = test_material(b"sign me!");
        check_case(
            spec(
                Some(SpecSignature {
                    content: Some(SignatureBytes::new(material.signature_der.clone())),
                    public_key: Some(SpecPublicKey { content: None }),
                }),
                None,
            ),
            false,
            "signature with empty public key",
        );
    }

    #[test]
    fn test_signature_without_data() {
        let material = test_material(b"sign me!");
        check_case(
            spec(
                Some(SpecSignature {
                    content: Some(SignatureBytes::new(material.signature_der.clone())),
                    public_key: Some(SpecPublicKey {
                        content: Some(PemBytes::new(material.key_pem.clone())),
                    }),
                }),
                None,
            ),
            false,
            "signature without data",
        );
    }

    #[test]
    fn test_signature_with_empty_data() {
        let material = test_material(b"sign me!");
        let mut full = full_spec(&material, &material.digest_hex);
        full.data = Some(SpecData { hash: None });
        check_case(full, false, "signature with empty data");
    }

    #[test]
    fn test_valid_entry_succeeds() {
        let material = test_material(b"sign me!");
        let digest_hex = material.digest_hex.clone();
        check_case(full_spec(&material, &digest_hex), true, "valid entry");
    }

    #[test]
    fn test_invalid_sha_length() {
        // SHA-224-length hex under a sha256 label
        let material = test_material(b"sign me!");
        let truncated = material.digest_hex[..56].to_string();
        check_case(
            full_spec(&material, &truncated),
            false,
            "invalid sha length",
        );
    }

    #[test]
    fn test_digest_of_different_artifact_fails() {
        let material = test_material(b"sign me!");
        let other = hex::encode(Sha256::digest(b"sign me NOT!"));
        check_case(full_spec(&material, &other), false, "mismatched digest");
    }

    #[test]
    fn test_ed25519_key_rejected() {
        let signing_key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let ed_pem = signing_key
            .verifying_key()
            .to_public_key_pem(LineEnding::LF)
            .unwrap()
            .into_bytes();

        let material = test_material(b"sign me!");
        let mut full = full_spec(&material, &material.digest_hex);
        full.signature.as_mut().unwrap().public_key = Some(SpecPublicKey {
            content: Some(PemBytes::new(ed_pem)),
        });

        let entry = V001Entry::from_spec(full);
        let err = entry.validate().unwrap_err();
        match err {
            EntryError::Validation(cause) => {
                assert!(cause.contains("unsupported"), "cause: {}", cause)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unmarshal_rejects_malformed_spec_shape() {
        let proposed = ProposedEntry::new(
            KIND,
            API_VERSION,
            serde_json::json!({"signature": "not an object"}),
        );
        let mut entry = V001Entry::default();
        assert!(matches!(
            entry.unmarshal(&proposed).unwrap_err(),
            EntryError::Unmarshal(_)
        ));
    }

    #[test]
    fn test_unmarshal_rejects_other_kind_and_version() {
        let mut entry = V001Entry::default();
        let wrong_kind = ProposedEntry::new("rekord", API_VERSION, serde_json::json!({}));
        assert!(matches!(
            entry.unmarshal(&wrong_kind).unwrap_err(),
            EntryError::UnsupportedKind { .. }
        ));
        let wrong_version = ProposedEntry::new(KIND, "0.0.2", serde_json::json!({}));
        assert!(matches!(
            entry.unmarshal(&wrong_version).unwrap_err(),
            EntryError::UnsupportedKind { .. }
        ));
    }

    #[test]
    fn test_canonicalize_round_trip_is_idempotent() {
        let material = test_material(b"sign me!");
        let entry = V001Entry::from_spec(full_spec(&material, &material.digest_hex));
        let first = entry.canonicalize().unwrap();

        // Re-unmarshal the canonical bytes and canonicalize again
        let proposed = ProposedEntry::from_json(&first).unwrap();
        let mut reparsed = V001Entry::default();
        reparsed.unmarshal(&proposed).unwrap();
        reparsed.validate().unwrap();
        let second = reparsed.canonicalize().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_canonicalize_normalizes_hex_case() {
        let material = test_material(b"sign me!");
        let upper = material.digest_hex.to_ascii_uppercase();
        let lower_entry = V001Entry::from_spec(full_spec(&material, &material.digest_hex));
        let upper_entry = V001Entry::from_spec(full_spec(&material, &upper));
        assert_eq!(
            lower_entry.canonicalize().unwrap(),
            upper_entry.canonicalize().unwrap()
        );
    }

    #[test]
    fn test_index_keys_with_public_key() {
        let material = test_material(b"my random data");
        let entry = V001Entry::from_spec(full_spec(&material, &material.digest_hex));
        let keys = entry.index_keys().unwrap();

        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&format!("sha256:{}", material.digest_hex)));
        assert!(keys.contains(&hex::encode(tlog_crypto::sha256(&material.key_pem))));
    }

    #[test]
    fn test_index_keys_with_certificate() {
        // Index keys do not verify; the certificate need not match the
        // signature, only be present.
        let certified = rcgen::generate_simple_self_signed(["example.test".to_string()]).unwrap();
        let cert_pem = certified.cert.pem().into_bytes();

        let material = test_material(b"my random data");
        let mut full = full_spec(&material, &material.digest_hex);
        full.signature.as_mut().unwrap().public_key = Some(SpecPublicKey {
            content: Some(PemBytes::new(cert_pem.clone())),
        });

        let entry = V001Entry::from_spec(full);
        let keys = entry.index_keys().unwrap();
        assert!(keys.contains(&format!("sha256:{}", material.digest_hex)));
        assert!(keys.contains(&hex::encode(tlog_crypto::sha256(&cert_pem))));
    }

    #[test]
    fn test_validate_succeeds_with_matching_certificate() {
        // Certificate whose key actually signed the digest
        let certified = rcgen::generate_simple_self_signed(["example.test".to_string()]).unwrap();
        let signing_key =
            p256::ecdsa::SigningKey::from_pkcs8_der(&certified.key_pair.serialize_der()).unwrap();

        let digest = Sha256::digest(b"sign me!");
        let sig: p256::ecdsa::Signature = signing_key.sign_prehash(&digest).unwrap();

        let full = spec(
            Some(SpecSignature {
                content: Some(SignatureBytes::new(sig.to_der().as_bytes().to_vec())),
                public_key: Some(SpecPublicKey {
                    content: Some(PemBytes::new(certified.cert.pem().into_bytes())),
                }),
            }),
            Some(SpecData {
                hash: Some(SpecHash {
                    algorithm: Some(HashAlgorithm::Sha256),
                    value: Some(hex::encode(digest)),
                }),
            }),
        );

        let entry = V001Entry::from_spec(full);
        let (artifact, signature) = entry.validate().unwrap();
        assert!(artifact.digest().is_some());
        assert!(signature.key.is_certificate());
    }
}
