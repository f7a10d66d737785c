//! Stateless signature verification
//!
//! Dispatches on the key's algorithm family to the correct primitive. ECDSA
//! signatures must be ASN.1 DER; RSA uses PKCS#1 v1.5 with the DigestInfo
//! for the named hash; Ed25519 verifies whole messages only and refuses
//! pre-hashed input rather than silently skipping it.

use p256::ecdsa::signature::hazmat::PrehashVerifier;
use rsa::pkcs1v15::Pkcs1v15Sign;
use sha2::{Digest as _, Sha256, Sha384, Sha512};
use tlog_types::HashAlgorithm;

use crate::error::{CryptoError, Result};
use crate::key::PublicKey;

/// Verify a signature over a pre-computed digest
///
/// The digest length must match `algorithm`; any mismatch, malformed
/// signature encoding, or failed primitive is an error.
pub fn verify_prehashed(
    key: &PublicKey,
    algorithm: HashAlgorithm,
    digest: &[u8],
    signature: &[u8],
) -> Result<()> {
    if digest.len() != algorithm.digest_len() {
        return Err(CryptoError::DigestLength {
            algorithm,
            expected: algorithm.digest_len(),
            actual: digest.len(),
        });
    }

    match key {
        PublicKey::EcdsaP256(vk) => {
            let sig = p256::ecdsa::Signature::from_der(signature)
                .map_err(|e| CryptoError::MalformedSignature(e.to_string()))?;
            vk.verify_prehash(digest, &sig)
                .map_err(|_| CryptoError::VerificationFailed)
        }
        PublicKey::EcdsaP384(vk) => {
            let sig = p384::ecdsa::Signature::from_der(signature)
                .map_err(|e| CryptoError::MalformedSignature(e.to_string()))?;
            vk.verify_prehash(digest, &sig)
                .map_err(|_| CryptoError::VerificationFailed)
        }
        PublicKey::Rsa(pk) => {
            let scheme = match algorithm {
                HashAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
                HashAlgorithm::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
                HashAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
            };
            pk.verify(scheme, digest, signature)
                .map_err(|_| CryptoError::VerificationFailed)
        }
        PublicKey::Ed25519(_) => Err(CryptoError::PrehashUnsupported("ed25519")),
    }
}

/// Verify a signature over a full message
///
/// ECDSA and RSA hash the message with `algorithm` first; Ed25519 verifies
/// the message directly (strict mode) and ignores `algorithm`.
pub fn verify_message(
    key: &PublicKey,
    algorithm: HashAlgorithm,
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    match key {
        PublicKey::Ed25519(vk) => {
            let sig = ed25519_dalek::Signature::from_slice(signature)
                .map_err(|e| CryptoError::MalformedSignature(e.to_string()))?;
            vk.verify_strict(message, &sig)
                .map_err(|_| CryptoError::VerificationFailed)
        }
        _ => {
            let digest = hash_message(algorithm, message);
            verify_prehashed(key, algorithm, &digest, signature)
        }
    }
}

fn hash_message(algorithm: HashAlgorithm, message: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha256 => Sha256::digest(message).to_vec(),
        HashAlgorithm::Sha384 => Sha384::digest(message).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(message).to_vec(),
    }
}
