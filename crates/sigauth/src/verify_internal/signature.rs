//! Signature check for one tenant.
//!
//! Contract target:
//! - one verification attempt: decode, dispatch on key type, verify
//! - errors are returned, never swallowed here; containment is the caller's job

use ed25519_dalek::Verifier;
use p256::ecdsa::signature::hazmat::PrehashVerifier;
use rsa::traits::PublicKeyParts;

use crate::error::{VerifyError, VerifyResult};
use crate::types::Tenant;

use super::algorithm::SignatureAlgorithm;
use super::encoding::SignatureEncoding;
use super::keys::PublicKey;

pub(crate) fn verify_tenant_impl(tenant: &Tenant, candidate: &str) -> VerifyResult<bool> {
    let algorithm = SignatureAlgorithm::parse(tenant.algorithm())?;
    let key = tenant.public_key().map_err(Clone::clone)?;
    let encoding = SignatureEncoding::parse(tenant.encoding())?;
    let signature = encoding.decode(candidate)?;

    verify_bytes_impl(key, algorithm, tenant.challenge().as_bytes(), &signature)
}

pub(crate) fn verify_bytes_impl(
    key: &PublicKey,
    algorithm: SignatureAlgorithm,
    message: &[u8],
    signature: &[u8],
) -> VerifyResult<bool> {
    match (key, algorithm) {
        (PublicKey::Rsa(key), SignatureAlgorithm::Digest(digest)) => {
            if signature.len() != key.size() {
                return Err(VerifyError::InvalidSignature(format!(
                    "expected {} bytes for RSA-{}, got {}",
                    key.size(),
                    key.size() * 8,
                    signature.len()
                )));
            }
            let hashed = digest.digest(message);
            Ok(key.verify(digest.pkcs1v15(), &hashed, signature).is_ok())
        }
        (PublicKey::EcdsaP256(key), SignatureAlgorithm::Digest(digest)) => {
            let signature = p256::ecdsa::Signature::from_der(signature)
                .map_err(|e| VerifyError::InvalidSignature(format!("invalid DER: {}", e)))?;
            let prehash = digest.digest(message);
            Ok(key.verify_prehash(&prehash, &signature).is_ok())
        }
        (PublicKey::Ed25519(key), SignatureAlgorithm::Ed25519) => {
            let signature = ed25519_dalek::Signature::from_slice(signature)
                .map_err(|e| VerifyError::InvalidSignature(e.to_string()))?;
            Ok(key.verify(message, &signature).is_ok())
        }
        (key, algorithm) => Err(VerifyError::KeyAlgorithmMismatch {
            algorithm: algorithm.name().to_string(),
            key_type: key.key_type(),
        }),
    }
}
