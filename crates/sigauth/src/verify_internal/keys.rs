//! Public key parsing.
//!
//! Contract target:
//! - PEM / DER decoding and key-type dispatch only
//! - no algorithm or encoding decisions

use pkcs8::DecodePublicKey;
use rsa::pkcs1::DecodeRsaPublicKey;
use spki::der::Document;
use spki::{ObjectIdentifier, SubjectPublicKeyInfoRef};

use crate::error::{VerifyError, VerifyResult};

/// rsaEncryption (RFC 8017)
const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
/// id-ecPublicKey (RFC 5480)
const EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
/// id-Ed25519 (RFC 8410)
const ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

const PEM_SPKI_LABEL: &str = "PUBLIC KEY";
const PEM_PKCS1_LABEL: &str = "RSA PUBLIC KEY";

/// A parsed verification key.
#[derive(Debug, Clone)]
pub(crate) enum PublicKey {
    Rsa(rsa::RsaPublicKey),
    EcdsaP256(p256::ecdsa::VerifyingKey),
    Ed25519(ed25519_dalek::VerifyingKey),
}

impl PublicKey {
    pub(crate) fn key_type(&self) -> &'static str {
        match self {
            Self::Rsa(_) => "RSA",
            Self::EcdsaP256(_) => "ECDSA P-256",
            Self::Ed25519(_) => "Ed25519",
        }
    }
}

/// Parse key material as handed over by configuration.
///
/// Accepts PEM (`PUBLIC KEY` or `RSA PUBLIC KEY`) or raw SPKI DER.
pub(crate) fn parse_public_key(bytes: &[u8]) -> VerifyResult<PublicKey> {
    match pem_text(bytes) {
        Some(text) => {
            let (label, document) = Document::from_pem(text)
                .map_err(|e| VerifyError::InvalidKey(format!("invalid PEM: {}", e)))?;

            match label {
                PEM_SPKI_LABEL => parse_spki(document.as_bytes()),
                PEM_PKCS1_LABEL => rsa::RsaPublicKey::from_pkcs1_der(document.as_bytes())
                    .map(PublicKey::Rsa)
                    .map_err(|e| VerifyError::InvalidKey(format!("invalid PKCS#1 key: {}", e))),
                other => Err(VerifyError::InvalidKey(format!(
                    "unsupported PEM label: {}",
                    other
                ))),
            }
        }
        None => parse_spki(bytes),
    }
}

fn pem_text(bytes: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(bytes).ok()?.trim();
    text.starts_with("-----BEGIN ").then_some(text)
}

fn parse_spki(der: &[u8]) -> VerifyResult<PublicKey> {
    let spki = SubjectPublicKeyInfoRef::try_from(der)
        .map_err(|e| VerifyError::InvalidKey(format!("invalid SubjectPublicKeyInfo: {}", e)))?;
    let oid = spki.algorithm.oid;

    if oid == RSA_ENCRYPTION {
        rsa::RsaPublicKey::from_public_key_der(der)
            .map(PublicKey::Rsa)
            .map_err(|e| VerifyError::InvalidKey(format!("invalid RSA key: {}", e)))
    } else if oid == EC_PUBLIC_KEY {
        p256::ecdsa::VerifyingKey::from_public_key_der(der)
            .map(PublicKey::EcdsaP256)
            .map_err(|e| VerifyError::InvalidKey(format!("unsupported EC key: {}", e)))
    } else if oid == ED25519 {
        ed25519_dalek::VerifyingKey::from_public_key_der(der)
            .map(PublicKey::Ed25519)
            .map_err(|e| VerifyError::InvalidKey(format!("invalid Ed25519 key: {}", e)))
    } else {
        Err(VerifyError::InvalidKey(format!(
            "unsupported key algorithm: {}",
            oid
        )))
    }
}
