//! Algorithm identifiers.
//!
//! Contract target:
//! - map configured algorithm names onto digests / signature schemes
//! - no key parsing, no signature decoding

use rsa::Pkcs1v15Sign;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::error::{VerifyError, VerifyResult};

/// Message digest used before signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Hash `message` with this digest.
    pub fn digest(self, message: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha224 => Sha224::digest(message).to_vec(),
            Self::Sha256 => Sha256::digest(message).to_vec(),
            Self::Sha384 => Sha384::digest(message).to_vec(),
            Self::Sha512 => Sha512::digest(message).to_vec(),
        }
    }

    /// RSASSA-PKCS1-v1_5 padding scheme for this digest.
    pub(crate) fn pkcs1v15(self) -> Pkcs1v15Sign {
        match self {
            Self::Sha224 => Pkcs1v15Sign::new::<Sha224>(),
            Self::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
            Self::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
            Self::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
        }
    }
}

/// Algorithm a tenant's signatures are checked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// Hash-then-sign (RSA PKCS#1 v1.5 or ECDSA, chosen by the key).
    Digest(DigestAlgorithm),
    /// Pure Ed25519 over the challenge.
    Ed25519,
}

impl SignatureAlgorithm {
    /// Parse an algorithm name.
    ///
    /// Case-insensitive; accepts OpenSSL-style aliases such as `RSA-SHA256`
    /// and `ecdsa-with-SHA256`.
    pub fn parse(name: &str) -> VerifyResult<Self> {
        let lowered = name.to_ascii_lowercase();
        let bare = lowered
            .strip_prefix("rsa-")
            .or_else(|| lowered.strip_prefix("ecdsa-with-"))
            .unwrap_or(&lowered);

        match bare {
            "sha224" => Ok(Self::Digest(DigestAlgorithm::Sha224)),
            "sha256" => Ok(Self::Digest(DigestAlgorithm::Sha256)),
            "sha384" => Ok(Self::Digest(DigestAlgorithm::Sha384)),
            "sha512" => Ok(Self::Digest(DigestAlgorithm::Sha512)),
            "ed25519" if bare.len() == lowered.len() => Ok(Self::Ed25519),
            _ => Err(VerifyError::UnsupportedAlgorithm(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Digest(digest) => digest.name(),
            Self::Ed25519 => "ed25519",
        }
    }
}
