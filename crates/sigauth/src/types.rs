//! Tenant and decision types.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use crate::error::VerifyResult;
use crate::verify_internal::keys::{parse_public_key, PublicKey};

/// Inline key material as supplied in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    /// PEM text.
    Text(String),
    /// Raw bytes (PEM or DER).
    Bytes(Vec<u8>),
}

impl KeyInput {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }
}

impl From<String> for KeyInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for KeyInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for KeyInput {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Typed tenant descriptor.
///
/// Mirrors one entry of the `tenants` configuration. Exactly one of `key` and
/// `path` must be set; this is checked when the registry is built.
#[derive(Debug, Clone, PartialEq)]
pub struct TenantConfig {
    /// Challenge that signatures must cover.
    pub secret: String,

    /// Inline key material.
    pub key: Option<KeyInput>,

    /// Key file, read once at build time.
    pub path: Option<PathBuf>,

    /// Signature encoding (`base64`, `hex`, ...).
    pub format: String,

    /// Digest/signature algorithm (`sha256`, `ed25519`, ...).
    pub algorithm: String,

    /// Opaque context handed back on a match.
    pub auth_data: Option<Value>,
}

impl TenantConfig {
    /// Create a descriptor without a key source.
    pub fn new(
        secret: impl Into<String>,
        format: impl Into<String>,
        algorithm: impl Into<String>,
    ) -> Self {
        Self {
            secret: secret.into(),
            key: None,
            path: None,
            format: format.into(),
            algorithm: algorithm.into(),
            auth_data: None,
        }
    }

    /// Set inline PEM key text.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(KeyInput::Text(key.into()));
        self
    }

    /// Set inline key bytes.
    pub fn with_key_bytes(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key = Some(KeyInput::Bytes(key.into()));
        self
    }

    /// Set the key file path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the context returned on a match.
    pub fn with_auth_data(mut self, auth_data: Value) -> Self {
        self.auth_data = Some(auth_data);
        self
    }
}

/// A validated verification identity.
#[derive(Debug, Clone)]
pub struct Tenant {
    challenge: String,
    key: Vec<u8>,
    encoding: String,
    algorithm: String,
    auth_data: Option<Value>,
    public_key: VerifyResult<PublicKey>,
}

impl Tenant {
    pub(crate) fn new(
        challenge: String,
        key: Vec<u8>,
        encoding: String,
        algorithm: String,
        auth_data: Option<Value>,
    ) -> Self {
        let public_key = parse_public_key(&key);
        Self {
            challenge,
            key,
            encoding,
            algorithm,
            auth_data,
            public_key,
        }
    }

    /// Plaintext the signature must cover.
    pub fn challenge(&self) -> &str {
        &self.challenge
    }

    /// Key material exactly as supplied.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn auth_data(&self) -> Option<&Value> {
        self.auth_data.as_ref()
    }

    /// Parsed key, or the reason it could not be parsed.
    pub(crate) fn public_key(&self) -> Result<&PublicKey, &crate::error::VerifyError> {
        self.public_key.as_ref()
    }

    /// Whether the key material parsed into a usable public key.
    pub fn has_usable_key(&self) -> bool {
        self.public_key.is_ok()
    }
}

/// Context attached to an authenticated request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Credentials {
    /// The matched tenant's `authData`, passed through unchanged.
    pub auth_data: Option<Value>,
}

/// Outcome of one authentication attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// A tenant verified the signature.
    Authenticated(Credentials),
    /// No header, malformed header, or no tenant matched.
    Unauthenticated,
}

impl Decision {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Credentials of the matched tenant, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        match self {
            Self::Authenticated(credentials) => Some(credentials),
            Self::Unauthenticated => None,
        }
    }

    pub fn into_credentials(self) -> Option<Credentials> {
        match self {
            Self::Authenticated(credentials) => Some(credentials),
            Self::Unauthenticated => None,
        }
    }
}
