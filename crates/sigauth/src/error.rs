//! Error types for tenant configuration and signature verification.

use std::path::PathBuf;

/// Configuration errors.
///
/// Raised while a registry or strategy is being assembled. These are fatal
/// to startup and are never folded into an authentication outcome.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The tenants value is neither a single object nor an array.
    #[error("tenants must be an object or array")]
    InvalidTenants,

    /// A tenant field has the wrong type.
    #[error("tenants[{index}].{field} must be {expected}")]
    InvalidField {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },

    /// Both an inline key and a key file path were given.
    #[error("tenants[{index}] specifies path and key")]
    ConflictingKeySource { index: usize },

    /// Neither an inline key nor a key file path was given.
    #[error("tenants[{index}] missing path or key")]
    MissingKeySource { index: usize },

    /// The key file of a tenant could not be read.
    #[error("tenants[{index}] failed to read key file {}: {source}", path.display())]
    KeyFile {
        index: usize,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The authorization scheme token is unusable.
    #[error("invalid authorization type: {reason}")]
    InvalidScheme { reason: String },

    /// A strategy with this name is already registered.
    #[error("strategy already registered: {name}")]
    DuplicateStrategy { name: String },

    /// Options file could not be read.
    #[error("failed to read options file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Options document could not be parsed.
    #[error("failed to parse options: {message}")]
    Parse { message: String },
}

impl ConfigError {
    pub(crate) fn invalid_field(
        index: usize,
        field: &'static str,
        expected: &'static str,
    ) -> Self {
        Self::InvalidField {
            index,
            field,
            expected,
        }
    }

    /// Position of the offending tenant, when the error is tied to one.
    pub fn tenant_index(&self) -> Option<usize> {
        match self {
            Self::InvalidField { index, .. }
            | Self::ConflictingKeySource { index }
            | Self::MissingKeySource { index }
            | Self::KeyFile { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by a single verification attempt.
///
/// The strategy discards these: every variant collapses into an
/// unauthenticated decision. They are surfaced only to direct callers of
/// [`crate::verify::verify_signature`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// Unknown digest or signature algorithm.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Unknown signature encoding.
    #[error("unsupported signature encoding: {0}")]
    UnsupportedEncoding(String),

    /// The signature text is not valid for its encoding.
    #[error("invalid {encoding} signature: {reason}")]
    InvalidEncoding { encoding: String, reason: String },

    /// The key material could not be parsed.
    #[error("invalid public key: {0}")]
    InvalidKey(String),

    /// The algorithm cannot be used with this kind of key.
    #[error("algorithm {algorithm} cannot be used with {key_type} key")]
    KeyAlgorithmMismatch {
        algorithm: String,
        key_type: &'static str,
    },

    /// The decoded signature bytes are malformed for the key type.
    #[error("malformed signature: {0}")]
    InvalidSignature(String),
}

/// Result type for verification attempts.
pub type VerifyResult<T> = Result<T, VerifyError>;
