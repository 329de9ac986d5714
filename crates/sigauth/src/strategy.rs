//! Authorization header strategy.
//!
//! A strategy owns one scheme word and a shared [`TenantRegistry`]. It turns
//! an `Authorization` header value into a [`Decision`]; it never fails, never
//! logs and keeps no per-request state.

use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use crate::config::StrategyOptions;
use crate::error::{ConfigError, ConfigResult};
use crate::registry::TenantRegistry;
use crate::types::{Credentials, Decision};

/// Signature strategy bound to one authorization scheme.
#[derive(Debug, Clone)]
pub struct SignatureStrategy {
    name: String,
    scheme: String,
    header_pattern: Regex,
    registry: Arc<TenantRegistry>,
}

impl SignatureStrategy {
    /// Create a strategy named after its scheme word.
    pub fn new(registry: Arc<TenantRegistry>, options: StrategyOptions) -> ConfigResult<Self> {
        let name = options.authorization_type.clone();
        Self::named(name, registry, options)
    }

    /// Create a strategy under an explicit name.
    pub fn named(
        name: impl Into<String>,
        registry: Arc<TenantRegistry>,
        options: StrategyOptions,
    ) -> ConfigResult<Self> {
        options.validate()?;
        let name = name.into();
        let scheme = options.authorization_type;

        let header_pattern = Regex::new(&format!("(?i)^{} (.+)$", regex::escape(&scheme)))
            .map_err(|e| ConfigError::InvalidScheme {
                reason: e.to_string(),
            })?;

        debug!(strategy = %name, %scheme, tenants = registry.len(), "strategy configured");
        Ok(Self {
            name,
            scheme,
            header_pattern,
            registry,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scheme word as configured.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn registry(&self) -> &Arc<TenantRegistry> {
        &self.registry
    }

    /// Candidate signature carried by a header value, if the value has the
    /// form `<scheme> <signature>`.
    pub fn extract_signature<'h>(&self, authorization: &'h str) -> Option<&'h str> {
        self.header_pattern
            .captures(authorization)
            .and_then(|captures| captures.get(1))
            .map(|candidate| candidate.as_str())
    }

    /// Decide on a request given its `Authorization` header value.
    pub fn authenticate(&self, authorization: Option<&str>) -> Decision {
        let Some(candidate) = authorization.and_then(|value| self.extract_signature(value)) else {
            return Decision::Unauthenticated;
        };

        match self.registry.find_match(candidate) {
            Some(tenant) => Decision::Authenticated(Credentials {
                auth_data: tenant.auth_data().cloned(),
            }),
            None => Decision::Unauthenticated,
        }
    }

    /// Like [`SignatureStrategy::authenticate`] for a raw header value; bytes
    /// that are not UTF-8 are treated as a missing header.
    pub fn authenticate_bytes(&self, authorization: Option<&[u8]>) -> Decision {
        self.authenticate(authorization.and_then(|value| std::str::from_utf8(value).ok()))
    }
}
