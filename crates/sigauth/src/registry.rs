//! Tenant registry: validation and normalization of tenant configuration.
//!
//! The registry is built once, before serving, and is read-only afterwards.
//! Every construction path is loud: any malformed entry fails the whole
//! build with a [`ConfigError`] naming the offending index and field.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::types::{KeyInput, Tenant, TenantConfig};
use crate::verify::{key_type, verify_signature};

/// Ordered, immutable list of verification identities.
#[derive(Debug, Clone, Default)]
pub struct TenantRegistry {
    tenants: Vec<Tenant>,
}

impl TenantRegistry {
    /// Build from raw configuration: a single tenant object or an array of them.
    ///
    /// Relative key paths are resolved against the working directory.
    pub fn from_value(tenants: &Value) -> ConfigResult<Self> {
        Self::load(tenants, None)
    }

    /// Like [`TenantRegistry::from_value`], resolving relative key paths
    /// against `base_dir`.
    pub fn from_value_in(tenants: &Value, base_dir: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::load(tenants, Some(base_dir.as_ref()))
    }

    /// Build from typed descriptors.
    pub fn build(configs: &[TenantConfig]) -> ConfigResult<Self> {
        let tenants = configs
            .iter()
            .enumerate()
            .map(|(index, config)| tenant_from_config(index, config))
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(Self::finish(tenants))
    }

    fn load(tenants: &Value, base_dir: Option<&Path>) -> ConfigResult<Self> {
        let entries: Vec<&Value> = match tenants {
            Value::Object(_) => vec![tenants],
            Value::Array(items) => items.iter().collect(),
            _ => return Err(ConfigError::InvalidTenants),
        };

        let tenants = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| tenant_from_value(index, entry, base_dir))
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(Self::finish(tenants))
    }

    fn finish(tenants: Vec<Tenant>) -> Self {
        for (index, tenant) in tenants.iter().enumerate() {
            if let Err(e) = key_type(tenant) {
                warn!(
                    index,
                    algorithm = tenant.algorithm(),
                    error = %e,
                    "tenant key does not parse; tenant will never match"
                );
            }
        }
        info!(tenants = tenants.len(), "tenant registry built");
        Self { tenants }
    }

    /// First tenant, in registry order, whose key verifies `candidate`.
    ///
    /// A failure while checking one tenant counts as a non-match for that
    /// tenant only; the scan continues with the next one.
    pub fn find_match(&self, candidate: &str) -> Option<&Tenant> {
        self.tenants
            .iter()
            .find(|tenant| matches!(verify_signature(tenant, candidate), Ok(true)))
    }

    pub fn tenants(&self) -> &[Tenant] {
        &self.tenants
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tenant> {
        self.tenants.iter()
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}

impl<'a> IntoIterator for &'a TenantRegistry {
    type Item = &'a Tenant;
    type IntoIter = std::slice::Iter<'a, Tenant>;

    fn into_iter(self) -> Self::IntoIter {
        self.tenants.iter()
    }
}

// ==================== Entry validation ====================

/// Where a tenant's key comes from.
enum KeySource<'a> {
    Inline(KeyInput),
    File(&'a Path),
}

fn tenant_from_value(index: usize, entry: &Value, base_dir: Option<&Path>) -> ConfigResult<Tenant> {
    let empty = Map::new();
    let fields = entry.as_object().unwrap_or(&empty);

    let secret = string_field(index, fields, "secret")?;

    let key = match fields.get("key") {
        None => None,
        Some(value) => Some(key_input(index, value)?),
    };
    let path = match fields.get("path") {
        None => None,
        Some(Value::String(path)) => Some(Path::new(path.as_str())),
        Some(_) => return Err(ConfigError::invalid_field(index, "path", "a string")),
    };

    let source = key_source(index, key, path)?;
    let (key, origin) = read_key(index, source, base_dir)?;

    let format = string_field(index, fields, "format")?;
    let algorithm = string_field(index, fields, "algorithm")?;
    let auth_data = fields.get("authData").cloned();

    debug!(index, key_source = origin, %algorithm, encoding = %format, "tenant loaded");
    Ok(Tenant::new(secret, key, format, algorithm, auth_data))
}

fn tenant_from_config(index: usize, config: &TenantConfig) -> ConfigResult<Tenant> {
    let source = key_source(index, config.key.clone(), config.path.as_deref())?;
    let (key, origin) = read_key(index, source, None)?;

    debug!(
        index,
        key_source = origin,
        algorithm = %config.algorithm,
        encoding = %config.format,
        "tenant loaded"
    );
    Ok(Tenant::new(
        config.secret.clone(),
        key,
        config.format.clone(),
        config.algorithm.clone(),
        config.auth_data.clone(),
    ))
}

fn string_field(index: usize, fields: &Map<String, Value>, field: &'static str) -> ConfigResult<String> {
    match fields.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        _ => Err(ConfigError::invalid_field(index, field, "a string")),
    }
}

/// Inline key: PEM text or a byte buffer given as an array of octets.
fn key_input(index: usize, value: &Value) -> ConfigResult<KeyInput> {
    const EXPECTED: &str = "a string or byte array";

    match value {
        Value::String(text) => Ok(KeyInput::Text(text.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|octet| u8::try_from(octet).ok())
                    .ok_or_else(|| ConfigError::invalid_field(index, "key", EXPECTED))
            })
            .collect::<ConfigResult<Vec<u8>>>()
            .map(KeyInput::Bytes),
        _ => Err(ConfigError::invalid_field(index, "key", EXPECTED)),
    }
}

fn key_source(index: usize, key: Option<KeyInput>, path: Option<&Path>) -> ConfigResult<KeySource<'_>> {
    match (key, path) {
        (Some(_), Some(_)) => Err(ConfigError::ConflictingKeySource { index }),
        (None, None) => Err(ConfigError::MissingKeySource { index }),
        (Some(key), None) => Ok(KeySource::Inline(key)),
        (None, Some(path)) => Ok(KeySource::File(path)),
    }
}

fn read_key(
    index: usize,
    source: KeySource<'_>,
    base_dir: Option<&Path>,
) -> ConfigResult<(Vec<u8>, &'static str)> {
    match source {
        KeySource::Inline(key) => Ok((key.into_bytes(), "inline")),
        KeySource::File(path) => {
            let path = resolve_path(path, base_dir);
            let key = std::fs::read(&path)
                .map_err(|source| ConfigError::KeyFile { index, path, source })?;
            Ok((key, "path"))
        }
    }
}

fn resolve_path(path: &Path, base_dir: Option<&Path>) -> PathBuf {
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}
