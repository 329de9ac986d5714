//! Plugin and strategy options.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};

/// Scheme word expected before the signature when none is configured.
pub const DEFAULT_AUTHORIZATION_TYPE: &str = "signature";

/// Name under which the plugin registers its default strategy.
pub const DEFAULT_STRATEGY_NAME: &str = "signature";

/// Environment variable overriding the authorization type.
pub const AUTHORIZATION_TYPE_ENV: &str = "SIGAUTH_AUTHORIZATION_TYPE";

/// Options handed to [`crate::plugin::SignatureAuth::register`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginOptions {
    /// Raw tenant configuration: one descriptor or an array of them.
    pub tenants: Value,

    /// Scheme word for the default strategy.
    #[serde(
        default,
        alias = "authorizationType",
        skip_serializing_if = "Option::is_none"
    )]
    pub authorization_type: Option<String>,

    /// Directory relative key paths resolve against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl PluginOptions {
    pub fn new(tenants: Value) -> Self {
        Self {
            tenants,
            authorization_type: None,
            base_dir: None,
        }
    }

    pub fn with_authorization_type(mut self, authorization_type: impl Into<String>) -> Self {
        self.authorization_type = Some(authorization_type.into());
        self
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    pub fn from_json_str(input: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_yaml_str(input: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Load options from a file. `.json` files are parsed as JSON, anything
    /// else as YAML. Relative key paths resolve against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let options = if is_json {
            Self::from_json_str(&input)?
        } else {
            Self::from_yaml_str(&input)?
        };

        let base_dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Ok(options.with_base_dir(base_dir))
    }

    /// Strategy options for the default strategy.
    pub fn strategy_options(&self) -> StrategyOptions {
        match &self.authorization_type {
            Some(authorization_type) => {
                StrategyOptions::default().with_authorization_type(authorization_type.clone())
            }
            None => StrategyOptions::default(),
        }
    }
}

/// Per-strategy options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyOptions {
    #[serde(default = "default_authorization_type", alias = "authorizationType")]
    pub authorization_type: String,
}

fn default_authorization_type() -> String {
    DEFAULT_AUTHORIZATION_TYPE.to_string()
}

impl Default for StrategyOptions {
    fn default() -> Self {
        Self {
            authorization_type: default_authorization_type(),
        }
    }
}

impl StrategyOptions {
    pub fn with_authorization_type(mut self, authorization_type: impl Into<String>) -> Self {
        self.authorization_type = authorization_type.into();
        self
    }

    /// Defaults, overridden by `SIGAUTH_AUTHORIZATION_TYPE` when set.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = env::var(AUTHORIZATION_TYPE_ENV) {
            cfg.authorization_type = v;
        }

        cfg
    }

    pub(crate) fn validate(&self) -> ConfigResult<()> {
        if self.authorization_type.is_empty() {
            return Err(ConfigError::InvalidScheme {
                reason: "authorization type must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
