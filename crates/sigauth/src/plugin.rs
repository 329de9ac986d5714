//! Plugin registration: one tenant registry, any number of named strategies.

use std::sync::Arc;

use tracing::info;

use crate::config::{PluginOptions, StrategyOptions, DEFAULT_STRATEGY_NAME};
use crate::error::{ConfigError, ConfigResult};
use crate::registry::TenantRegistry;
use crate::strategy::SignatureStrategy;

/// Registered signature strategies sharing one tenant registry.
#[derive(Debug, Clone)]
pub struct SignatureAuth {
    registry: Arc<TenantRegistry>,
    strategies: Vec<SignatureStrategy>,
}

impl SignatureAuth {
    /// Build the registry from `options` and register the default
    /// `"signature"` strategy with the configured authorization type.
    pub fn register(options: &PluginOptions) -> ConfigResult<Self> {
        let registry = match &options.base_dir {
            Some(base_dir) => TenantRegistry::from_value_in(&options.tenants, base_dir)?,
            None => TenantRegistry::from_value(&options.tenants)?,
        };

        let mut auth = Self::with_registry(Arc::new(registry));
        auth.strategy(DEFAULT_STRATEGY_NAME, options.strategy_options())?;

        info!(
            tenants = auth.registry.len(),
            scheme = auth.default_strategy().map(SignatureStrategy::scheme),
            "signature auth registered"
        );
        Ok(auth)
    }

    /// Start from an already built registry, with no strategies.
    pub fn with_registry(registry: Arc<TenantRegistry>) -> Self {
        Self {
            registry,
            strategies: Vec::new(),
        }
    }

    /// Register an additional strategy over the shared registry.
    pub fn strategy(
        &mut self,
        name: impl Into<String>,
        options: StrategyOptions,
    ) -> ConfigResult<&SignatureStrategy> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(ConfigError::DuplicateStrategy { name });
        }

        let strategy = SignatureStrategy::named(name, Arc::clone(&self.registry), options)?;
        self.strategies.push(strategy);
        let index = self.strategies.len() - 1;
        Ok(&self.strategies[index])
    }

    pub fn get(&self, name: &str) -> Option<&SignatureStrategy> {
        self.strategies.iter().find(|s| s.name() == name)
    }

    /// The strategy registered under `"signature"`.
    pub fn default_strategy(&self) -> Option<&SignatureStrategy> {
        self.get(DEFAULT_STRATEGY_NAME)
    }

    pub fn registry(&self) -> &Arc<TenantRegistry> {
        &self.registry
    }

    pub fn strategies(&self) -> &[SignatureStrategy] {
        &self.strategies
    }
}
