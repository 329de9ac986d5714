//! Multi-tenant signature authentication for HTTP requests.
//!
//! A request proves its identity with a signature in the `Authorization`
//! header (`Signature <sig>`). The signature is checked against every
//! configured tenant in order; the first tenant whose public key verifies it
//! over the tenant's fixed challenge wins, and that tenant's `authData` is
//! attached to the request.
//!
//! - Tenant registry: validated once at startup, immutable afterwards
//! - Strategies: one per scheme word, all sharing one registry
//! - Verification: RSA PKCS#1 v1.5, ECDSA P-256 and Ed25519
//! - axum middleware (feature `axum`, on by default)
//!
//! # Quick Start
//!
//! ```no_run
//! use sigauth::{PluginOptions, SignatureAuth};
//!
//! # fn example() -> Result<(), sigauth::ConfigError> {
//! let options = PluginOptions::from_path("sigauth.yaml")?;
//! let auth = SignatureAuth::register(&options)?;
//!
//! if let Some(strategy) = auth.default_strategy() {
//!     let decision = strategy.authenticate(Some("Signature ZGVhZGJlZWY="));
//!     println!("authenticated: {}", decision.is_authenticated());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```yaml
//! authorizationType: signature
//! tenants:
//!   - secret: foo              # challenge the client signs
//!     path: keys/public.pem    # or `key:` with inline PEM
//!     format: base64           # base64 | base64url | hex | latin1
//!     algorithm: sha256        # sha224..sha512 | RSA-SHA256 | ed25519
//!     authData:
//!       credentials: { username: peterpluck }
//! ```
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `SIGAUTH_AUTHORIZATION_TYPE` | Scheme word for [`StrategyOptions::from_env`] (default: `signature`) |

pub mod config;
pub mod error;
#[cfg(feature = "axum")]
pub mod middleware;
pub mod plugin;
pub mod registry;
pub mod strategy;
pub mod types;
pub mod verify;
mod verify_internal;

// Re-export main types
pub use config::{
    PluginOptions, StrategyOptions, AUTHORIZATION_TYPE_ENV, DEFAULT_AUTHORIZATION_TYPE,
    DEFAULT_STRATEGY_NAME,
};
pub use error::{ConfigError, ConfigResult, VerifyError, VerifyResult};
#[cfg(feature = "axum")]
pub use middleware::{authorization_header, require_signature, Unauthorized};
pub use plugin::SignatureAuth;
pub use registry::TenantRegistry;
pub use strategy::SignatureStrategy;
pub use types::{Credentials, Decision, KeyInput, Tenant, TenantConfig};
pub use verify::{verify_signature, DigestAlgorithm, SignatureAlgorithm, SignatureEncoding};
