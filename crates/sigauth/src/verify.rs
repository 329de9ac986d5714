//! Signature verification against a single tenant.
//!
//! Decodes the header signature per the tenant's encoding and checks it over
//! the tenant's challenge. The strategy runs this once per tenant:
//! - RSA keys: RSASSA-PKCS1-v1_5 over the chosen SHA-2 digest
//! - ECDSA P-256 keys: DER signature over the chosen SHA-2 digest
//! - Ed25519 keys: pure Ed25519, algorithm `ed25519`

pub use crate::verify_internal::algorithm::{DigestAlgorithm, SignatureAlgorithm};
pub use crate::verify_internal::encoding::SignatureEncoding;

use crate::error::VerifyResult;
use crate::types::Tenant;

/// Check `candidate` (signature text from the header) against one tenant.
///
/// Returns `Ok(false)` for a well-formed signature that does not verify, and
/// an error when the tenant's algorithm, encoding or key cannot be used or
/// the signature is malformed.
pub fn verify_signature(tenant: &Tenant, candidate: &str) -> VerifyResult<bool> {
    crate::verify_internal::signature::verify_tenant_impl(tenant, candidate)
}

/// Key type of a tenant's key material (`"RSA"`, `"ECDSA P-256"`,
/// `"Ed25519"`), or the reason it does not parse.
pub fn key_type(tenant: &Tenant) -> VerifyResult<&'static str> {
    tenant
        .public_key()
        .map(|key| key.key_type())
        .map_err(Clone::clone)
}
