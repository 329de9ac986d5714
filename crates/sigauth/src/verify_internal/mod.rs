//! Internal verify implementation modules.
//!
//! `crate::verify` is the public facade; this module owns the split
//! implementation boundaries and the vector tests.

pub(crate) mod algorithm;
pub(crate) mod encoding;
pub(crate) mod keys;
pub(crate) mod signature;
#[cfg(test)]
pub(crate) mod tests;
