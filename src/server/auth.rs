//! Static API key authentication.
//!
//! Requests carry the key as a `key` query parameter and it is compared
//! against the single configured key. There is no key derivation, expiry,
//! or multi-key support.
//!
//! # Security Properties
//!
//! - **Constant-time comparison**: key verification uses constant-time
//!   comparison to prevent timing attacks. The accepted set is identical to
//!   plain string equality.
//! - **Opaque rejection**: a missing key and a wrong key produce the same
//!   error, and the configured key never appears in logs or responses.

use subtle::ConstantTimeEq;
use tracing::{debug, error};

use crate::error::LookupError;

/// Verifier for the configured shared-secret API key.
#[derive(Clone)]
pub struct ApiKeyAuth {
    key: String,
}

impl ApiKeyAuth {
    /// Create a verifier for the given key.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Check a supplied key against the configured one.
    ///
    /// On rejection the supplied key is logged at error severity for
    /// diagnosis; the configured key is never logged.
    pub fn verify(&self, supplied: &str) -> Result<(), LookupError> {
        if self.key.as_bytes().ct_eq(supplied.as_bytes()).into() {
            debug!("API key accepted");
            Ok(())
        } else {
            error!(supplied_key = supplied, "API key rejected");
            Err(LookupError::InvalidKey)
        }
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the key through Debug formatting.
        f.debug_struct("ApiKeyAuth").finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
