//! Driven port for bearer credential verification against the identity
//! provider.

use async_trait::async_trait;

use crate::domain::{BearerToken, Identity};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity verification adapters.
    pub enum IdentityVerificationError {
        /// Signature, expiry, issuer, audience or claims were invalid.
        Rejected => "credential rejected: {message}",
        /// The provider or its key material could not be reached.
        Unavailable => "identity provider unavailable: {message}",
    }
}

/// Verifies one credential per call. Implementations must not cache
/// verification results across requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &BearerToken) -> Result<Identity, IdentityVerificationError>;
}
