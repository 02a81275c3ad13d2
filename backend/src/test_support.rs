//! Test doubles shared by unit and integration tests.
//!
//! Compiled for `cfg(test)` and for the `test-support` feature that the
//! integration tests enable.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::ports::{IdentityVerificationError, IdentityVerifier};
use crate::domain::{BearerToken, Identity};

/// Identity verifier resolving tokens from a fixed table.
///
/// Unknown tokens are rejected. Once [`StaticIdentityVerifier::with_outage`]
/// is set, every verification fails as if the provider were down.
///
/// # Examples
///
/// ```rust
/// use plateshare::test_support::StaticIdentityVerifier;
///
/// let verifier = StaticIdentityVerifier::new().with_token("t-ann", "ann@x.com");
/// assert_eq!(verifier.email_for("t-ann"), Some("ann@x.com"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityVerifier {
    tokens: HashMap<String, String>,
    outage: Option<String>,
}

impl StaticIdentityVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, email: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), email.into());
        self
    }

    /// Fail every verification with the given provider message.
    pub fn with_outage(mut self, message: impl Into<String>) -> Self {
        self.outage = Some(message.into());
        self
    }

    pub fn email_for(&self, token: &str) -> Option<&str> {
        self.tokens.get(token).map(String::as_str)
    }
}

#[async_trait]
impl IdentityVerifier for StaticIdentityVerifier {
    async fn verify(&self, token: &BearerToken) -> Result<Identity, IdentityVerificationError> {
        if let Some(message) = &self.outage {
            return Err(IdentityVerificationError::unavailable(message.clone()));
        }
        self.email_for(token.expose())
            .map(Identity::new)
            .ok_or_else(|| IdentityVerificationError::rejected("unknown test token"))
    }
}
