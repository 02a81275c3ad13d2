//! Bearer token verification against an identity provider's published JWKS.
//!
//! Tokens are RS256 JWTs. The signing key is chosen by the header `kid`, and
//! `exp`, `iss` and `aud` must all validate before the `email` claim is
//! trusted. The key set is fetched on every verification, so nothing about a
//! previous request influences the next one.

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domain::ports::{IdentityVerificationError, IdentityVerifier};
use crate::domain::{BearerToken, Identity};

/// Where to find signing keys and which issuer and audience to accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwksVerifierConfig {
    pub jwks_url: String,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Deserialize)]
struct IdentityClaims {
    email: Option<String>,
}

/// [`IdentityVerifier`] backed by a remote JWKS document.
#[derive(Debug, Clone)]
pub struct JwksIdentityVerifier {
    client: reqwest::Client,
    config: JwksVerifierConfig,
}

impl JwksIdentityVerifier {
    pub fn new(config: JwksVerifierConfig) -> Result<Self, IdentityVerificationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| IdentityVerificationError::unavailable(err.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &JwksVerifierConfig {
        &self.config
    }

    async fn fetch_key_set(&self) -> Result<JwkSet, IdentityVerificationError> {
        let unavailable =
            |err: reqwest::Error| IdentityVerificationError::unavailable(err.to_string());
        self.client
            .get(&self.config.jwks_url)
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?
            .json::<JwkSet>()
            .await
            .map_err(unavailable)
    }

    /// Verify `token` against an already fetched key set.
    pub fn verify_with_key_set(
        &self,
        token: &BearerToken,
        key_set: &JwkSet,
    ) -> Result<Identity, IdentityVerificationError> {
        let raw = token.expose();
        let header = decode_header(raw).map_err(reject)?;
        if header.alg != Algorithm::RS256 {
            return Err(IdentityVerificationError::rejected(format!(
                "unsupported signing algorithm {:?}",
                header.alg
            )));
        }
        let kid = header
            .kid
            .ok_or_else(|| IdentityVerificationError::rejected("token has no key id"))?;
        let jwk = key_set
            .find(&kid)
            .ok_or_else(|| IdentityVerificationError::rejected(format!("unknown key id {kid}")))?;
        let key = DecodingKey::from_jwk(jwk).map_err(|err| {
            IdentityVerificationError::unavailable(format!("unusable signing key {kid}: {err}"))
        })?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_audience(&[self.config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        let claims = decode::<IdentityClaims>(raw, &key, &validation)
            .map_err(reject)?
            .claims;
        match claims.email {
            Some(email) if !email.is_empty() => Ok(Identity::new(email)),
            _ => Err(IdentityVerificationError::rejected("token carries no email claim")),
        }
    }
}

fn reject(err: jsonwebtoken::errors::Error) -> IdentityVerificationError {
    let reason = match err.kind() {
        ErrorKind::ExpiredSignature => "token expired",
        ErrorKind::InvalidIssuer => "unexpected issuer",
        ErrorKind::InvalidAudience => "unexpected audience",
        ErrorKind::InvalidSignature => "signature mismatch",
        ErrorKind::MissingRequiredClaim(_) => "missing required claim",
        _ => "malformed token",
    };
    debug!(error = %err, reason, "token rejected");
    IdentityVerificationError::rejected(reason)
}

#[async_trait]
impl IdentityVerifier for JwksIdentityVerifier {
    #[instrument(skip_all)]
    async fn verify(&self, token: &BearerToken) -> Result<Identity, IdentityVerificationError> {
        let key_set = self.fetch_key_set().await?;
        self.verify_with_key_set(token, &key_set)
    }
}
