//! Server settings loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use plateshare::outbound::identity::JwksVerifierConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
/// Public keys for Firebase ID tokens.
const DEFAULT_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";
const SECURE_TOKEN_ISSUER_BASE: &str = "https://securetoken.google.com";

/// Listener, store and identity provider settings.
///
/// Values come from CLI flags, `PLATESHARE_*` environment variables or a
/// configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PLATESHARE")]
pub struct ServerSettings {
    /// TCP port to listen on.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// Interface to bind; defaults to all interfaces.
    pub host: Option<String>,
    /// PostgreSQL URL. Without one, documents live in process memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub database_pool_size: u32,
    /// JWKS document holding the identity provider's signing keys.
    pub jwks_url: Option<String>,
    /// Identity provider project; derives the default issuer and audience.
    pub project_id: Option<String>,
    /// Expected `iss` claim.
    pub token_issuer: Option<String>,
    /// Expected `aud` claim.
    pub token_audience: Option<String>,
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host().to_owned(), self.port)
    }

    pub fn jwks_url(&self) -> &str {
        self.jwks_url.as_deref().unwrap_or(DEFAULT_JWKS_URL)
    }

    /// Explicit issuer, else the secure-token issuer for `project_id`.
    pub fn token_issuer(&self) -> Option<String> {
        self.token_issuer.clone().or_else(|| {
            self.project_id
                .as_deref()
                .map(|project| format!("{SECURE_TOKEN_ISSUER_BASE}/{project}"))
        })
    }

    /// Explicit audience, else `project_id`.
    pub fn token_audience(&self) -> Option<String> {
        self.token_audience
            .clone()
            .or_else(|| self.project_id.clone())
    }

    /// Verifier configuration, or an error naming the missing setting.
    pub fn verifier_config(&self) -> std::io::Result<JwksVerifierConfig> {
        let issuer = self.token_issuer().ok_or_else(|| {
            std::io::Error::other("token issuer is not configured: set PLATESHARE_PROJECT_ID or PLATESHARE_TOKEN_ISSUER")
        })?;
        let audience = self.token_audience().ok_or_else(|| {
            std::io::Error::other("token audience is not configured: set PLATESHARE_PROJECT_ID or PLATESHARE_TOKEN_AUDIENCE")
        })?;
        Ok(JwksVerifierConfig {
            jwks_url: self.jwks_url().to_owned(),
            issuer,
            audience,
        })
    }
}
