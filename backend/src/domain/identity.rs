//! Verified caller identity and the bearer credential it is derived from.

use std::fmt;

use super::Error;

/// Authorization scheme prefix accepted on the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Identity yielded by a successful credential verification.
///
/// The email claim is the identity key; ownership checks compare it with
/// case-sensitive string equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    email: String,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// Verified email claim.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}

/// Opaque bearer credential extracted from an `Authorization` header.
///
/// The raw token never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Extract the credential from a raw header value.
    ///
    /// Missing headers, unknown schemes and empty tokens are all rejected as
    /// unauthenticated before any provider call is made.
    ///
    /// # Examples
    /// ```
    /// use plateshare::domain::BearerToken;
    ///
    /// assert!(BearerToken::from_header(Some("Bearer abc.def.ghi")).is_ok());
    /// assert!(BearerToken::from_header(Some("Basic dXNlcg==")).is_err());
    /// assert!(BearerToken::from_header(None).is_err());
    /// ```
    pub fn from_header(value: Option<&str>) -> Result<Self, Error> {
        let value = value.ok_or_else(|| Error::unauthorized("authorization header is required"))?;
        let token = value
            .strip_prefix(BEARER_PREFIX)
            .ok_or_else(|| Error::unauthorized("authorization scheme must be Bearer"))?
            .trim();
        if token.is_empty() {
            return Err(Error::unauthorized("bearer token must not be empty"));
        }
        Ok(Self(token.to_owned()))
    }

    /// Raw token for handing to the identity provider.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("Bearer"))]
    #[case(Some("Bearer    "))]
    #[case(Some("bearer abc"))]
    #[case(Some("Token abc"))]
    fn rejects_malformed_headers(#[case] header: Option<&str>) {
        let error = BearerToken::from_header(header).expect_err("malformed header");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn extracts_token_after_prefix() {
        let token = BearerToken::from_header(Some("Bearer abc.def.ghi")).expect("token");
        assert_eq!(token.expose(), "abc.def.ghi");
    }

    #[rstest]
    fn debug_output_redacts_token() {
        let token = BearerToken::from_header(Some("Bearer secret-value")).expect("token");
        assert!(!format!("{token:?}").contains("secret-value"));
    }
}
