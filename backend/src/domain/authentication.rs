//! Identity verification for routes that require a signed-in caller.

use tracing::{debug, error};

use super::ports::{IdentityVerificationError, IdentityVerifier};
use super::{BearerToken, Error, Identity};

/// Verify the raw `Authorization` header value.
///
/// Malformed or missing headers fail before the provider is contacted. Every
/// call is verified independently.
pub async fn authenticate(
    verifier: &dyn IdentityVerifier,
    authorization: Option<&str>,
) -> Result<Identity, Error> {
    let token = BearerToken::from_header(authorization)?;
    verifier.verify(&token).await.map_err(map_verification_error)
}

fn map_verification_error(err: IdentityVerificationError) -> Error {
    match err {
        IdentityVerificationError::Rejected { message } => {
            debug!(reason = %message, "bearer token rejected");
            Error::unauthorized("unauthorized access")
        }
        IdentityVerificationError::Unavailable { message } => {
            error!(reason = %message, "identity provider unavailable");
            Error::internal(format!("identity provider unavailable: {message}"))
        }
    }
}
