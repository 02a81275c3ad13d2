//! Bearer token extractor for routes that require a verified caller.
//!
//! Handlers that take [`Authenticated`] as their first argument reject the
//! request before any other extraction when the `Authorization` header is
//! missing, malformed or fails verification.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Identity, authenticate};

use super::state::HttpState;

/// Identity of the caller, verified for this request only.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Identity);

impl Authenticated {
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl FromRequest for Authenticated {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        // Non-ASCII header values are treated like a missing header.
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let identity = authenticate(state.identity.as_ref(), header.as_deref()).await?;
            Ok(Self(identity))
        })
    }
}
