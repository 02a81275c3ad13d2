//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn failures into consistent JSON responses. Extractor failures (bad
//! JSON, malformed query strings or paths) are reshaped into the same
//! `invalid_request` payload.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use tracing::debug;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(self)
    }
}

fn extractor_error(kind: &str, cause: &dyn std::fmt::Display) -> actix_web::Error {
    debug!(kind, error = %cause, "request extraction failed");
    Error::invalid_request(format!("invalid {kind}: {cause}")).into()
}

/// JSON body configuration turning parse failures into `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            extractor_error("JSON body", &err)
        })
}

/// Query string configuration turning parse failures into `invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
            extractor_error("query string", &err)
        })
}

/// Path configuration turning parse failures into `invalid_request`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err: PathError, _req: &HttpRequest| extractor_error("path", &err))
}
