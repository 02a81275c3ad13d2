//! Domain primitives, ports and services.
//!
//! Purpose: hold the access rules that sit between inbound requests and the
//! document store. Filters, update normalisation and ownership checks are
//! pure functions; services combine them with the driven ports.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable code.
//! - Document / StoredDocument / DocumentId / Collection: schema-less records.
//! - Identity / BearerToken: verified caller and the raw credential.
//! - QueryFilter / build_filter: equality filters from query parameters.
//! - UpdateOperation / normalize: narrow versus full updates.
//! - check_ownership: caller versus declared owner email.
//! - UserDirectoryService / FoodListingService / FoodRequestService.

pub mod authentication;
pub mod document;
pub mod error;
pub mod filter;
pub mod food_listing_service;
pub mod food_request_service;
pub mod identity;
pub mod ownership;
pub mod ports;
mod store_error_mapping;
pub mod trace_id;
pub mod update;
pub mod user_directory_service;

pub use self::authentication::authenticate;
pub use self::document::{
    Collection, Document, DocumentId, ID_FIELD, StoredDocument, without_client_id,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::filter::{
    FOOD_LISTING_FILTERS, FOOD_REQUEST_FILTERS, FilterField, QueryFilter, build_filter,
};
pub use self::food_listing_service::{
    AVAILABLE_STATUS, FEATURED_LIMIT, FOOD_QUANTITY_FIELD, FoodListingService,
};
pub use self::food_request_service::{FoodRequestService, REQUEST_OWNER_FIELD};
pub use self::identity::{BEARER_PREFIX, BearerToken, Identity};
pub use self::ownership::check_ownership;
pub use self::trace_id::TraceId;
pub use self::update::{
    FOOD_LISTING_STATUS, FOOD_REQUEST_STATUS, StatusField, UpdateOperation, normalize,
};
pub use self::user_directory_service::{USER_EMAIL_FIELD, UserDirectoryService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use plateshare::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
