//! OpenAPI schema definitions for domain and response types.
//!
//! Domain types stay free of utoipa derives; the wrappers here mirror their
//! serialised shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// A required field is missing or a parameter is malformed.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The bearer credential is missing or failed verification.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The caller does not own the resource named in the request.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// No matching document.
    #[schema(rename = "not_found")]
    NotFound,
    /// The document store or identity provider failed.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "forbidden")]
    code: ErrorCodeSchema,
    /// Human-readable message; internal failures carry the raw cause.
    #[schema(example = "forbidden access")]
    message: String,
    /// Correlation identifier, also sent as the `Trace-Id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::StoredDocument`].
///
/// Stored documents are schema-less: every field the client sent is returned
/// verbatim alongside the store-assigned `_id`.
#[derive(ToSchema)]
#[schema(
    as = crate::domain::StoredDocument,
    example = json!({
        "_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "food_name": "Vegetable biryani",
        "food_quantity": 4,
        "food_status": "Available",
        "donator_email": "donor@example.com"
    })
)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StoredDocumentSchema {
    /// Store-assigned identifier.
    #[schema(rename = "_id", value_type = String, format = Uuid)]
    id: String,
}

/// Free-form JSON object accepted by create and update endpoints.
#[derive(ToSchema)]
#[schema(
    as = crate::domain::Document,
    example = json!({ "food_name": "Vegetable biryani", "food_quantity": 4 })
)]
pub struct DocumentSchema {}

/// Payload for `PATCH /requested-food/{id}`.
#[derive(ToSchema)]
#[schema(example = json!({ "status": "accepted" }))]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RequestStatusSchema {
    /// New status; required and non-empty.
    status: String,
}
