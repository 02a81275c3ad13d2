//! Food request API handlers.
//!
//! All routes require a bearer token. Listing by `email` and creating with a
//! `user_email` are restricted to the caller's own address.

use std::collections::HashMap;

use actix_web::{get, patch, post, web};

use crate::domain::{Document, DocumentId, StoredDocument};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::responses::{InsertOneResult, UpdateResult};
#[allow(unused_imports, reason = "referenced from utoipa path attributes")]
use crate::inbound::http::schemas::{
    DocumentSchema, ErrorSchema, RequestStatusSchema, StoredDocumentSchema,
};
use crate::inbound::http::state::HttpState;

#[utoipa::path(
    get,
    path = "/requested-foods",
    params(
        ("email" = Option<String>, Query, description = "Requester email; must be the caller's"),
        ("food_id" = Option<String>, Query, description = "Requested listing id")
    ),
    responses(
        (status = 200, description = "Matching requests", body = [StoredDocumentSchema]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 403, description = "Email names another user", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "listRequestedFoods"
)]
#[get("/requested-foods")]
pub async fn list_requested_foods(
    caller: Authenticated,
    state: web::Data<HttpState>,
    params: web::Query<HashMap<String, String>>,
) -> ApiResult<web::Json<Vec<StoredDocument>>> {
    let requests = state
        .food_requests
        .list_requests(caller.identity(), &params)
        .await?;
    Ok(web::Json(requests))
}

#[utoipa::path(
    post,
    path = "/requested-food",
    request_body = DocumentSchema,
    responses(
        (status = 200, description = "Request stored", body = InsertOneResult),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 403, description = "`user_email` names another user", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "createRequestedFood"
)]
#[post("/requested-food")]
pub async fn create_requested_food(
    caller: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<Document>,
) -> ApiResult<web::Json<InsertOneResult>> {
    let id = state
        .food_requests
        .create_request(caller.identity(), payload.into_inner())
        .await?;
    Ok(web::Json(id.into()))
}

/// Set only the request's `status`; other payload fields are ignored.
#[utoipa::path(
    patch,
    path = "/requested-food/{id}",
    params(("id" = String, Path, description = "Request identifier (UUID)")),
    request_body = RequestStatusSchema,
    responses(
        (status = 200, description = "Status updated", body = UpdateResult),
        (status = 400, description = "Missing status or malformed identifier", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 404, description = "Request not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "updateRequestedFood"
)]
#[patch("/requested-food/{id}")]
pub async fn update_requested_food(
    caller: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Document>,
) -> ApiResult<web::Json<UpdateResult>> {
    let id = DocumentId::parse(&path.into_inner())?;
    let outcome = state
        .food_requests
        .update_request_status(caller.identity(), id, payload.into_inner())
        .await?;
    Ok(web::Json(outcome.into()))
}

#[cfg(test)]
#[path = "food_requests_tests.rs"]
mod tests;
