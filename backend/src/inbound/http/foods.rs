//! Food listing API handlers.
//!
//! ```text
//! GET    /foods           ?id=&donator_email=&status=
//! GET    /featured-foods
//! GET    /food/{id}       (bearer)
//! POST   /food            (bearer)
//! PATCH  /food/{id}       (bearer)
//! DELETE /food/{id}       (bearer)
//! ```

use std::collections::HashMap;

use actix_web::{delete, get, patch, post, web};

use crate::domain::{Document, DocumentId, StoredDocument};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::responses::{DeleteResult, InsertOneResult, UpdateResult};
#[allow(unused_imports, reason = "referenced from utoipa path attributes")]
use crate::inbound::http::schemas::{DocumentSchema, ErrorSchema, StoredDocumentSchema};
use crate::inbound::http::state::HttpState;

/// Listings filtered by the recognised query parameters.
#[utoipa::path(
    get,
    path = "/foods",
    params(
        ("id" = Option<String>, Query, description = "Donor user id (matches `user_id`)"),
        ("donator_email" = Option<String>, Query, description = "Donor email"),
        ("status" = Option<String>, Query, description = "Listing status (matches `food_status`)")
    ),
    responses(
        (status = 200, description = "Matching listings", body = [StoredDocumentSchema]),
        (status = 400, description = "Malformed query string", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["foods"],
    operation_id = "listFoods",
    security([])
)]
#[get("/foods")]
pub async fn list_foods(
    state: web::Data<HttpState>,
    params: web::Query<HashMap<String, String>>,
) -> ApiResult<web::Json<Vec<StoredDocument>>> {
    let listings = state.food_listings.list_listings(&params).await?;
    Ok(web::Json(listings))
}

/// Up to six available listings, largest quantity first.
#[utoipa::path(
    get,
    path = "/featured-foods",
    responses(
        (status = 200, description = "Featured listings", body = [StoredDocumentSchema]),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["foods"],
    operation_id = "featuredFoods",
    security([])
)]
#[get("/featured-foods")]
pub async fn featured_foods(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<StoredDocument>>> {
    Ok(web::Json(state.food_listings.featured_listings().await?))
}

/// Lookup by id; an unknown id yields `null`.
#[utoipa::path(
    get,
    path = "/food/{id}",
    params(("id" = String, Path, description = "Listing identifier (UUID)")),
    responses(
        (status = 200, description = "The listing, or null", body = StoredDocumentSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["foods"],
    operation_id = "getFood"
)]
#[get("/food/{id}")]
pub async fn get_food(
    caller: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<StoredDocument>>> {
    let id = DocumentId::parse(&path.into_inner())?;
    let listing = state
        .food_listings
        .find_listing(caller.identity(), id)
        .await?;
    Ok(web::Json(listing))
}

#[utoipa::path(
    post,
    path = "/food",
    request_body = DocumentSchema,
    responses(
        (status = 200, description = "Listing stored", body = InsertOneResult),
        (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["foods"],
    operation_id = "createFood"
)]
#[post("/food")]
pub async fn create_food(
    caller: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<Document>,
) -> ApiResult<web::Json<InsertOneResult>> {
    let id = state
        .food_listings
        .create_listing(caller.identity(), payload.into_inner())
        .await?;
    Ok(web::Json(id.into()))
}

/// A payload whose only key is `status` sets only `food_status`; any other
/// payload is merged field by field.
#[utoipa::path(
    patch,
    path = "/food/{id}",
    params(("id" = String, Path, description = "Listing identifier (UUID)")),
    request_body = DocumentSchema,
    responses(
        (status = 200, description = "Update acknowledged", body = UpdateResult),
        (status = 400, description = "Malformed identifier or body", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["foods"],
    operation_id = "updateFood"
)]
#[patch("/food/{id}")]
pub async fn update_food(
    caller: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Document>,
) -> ApiResult<web::Json<UpdateResult>> {
    let id = DocumentId::parse(&path.into_inner())?;
    let outcome = state
        .food_listings
        .update_listing(caller.identity(), id, payload.into_inner())
        .await?;
    Ok(web::Json(outcome.into()))
}

#[utoipa::path(
    delete,
    path = "/food/{id}",
    params(("id" = String, Path, description = "Listing identifier (UUID)")),
    responses(
        (status = 200, description = "Delete acknowledged", body = DeleteResult),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["foods"],
    operation_id = "deleteFood"
)]
#[delete("/food/{id}")]
pub async fn delete_food(
    caller: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteResult>> {
    let id = DocumentId::parse(&path.into_inner())?;
    let outcome = state
        .food_listings
        .delete_listing(caller.identity(), id)
        .await?;
    Ok(web::Json(outcome.into()))
}

#[cfg(test)]
#[path = "foods_tests.rs"]
mod tests;
