//! Users API handlers.
//!
//! ```text
//! GET  /users              (bearer)
//! GET  /user/{id}
//! GET  /user/email/{email}
//! POST /user               (bearer)
//! ```

use actix_web::{get, post, web};

use crate::domain::{Document, DocumentId, StoredDocument};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::responses::InsertOneResult;
#[allow(unused_imports, reason = "referenced from utoipa path attributes")]
use crate::inbound::http::schemas::{DocumentSchema, ErrorSchema, StoredDocumentSchema};
use crate::inbound::http::state::HttpState;

/// Every stored user.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = [StoredDocumentSchema]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    caller: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<StoredDocument>>> {
    let users = state.users.list_users(caller.identity()).await?;
    Ok(web::Json(users))
}

/// Lookup by id; an unknown id yields `null`, not 404.
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    responses(
        (status = 200, description = "The user, or null", body = StoredDocumentSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/user/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<StoredDocument>>> {
    let id = DocumentId::parse(&path.into_inner())?;
    Ok(web::Json(state.users.find_user(id).await?))
}

/// Lookup by email; an unknown email is 404.
#[utoipa::path(
    get,
    path = "/user/email/{email}",
    params(("email" = String, Path, description = "Exact, case-sensitive email")),
    responses(
        (status = 200, description = "The user", body = StoredDocumentSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUserByEmail",
    security([])
)]
#[get("/user/email/{email}")]
pub async fn get_user_by_email(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<StoredDocument>> {
    let user = state.users.find_user_by_email(&path.into_inner()).await?;
    Ok(web::Json(user))
}

/// Store the payload as a new user.
#[utoipa::path(
    post,
    path = "/user",
    request_body = DocumentSchema,
    responses(
        (status = 200, description = "User stored", body = InsertOneResult),
        (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    caller: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<Document>,
) -> ApiResult<web::Json<InsertOneResult>> {
    let id = state
        .users
        .create_user(caller.identity(), payload.into_inner())
        .await?;
    Ok(web::Json(id.into()))
}
