//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint from the inbound layer, the
//! schema wrappers in [`crate::inbound::http::schemas`] plus the write
//! acknowledgements, and the bearer token security scheme. Swagger UI serves
//! it in debug builds.

use crate::inbound::http::responses::{DeleteResult, InsertOneResult, UpdateResult};
use crate::inbound::http::schemas::{
    DocumentSchema, ErrorCodeSchema, ErrorSchema, RequestStatusSchema, StoredDocumentSchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme referenced by protected operations.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("ID token issued by the identity provider."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "PlateShare API",
        description = "Food donation listings and requests with bearer-token ownership checks.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::get_user_by_email,
        crate::inbound::http::users::create_user,
        crate::inbound::http::foods::list_foods,
        crate::inbound::http::foods::featured_foods,
        crate::inbound::http::foods::get_food,
        crate::inbound::http::foods::create_food,
        crate::inbound::http::foods::update_food,
        crate::inbound::http::foods::delete_food,
        crate::inbound::http::food_requests::list_requested_foods,
        crate::inbound::http::food_requests::create_requested_food,
        crate::inbound::http::food_requests::update_requested_food,
        crate::inbound::http::health::root,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        StoredDocumentSchema,
        DocumentSchema,
        RequestStatusSchema,
        InsertOneResult,
        UpdateResult,
        DeleteResult
    )),
    tags(
        (name = "users", description = "User profiles"),
        (name = "foods", description = "Donated food listings"),
        (name = "requests", description = "Requests for donated food"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
