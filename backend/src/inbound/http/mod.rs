//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod food_requests;
pub mod foods;
pub mod health;
pub mod responses;
pub mod schemas;
pub mod state;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register extractor configuration and every resource route.
///
/// Health probes are registered separately because they depend on
/// [`health::HealthState`] rather than [`state::HttpState`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .app_data(error::path_config())
        .service(users::list_users)
        .service(users::get_user_by_email)
        .service(users::get_user)
        .service(users::create_user)
        .service(foods::list_foods)
        .service(foods::featured_foods)
        .service(foods::get_food)
        .service(foods::create_food)
        .service(foods::update_food)
        .service(foods::delete_food)
        .service(food_requests::list_requested_foods)
        .service(food_requests::create_requested_food)
        .service(food_requests::update_requested_food);
}
