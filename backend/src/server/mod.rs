//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerSettings;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use plateshare::Trace;
#[cfg(debug_assertions)]
use plateshare::doc::ApiDoc;
use plateshare::inbound::http;
use plateshare::inbound::http::health::{HealthState, live, ready, root};
use plateshare::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(http::configure)
        .service(root)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server from loaded settings.
///
/// # Errors
/// Propagates [`std::io::Error`] when the adapters cannot be built or the
/// socket cannot be bound.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    settings: &ServerSettings,
) -> std::io::Result<Server> {
    let http_state = build_http_state(settings).await?;
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(settings.bind_addr())?
        .run();

    health_state.mark_ready();
    Ok(server)
}
