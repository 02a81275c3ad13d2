//! PlateShare entry-point: loads settings, wires adapters, serves REST and docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use plateshare::inbound::http::health::HealthState;
use server::{ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, &settings).await?;
    info!(host = settings.host(), port = settings.port, "server listening");
    server.await
}
