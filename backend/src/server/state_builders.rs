//! Builders wiring the document store and identity verifier into HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use plateshare::domain::ports::DocumentStore;
use plateshare::domain::{FoodListingService, FoodRequestService, UserDirectoryService};
use plateshare::inbound::http::state::HttpState;
use plateshare::outbound::identity::JwksIdentityVerifier;
use plateshare::outbound::memory::InMemoryDocumentStore;
use plateshare::outbound::persistence::{DbPool, DieselDocumentStore, PoolConfig};

use super::ServerSettings;

fn build_state_for_store<S>(store: Arc<S>, identity: JwksIdentityVerifier) -> HttpState
where
    S: DocumentStore + 'static,
{
    HttpState::new(
        Arc::new(identity),
        Arc::new(UserDirectoryService::new(store.clone())),
        Arc::new(FoodListingService::new(store.clone())),
        Arc::new(FoodRequestService::new(store)),
    )
}

/// Build handler state from settings.
///
/// Uses PostgreSQL when `database_url` is set, otherwise an in-memory store
/// that loses every document on restart.
///
/// # Errors
/// Returns [`std::io::Error`] when the verifier settings are incomplete or
/// the database pool cannot be built.
pub async fn build_http_state(settings: &ServerSettings) -> std::io::Result<web::Data<HttpState>> {
    let verifier = JwksIdentityVerifier::new(settings.verifier_config()?)
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let state = match settings.database_url.as_deref() {
        Some(url) => {
            let pool = DbPool::new(
                PoolConfig::new(url).with_max_size(settings.database_pool_size),
            )
            .await
            .map_err(|err| std::io::Error::other(format!("database pool: {err}")))?;
            info!(pool_size = settings.database_pool_size, "using PostgreSQL document store");
            build_state_for_store(Arc::new(DieselDocumentStore::new(pool)), verifier)
        }
        None => {
            warn!("PLATESHARE_DATABASE_URL is not set; documents are kept in memory only");
            build_state_for_store(InMemoryDocumentStore::new_shared(), verifier)
        }
    };
    Ok(web::Data::new(state))
}
