//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on ports, so
//! endpoint tests can swap in the in-memory store and a static verifier.

use std::sync::Arc;

use crate::domain::ports::{FoodListings, FoodRequests, IdentityVerifier, UserDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<dyn IdentityVerifier>,
    pub users: Arc<dyn UserDirectory>,
    pub food_listings: Arc<dyn FoodListings>,
    pub food_requests: Arc<dyn FoodRequests>,
}

impl HttpState {
    /// Bundle the identity verifier with the three resource services.
    pub fn new(
        identity: Arc<dyn IdentityVerifier>,
        users: Arc<dyn UserDirectory>,
        food_listings: Arc<dyn FoodListings>,
        food_requests: Arc<dyn FoodRequests>,
    ) -> Self {
        Self {
            identity,
            users,
            food_listings,
            food_requests,
        }
    }
}
