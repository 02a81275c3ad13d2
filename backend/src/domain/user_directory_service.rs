//! Users domain service.
//!
//! Listing and creation require a verified caller but apply no ownership
//! check. Lookups are anonymous: by id reports absence as `None`, by email
//! reports it as `NotFound`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{DocumentStore, FindOptions, UserDirectory};
use crate::domain::store_error_mapping::map_store_error;
use crate::domain::{
    Collection, Document, DocumentId, Error, Identity, QueryFilter, StoredDocument,
    without_client_id,
};

/// Stored field holding a user's email.
pub const USER_EMAIL_FIELD: &str = "email";

/// Users service implementing [`UserDirectory`].
#[derive(Clone)]
pub struct UserDirectoryService<S> {
    store: Arc<S>,
}

impl<S> UserDirectoryService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> UserDirectory for UserDirectoryService<S>
where
    S: DocumentStore,
{
    async fn list_users(&self, caller: &Identity) -> Result<Vec<StoredDocument>, Error> {
        debug!(caller = caller.email(), "listing users");
        self.store
            .find(Collection::Users, &QueryFilter::default(), FindOptions::default())
            .await
            .map_err(map_store_error)
    }

    async fn find_user(&self, id: DocumentId) -> Result<Option<StoredDocument>, Error> {
        self.store
            .find_by_id(Collection::Users, id)
            .await
            .map_err(map_store_error)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<StoredDocument, Error> {
        let filter = QueryFilter::default().with(USER_EMAIL_FIELD, email);
        let found = self
            .store
            .find(Collection::Users, &filter, FindOptions::default().limited(1))
            .await
            .map_err(map_store_error)?;
        found.into_iter().next().ok_or_else(|| {
            Error::not_found("User not found").with_details(json!({ "email": email }))
        })
    }

    async fn create_user(&self, caller: &Identity, payload: Document) -> Result<DocumentId, Error> {
        let id = self
            .store
            .insert(Collection::Users, without_client_id(payload))
            .await
            .map_err(map_store_error)?;
        debug!(caller = caller.email(), %id, "user created");
        Ok(id)
    }
}

#[cfg(test)]
#[path = "user_directory_service_tests.rs"]
mod tests;
