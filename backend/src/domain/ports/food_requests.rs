//! Driving port for the food requests resource family.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{Document, DocumentId, Error, Identity, StoredDocument};

use super::UpdateOutcome;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FoodRequests: Send + Sync {
    /// Requests matching the recognised query parameters. An `email`
    /// parameter must name the caller.
    async fn list_requests(
        &self,
        caller: &Identity,
        params: &HashMap<String, String>,
    ) -> Result<Vec<StoredDocument>, Error>;

    /// Insert a request; a declared `user_email` must name the caller.
    async fn create_request(&self, caller: &Identity, payload: Document)
    -> Result<DocumentId, Error>;

    /// Set the status of one request from a payload carrying `status`.
    async fn update_request_status(
        &self,
        caller: &Identity,
        id: DocumentId,
        payload: Document,
    ) -> Result<UpdateOutcome, Error>;
}
