//! Food requests domain service.
//!
//! Requests are the only family whose reads and writes are scoped by the
//! caller's verified email: an `email` filter and a declared `user_email`
//! must both name the caller. Filtering by `food_id` alone is unrestricted.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::ports::{DocumentStore, FindOptions, FoodRequests, UpdateOutcome};
use crate::domain::store_error_mapping::map_store_error;
use crate::domain::{
    Collection, Document, DocumentId, Error, FOOD_REQUEST_FILTERS, FOOD_REQUEST_STATUS, Identity,
    StoredDocument, UpdateOperation, build_filter, check_ownership, without_client_id,
};

/// Stored field naming the requesting user.
pub const REQUEST_OWNER_FIELD: &str = "user_email";

/// Requests service implementing [`FoodRequests`].
#[derive(Clone)]
pub struct FoodRequestService<S> {
    store: Arc<S>,
}

impl<S> FoodRequestService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

/// Owner email declared by a payload.
///
/// A present non-string value is rendered as JSON so it can never equal a
/// verified email and is denied rather than skipped.
fn declared_owner(payload: &Document) -> Option<String> {
    match payload.get(REQUEST_OWNER_FIELD)? {
        Value::String(email) => Some(email.clone()),
        other => Some(other.to_string()),
    }
}

/// Status carried by a status update payload; must be a non-empty string.
fn required_status(payload: &Document) -> Result<&str, Error> {
    match payload.get(FOOD_REQUEST_STATUS.payload_key) {
        Some(Value::String(status)) if !status.is_empty() => Ok(status.as_str()),
        _ => Err(Error::invalid_request("Status is required").with_details(json!({
            "field": FOOD_REQUEST_STATUS.payload_key,
            "code": "missing_status",
        }))),
    }
}

#[async_trait]
impl<S> FoodRequests for FoodRequestService<S>
where
    S: DocumentStore,
{
    async fn list_requests(
        &self,
        caller: &Identity,
        params: &HashMap<String, String>,
    ) -> Result<Vec<StoredDocument>, Error> {
        let filter = build_filter(FOOD_REQUEST_FILTERS, params);
        check_ownership(caller, filter.get(REQUEST_OWNER_FIELD))?;
        self.store
            .find(Collection::FoodRequests, &filter, FindOptions::default())
            .await
            .map_err(map_store_error)
    }

    async fn create_request(
        &self,
        caller: &Identity,
        payload: Document,
    ) -> Result<DocumentId, Error> {
        check_ownership(caller, declared_owner(&payload).as_deref())?;
        let id = self
            .store
            .insert(Collection::FoodRequests, without_client_id(payload))
            .await
            .map_err(map_store_error)?;
        debug!(caller = caller.email(), %id, "food request created");
        Ok(id)
    }

    async fn update_request_status(
        &self,
        caller: &Identity,
        id: DocumentId,
        payload: Document,
    ) -> Result<UpdateOutcome, Error> {
        let status = required_status(&payload)?;
        let update = UpdateOperation::narrow(FOOD_REQUEST_STATUS.stored_field, json!(status));
        let outcome = self
            .store
            .update_by_id(Collection::FoodRequests, id, &update)
            .await
            .map_err(map_store_error)?;
        if outcome.matched == 0 {
            return Err(Error::not_found("Request not found").with_details(json!({ "id": id })));
        }
        debug!(
            caller = caller.email(),
            %id,
            status,
            modified = outcome.modified,
            "food request status updated"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "food_request_service_tests.rs"]
mod tests;
