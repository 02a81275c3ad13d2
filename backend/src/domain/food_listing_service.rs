//! Food listings domain service.
//!
//! Mutations require a verified caller, but the owning donor is not compared
//! with that caller: any signed-in user may update or delete any listing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    DeleteOutcome, DocumentStore, FindOptions, FoodListings, SortSpec, UpdateOutcome,
};
use crate::domain::store_error_mapping::map_store_error;
use crate::domain::{
    Collection, Document, DocumentId, Error, FOOD_LISTING_FILTERS, FOOD_LISTING_STATUS, Identity,
    QueryFilter, StoredDocument, UpdateOperation, build_filter, normalize, without_client_id,
};

/// Status a listing must carry to be featured.
pub const AVAILABLE_STATUS: &str = "Available";
/// Stored field ranked by the featured query.
pub const FOOD_QUANTITY_FIELD: &str = "food_quantity";
/// Number of listings returned by the featured query.
pub const FEATURED_LIMIT: usize = 6;

/// Listings service implementing [`FoodListings`].
#[derive(Clone)]
pub struct FoodListingService<S> {
    store: Arc<S>,
}

impl<S> FoodListingService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> FoodListings for FoodListingService<S>
where
    S: DocumentStore,
{
    async fn list_listings(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<Vec<StoredDocument>, Error> {
        let filter = build_filter(FOOD_LISTING_FILTERS, params);
        self.store
            .find(Collection::FoodListings, &filter, FindOptions::default())
            .await
            .map_err(map_store_error)
    }

    async fn featured_listings(&self) -> Result<Vec<StoredDocument>, Error> {
        let filter =
            QueryFilter::default().with(FOOD_LISTING_STATUS.stored_field, AVAILABLE_STATUS);
        let options = FindOptions::default()
            .sorted(SortSpec::descending(FOOD_QUANTITY_FIELD))
            .limited(FEATURED_LIMIT);
        self.store
            .find(Collection::FoodListings, &filter, options)
            .await
            .map_err(map_store_error)
    }

    async fn find_listing(
        &self,
        _caller: &Identity,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, Error> {
        self.store
            .find_by_id(Collection::FoodListings, id)
            .await
            .map_err(map_store_error)
    }

    async fn create_listing(
        &self,
        caller: &Identity,
        payload: Document,
    ) -> Result<DocumentId, Error> {
        let id = self
            .store
            .insert(Collection::FoodListings, without_client_id(payload))
            .await
            .map_err(map_store_error)?;
        debug!(caller = caller.email(), %id, "listing created");
        Ok(id)
    }

    async fn update_listing(
        &self,
        caller: &Identity,
        id: DocumentId,
        payload: Document,
    ) -> Result<UpdateOutcome, Error> {
        let update = match normalize(payload, FOOD_LISTING_STATUS) {
            UpdateOperation::Full(fields) => UpdateOperation::Full(without_client_id(fields)),
            narrow => narrow,
        };
        let outcome = self
            .store
            .update_by_id(Collection::FoodListings, id, &update)
            .await
            .map_err(map_store_error)?;
        debug!(
            caller = caller.email(),
            %id,
            narrow = update.is_narrow(),
            matched = outcome.matched,
            modified = outcome.modified,
            "listing updated"
        );
        Ok(outcome)
    }

    async fn delete_listing(
        &self,
        caller: &Identity,
        id: DocumentId,
    ) -> Result<DeleteOutcome, Error> {
        let outcome = self
            .store
            .delete_by_id(Collection::FoodListings, id)
            .await
            .map_err(map_store_error)?;
        debug!(caller = caller.email(), %id, deleted = outcome.deleted, "listing deleted");
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "food_listing_service_tests.rs"]
mod tests;
