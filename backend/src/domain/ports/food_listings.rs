//! Driving port for the food listings resource family.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{Document, DocumentId, Error, Identity, StoredDocument};

use super::{DeleteOutcome, UpdateOutcome};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FoodListings: Send + Sync {
    /// Listings matching the recognised query parameters.
    async fn list_listings(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<Vec<StoredDocument>, Error>;

    /// Top available listings by quantity.
    async fn featured_listings(&self) -> Result<Vec<StoredDocument>, Error>;

    /// Lookup by identifier; absence is `Ok(None)`.
    async fn find_listing(
        &self,
        caller: &Identity,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, Error>;

    async fn create_listing(&self, caller: &Identity, payload: Document)
    -> Result<DocumentId, Error>;

    /// Narrow-or-full update of one listing.
    async fn update_listing(
        &self,
        caller: &Identity,
        id: DocumentId,
        payload: Document,
    ) -> Result<UpdateOutcome, Error>;

    async fn delete_listing(&self, caller: &Identity, id: DocumentId)
    -> Result<DeleteOutcome, Error>;
}
