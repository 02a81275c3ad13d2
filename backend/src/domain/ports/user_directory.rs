//! Driving port for the users resource family.
//!
//! Inbound adapters call this port after resolving the caller's identity on
//! routes that require one. Lookups by id and by email are anonymous.

use async_trait::async_trait;

use crate::domain::{Document, DocumentId, Error, Identity, StoredDocument};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every stored user.
    async fn list_users(&self, caller: &Identity) -> Result<Vec<StoredDocument>, Error>;

    /// Lookup by identifier; absence is `Ok(None)`, not an error.
    async fn find_user(&self, id: DocumentId) -> Result<Option<StoredDocument>, Error>;

    /// Lookup by email; absence is [`crate::domain::ErrorCode::NotFound`].
    async fn find_user_by_email(&self, email: &str) -> Result<StoredDocument, Error>;

    /// Insert the payload as-is.
    async fn create_user(&self, caller: &Identity, payload: Document) -> Result<DocumentId, Error>;
}
