//! Driven port for the document store shared by all resource families.
//!
//! Adapters own identifier assignment, equality filtering, ordering and
//! single-document mutation. They never interpret payload fields beyond what
//! a [`QueryFilter`], [`FindOptions`] or [`UpdateOperation`] names.

use async_trait::async_trait;

use crate::domain::{Collection, Document, DocumentId, QueryFilter, StoredDocument, UpdateOperation};

use super::define_port_error;

define_port_error! {
    /// Errors raised by document store adapters.
    pub enum DocumentStoreError {
        /// The store could not be reached.
        Connection => "document store connection failed: {message}",
        /// The store rejected or failed to execute an operation.
        Query => "document store query failed: {message}",
    }
}

/// Descending or ascending sort on one top-level field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: &'static str,
    pub descending: bool,
}

impl SortSpec {
    pub const fn descending(field: &'static str) -> Self {
        Self {
            field,
            descending: true,
        }
    }
}

/// Ordering and truncation applied to a find.
///
/// The default is store order with no limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub sort: Option<SortSpec>,
    pub limit: Option<usize>,
}

impl FindOptions {
    pub fn sorted(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limited(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Result of a single-document update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents selected by the identifier (0 or 1).
    pub matched: u64,
    /// Documents whose stored body actually changed.
    pub modified: u64,
}

/// Result of a single-document delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: u64,
}

/// Port for document persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return every document in `collection` matching `filter`.
    async fn find(
        &self,
        collection: Collection,
        filter: &QueryFilter,
        options: FindOptions,
    ) -> Result<Vec<StoredDocument>, DocumentStoreError>;

    /// Exact-match lookup by identifier.
    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, DocumentStoreError>;

    /// Persist `body` as a new document and return its assigned identifier.
    async fn insert(
        &self,
        collection: Collection,
        body: Document,
    ) -> Result<DocumentId, DocumentStoreError>;

    /// Apply `update` to the document with `id`.
    ///
    /// An update with no assignments must succeed and report zero modified.
    async fn update_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
        update: &UpdateOperation,
    ) -> Result<UpdateOutcome, DocumentStoreError>;

    /// Remove the document with `id`, if present.
    async fn delete_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<DeleteOutcome, DocumentStoreError>;
}
