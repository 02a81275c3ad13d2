//! In-process `DocumentStore` used when no database is configured and by
//! the endpoint tests.
//!
//! Semantics follow the PostgreSQL adapter: filters are exact equality on
//! stored strings, sorting follows JSONB ordering with missing fields last,
//! and ties keep insertion order.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{
    DeleteOutcome, DocumentStore, DocumentStoreError, FindOptions, SortSpec, UpdateOutcome,
};
use crate::domain::{
    Collection, Document, DocumentId, QueryFilter, StoredDocument, UpdateOperation,
};

/// Thread-safe in-memory document store.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<StoredDocument>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Number of documents currently held in `collection`.
    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }
}

/// Rank of a JSON type in JSONB btree order.
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::String(_) => 1,
        Value::Number(_) => 2,
        Value::Bool(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_json(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or_default();
            let b = b.as_f64().unwrap_or_default();
            a.total_cmp(&b)
        }
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => type_rank(left).cmp(&type_rank(right)),
    }
}

/// Compare two documents on `sort`; absent fields sort last either way.
fn compare_documents(sort: SortSpec, left: &StoredDocument, right: &StoredDocument) -> Ordering {
    match (left.field(sort.field), right.field(sort.field)) {
        (Some(a), Some(b)) if sort.descending => compare_json(b, a),
        (Some(a), Some(b)) => compare_json(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &QueryFilter,
        options: FindOptions,
    ) -> Result<Vec<StoredDocument>, DocumentStoreError> {
        let guard = self.collections.read().await;
        let mut found: Vec<StoredDocument> = guard
            .get(&collection)
            .into_iter()
            .flatten()
            .filter(|document| filter.matches(&document.body))
            .cloned()
            .collect();
        drop(guard);

        if let Some(sort) = options.sort {
            found.sort_by(|left, right| compare_documents(sort, left, right));
        }
        if let Some(limit) = options.limit {
            found.truncate(limit);
        }
        debug!(collection = collection.name(), count = found.len(), "documents found");
        Ok(found)
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, DocumentStoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .and_then(|documents| documents.iter().find(|document| document.id == id))
            .cloned())
    }

    async fn insert(
        &self,
        collection: Collection,
        body: Document,
    ) -> Result<DocumentId, DocumentStoreError> {
        let id = DocumentId::random();
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(StoredDocument::new(id, body));
        debug!(collection = collection.name(), %id, "document inserted");
        Ok(id)
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
        update: &UpdateOperation,
    ) -> Result<UpdateOutcome, DocumentStoreError> {
        let mut guard = self.collections.write().await;
        let Some(document) = guard
            .get_mut(&collection)
            .and_then(|documents| documents.iter_mut().find(|document| document.id == id))
        else {
            return Ok(UpdateOutcome::default());
        };
        let changed = update.apply_to(&mut document.body);
        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    async fn delete_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<DeleteOutcome, DocumentStoreError> {
        let mut guard = self.collections.write().await;
        let Some(documents) = guard.get_mut(&collection) else {
            return Ok(DeleteOutcome::default());
        };
        let before = documents.len();
        documents.retain(|document| document.id != id);
        Ok(DeleteOutcome {
            deleted: (before - documents.len()) as u64,
        })
    }
}
