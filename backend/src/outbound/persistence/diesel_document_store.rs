//! PostgreSQL-backed `DocumentStore` using a single JSONB table.
//!
//! Every resource family shares the `documents` table, partitioned by the
//! `collection` column. Filters compare `body -> field` with a JSON string so
//! matching stays exact-equality on the stored value. Updates merge the
//! assignments into the body with `||`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{
    DeleteOutcome, DocumentStore, DocumentStoreError, FindOptions, UpdateOutcome,
};
use crate::domain::{
    Collection, Document, DocumentId, QueryFilter, StoredDocument, UpdateOperation,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{DocumentRow, NewDocumentRow};
use super::pool::DbPool;
use super::schema::documents;

/// Diesel implementation of [`DocumentStore`].
#[derive(Clone)]
pub struct DieselDocumentStore {
    pool: DbPool,
}

impl DieselDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_document(row: DocumentRow) -> Result<StoredDocument, DocumentStoreError> {
    match row.body {
        Value::Object(body) => Ok(StoredDocument::new(DocumentId::from_uuid(row.id), body)),
        other => Err(DocumentStoreError::query(format!(
            "document {} has a non-object body of type {}",
            row.id,
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn limit_to_sql(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[async_trait]
impl DocumentStore for DieselDocumentStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &QueryFilter,
        options: FindOptions,
    ) -> Result<Vec<StoredDocument>, DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = documents::table
            .filter(documents::collection.eq(collection.name()))
            .select(DocumentRow::as_select())
            .into_boxed();
        for (field, value) in filter.constraints() {
            query = query.filter(
                documents::body
                    .retrieve_as_object(field.to_owned())
                    .eq(Value::String(value.to_owned())),
            );
        }
        query = match options.sort {
            Some(sort) if sort.descending => query.order(
                documents::body
                    .retrieve_as_object(sort.field)
                    .desc()
                    .nulls_last(),
            ),
            Some(sort) => query.order(
                documents::body
                    .retrieve_as_object(sort.field)
                    .asc()
                    .nulls_last(),
            ),
            None => query,
        };
        query = query.then_order_by(documents::position.asc());
        if let Some(limit) = options.limit {
            query = query.limit(limit_to_sql(limit));
        }

        let rows: Vec<DocumentRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        debug!(
            collection = collection.name(),
            filter = %filter.to_json(),
            count = rows.len(),
            "documents found"
        );
        rows.into_iter().map(row_to_document).collect()
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = documents::table
            .filter(documents::collection.eq(collection.name()))
            .filter(documents::id.eq(*id.as_uuid()))
            .select(DocumentRow::as_select())
            .first::<DocumentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_document).transpose()
    }

    async fn insert(
        &self,
        collection: Collection,
        body: Document,
    ) -> Result<DocumentId, DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = DocumentId::random();
        let row = NewDocumentRow {
            id: *id.as_uuid(),
            collection: collection.name(),
            body: Value::Object(body),
        };
        diesel::insert_into(documents::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(collection = collection.name(), %id, "document inserted");
        Ok(id)
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
        update: &UpdateOperation,
    ) -> Result<UpdateOutcome, DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let patch = Value::Object(update.assignments());

        // Only rows the merge would actually change count as modified.
        let modified = diesel::update(
            documents::table
                .filter(documents::collection.eq(collection.name()))
                .filter(documents::id.eq(*id.as_uuid()))
                .filter(documents::body.concat(patch.clone()).ne(documents::body)),
        )
        .set(documents::body.eq(documents::body.concat(patch)))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        let matched = if modified > 0 {
            true
        } else {
            diesel::select(exists(
                documents::table
                    .filter(documents::collection.eq(collection.name()))
                    .filter(documents::id.eq(*id.as_uuid())),
            ))
            .get_result::<bool>(&mut conn)
            .await
            .map_err(map_diesel_error)?
        };

        let outcome = UpdateOutcome {
            matched: u64::from(matched),
            modified: modified as u64,
        };
        debug!(
            collection = collection.name(),
            %id,
            matched = outcome.matched,
            modified = outcome.modified,
            "document updated"
        );
        Ok(outcome)
    }

    async fn delete_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<DeleteOutcome, DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            documents::table
                .filter(documents::collection.eq(collection.name()))
                .filter(documents::id.eq(*id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        debug!(collection = collection.name(), %id, deleted, "document deleted");
        Ok(DeleteOutcome {
            deleted: deleted as u64,
        })
    }
}
