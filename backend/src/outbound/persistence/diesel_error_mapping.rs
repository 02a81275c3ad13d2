//! Diesel and pool error mapping for the document store adapter.
//!
//! Messages are kept verbatim so they reach the client in 500 responses.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::DocumentStoreError;

use super::pool::PoolError;

pub(super) fn map_pool_error(error: PoolError) -> DocumentStoreError {
    DocumentStoreError::connection(error.message())
}

pub(super) fn map_diesel_error(error: DieselError) -> DocumentStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            DocumentStoreError::connection(info.message())
        }
        DieselError::DatabaseError(_, info) => DocumentStoreError::query(info.message()),
        DieselError::BrokenTransactionManager => {
            DocumentStoreError::connection("database connection error")
        }
        other => DocumentStoreError::query(other.to_string()),
    }
}
