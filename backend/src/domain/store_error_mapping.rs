//! Translation of document store failures into domain errors.

use tracing::error;

use super::Error;
use super::ports::DocumentStoreError;

/// Map a store failure to an internal error that keeps the raw message.
pub(crate) fn map_store_error(err: DocumentStoreError) -> Error {
    error!(error = %err, "document store call failed");
    match err {
        DocumentStoreError::Connection { message } => {
            Error::internal(format!("document store unavailable: {message}"))
        }
        DocumentStoreError::Query { message } => {
            Error::internal(format!("document store error: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(DocumentStoreError::connection("refused"), "document store unavailable: refused")]
    #[case(DocumentStoreError::query("bad jsonb"), "document store error: bad jsonb")]
    fn store_failures_surface_as_internal(#[case] err: DocumentStoreError, #[case] message: &str) {
        let mapped = map_store_error(err);
        assert_eq!(mapped.code(), ErrorCode::InternalError);
        assert_eq!(mapped.message(), message);
    }
}
