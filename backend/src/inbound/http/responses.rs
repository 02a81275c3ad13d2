//! Write acknowledgements returned by create, update and delete endpoints.
//!
//! Field names follow the document-store driver results that existing
//! clients already parse.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::DocumentId;
use crate::domain::ports::{DeleteOutcome, UpdateOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    #[schema(value_type = String, format = Uuid)]
    pub inserted_id: DocumentId,
}

impl From<DocumentId> for InsertOneResult {
    fn from(inserted_id: DocumentId) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateOutcome> for UpdateResult {
    fn from(outcome: UpdateOutcome) -> Self {
        Self {
            acknowledged: true,
            matched_count: outcome.matched,
            modified_count: outcome.modified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<DeleteOutcome> for DeleteResult {
    fn from(outcome: DeleteOutcome) -> Self {
        Self {
            acknowledged: true,
            deleted_count: outcome.deleted,
        }
    }
}
