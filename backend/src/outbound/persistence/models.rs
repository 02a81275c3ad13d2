//! Internal Diesel row structs for the `documents` table.

use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use super::schema::documents;

/// Row shape read back for every find.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DocumentRow {
    pub id: Uuid,
    pub body: Value,
}

/// Insertable row; `position` and `created_at` come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = documents)]
pub(crate) struct NewDocumentRow<'a> {
    pub id: Uuid,
    pub collection: &'a str,
    pub body: Value,
}
