//! Schema-less documents and their identifiers.
//!
//! Payloads for users, food listings and food requests are stored as loose
//! JSON objects. The core only inspects the handful of fields it enforces
//! (status, owner email); everything else passes through untouched.

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::Error;

/// A JSON object as received from or returned to clients.
pub type Document = Map<String, Value>;

/// Field name used to expose a document's identifier in responses.
pub const ID_FIELD: &str = "_id";

/// Document collections backing the three resource families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Users,
    FoodListings,
    FoodRequests,
}

impl Collection {
    /// Stable collection name used by storage adapters.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Users => "user",
            Self::FoodListings => "foods",
            Self::FoodRequests => "food_requests",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unique document identifier assigned by the store on insert.
///
/// # Examples
/// ```
/// use plateshare::domain::DocumentId;
///
/// let id = DocumentId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("uuid");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// assert!(DocumentId::parse("64f1c0ffee").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a path segment, rejecting malformed identifiers as a bad request.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        Uuid::parse_str(raw.trim()).map(Self).map_err(|_| {
            Error::invalid_request(format!("invalid document id: {raw}"))
                .with_details(serde_json::json!({ "field": "id", "code": "invalid_id" }))
        })
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted document together with its store-assigned identifier.
///
/// Serialises as the document body with `_id` prepended, matching what
/// clients sent plus the identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub body: Document,
}

impl StoredDocument {
    pub fn new(id: DocumentId, body: Document) -> Self {
        Self { id, body }
    }

    /// Read a top-level field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.get(name)
    }
}

impl Serialize for StoredDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.body.len() + 1))?;
        map.serialize_entry(ID_FIELD, &self.id)?;
        for (key, value) in self.body.iter().filter(|(key, _)| key.as_str() != ID_FIELD) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Strip any client-supplied identifier; the store owns `_id`.
pub fn without_client_id(mut body: Document) -> Document {
    body.remove(ID_FIELD);
    body
}
