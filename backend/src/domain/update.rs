//! Narrow-versus-full update disambiguation.
//!
//! A payload consisting of exactly the status key becomes a narrow set of the
//! stored status field. Any other payload, including an empty one, sets every
//! key it carries verbatim.

use serde_json::Value;

use super::Document;

/// Where a resource family accepts and stores its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusField {
    /// Key clients send in update payloads.
    pub payload_key: &'static str,
    /// Field the status is stored under.
    pub stored_field: &'static str,
}

pub const FOOD_LISTING_STATUS: StatusField = StatusField {
    payload_key: "status",
    stored_field: "food_status",
};

pub const FOOD_REQUEST_STATUS: StatusField = StatusField {
    payload_key: "status",
    stored_field: "status",
};

/// Field-level mutation applied to a single document.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOperation {
    /// Set exactly one field.
    Narrow { field: String, value: Value },
    /// Set every listed field; may be empty, which modifies nothing.
    Full(Document),
}

impl UpdateOperation {
    pub fn narrow(field: impl Into<String>, value: Value) -> Self {
        Self::Narrow {
            field: field.into(),
            value,
        }
    }

    /// Fields and values this operation sets.
    pub fn assignments(&self) -> Document {
        match self {
            Self::Narrow { field, value } => {
                let mut fields = Document::new();
                fields.insert(field.clone(), value.clone());
                fields
            }
            Self::Full(fields) => fields.clone(),
        }
    }

    pub fn is_narrow(&self) -> bool {
        matches!(self, Self::Narrow { .. })
    }

    /// Apply the assignments to `document`, returning whether anything changed.
    pub fn apply_to(&self, document: &mut Document) -> bool {
        let mut changed = false;
        for (field, value) in self.assignments() {
            if document.get(&field) != Some(&value) {
                document.insert(field, value);
                changed = true;
            }
        }
        changed
    }
}

/// Decide the update operation for `payload`.
///
/// # Examples
/// ```
/// use plateshare::domain::{normalize, UpdateOperation, FOOD_LISTING_STATUS};
/// use serde_json::json;
///
/// let payload = json!({ "status": "Requested" }).as_object().cloned().expect("object");
/// assert_eq!(
///     normalize(payload, FOOD_LISTING_STATUS),
///     UpdateOperation::narrow("food_status", json!("Requested")),
/// );
/// ```
pub fn normalize(mut payload: Document, status: StatusField) -> UpdateOperation {
    if payload.len() == 1 {
        if let Some(value) = payload.remove(status.payload_key) {
            return UpdateOperation::narrow(status.stored_field, value);
        }
    }
    UpdateOperation::Full(payload)
}
