//! Query filter composition from optional request parameters.
//!
//! Each resource family recognises a fixed set of query parameters, each
//! mapped to one stored field. Present, non-empty parameters become exact
//! equality constraints joined by logical AND; everything else is ignored.
//! There is deliberately no way to express operators, prefixes or patterns.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use super::Document;

/// Mapping from a recognised query parameter to the stored field it filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub param: &'static str,
    pub field: &'static str,
}

impl FilterField {
    pub const fn new(param: &'static str, field: &'static str) -> Self {
        Self { param, field }
    }
}

/// `GET /foods`: `id` and `user_id` both select a donor's listings by their
/// user id.
pub const FOOD_LISTING_FILTERS: &[FilterField] = &[
    FilterField::new("id", "user_id"),
    FilterField::new("user_id", "user_id"),
    FilterField::new("donator_email", "donator_email"),
    FilterField::new("status", "food_status"),
];

/// `GET /requested-foods`.
pub const FOOD_REQUEST_FILTERS: &[FilterField] = &[
    FilterField::new("email", "user_email"),
    FilterField::new("food_id", "food_id"),
];

/// Conjunction of exact-equality constraints on top-level string fields.
///
/// An empty filter matches every document.
///
/// # Examples
/// ```
/// use plateshare::domain::QueryFilter;
/// use serde_json::json;
///
/// let filter = QueryFilter::default().with("food_status", "Available");
/// let listing = json!({ "food_status": "Available", "food_quantity": 4 });
/// assert!(filter.matches(listing.as_object().expect("object")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    constraints: BTreeMap<String, String>,
}

impl QueryFilter {
    /// Add an equality constraint on `field`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.constraints.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Iterate constraints as `(field, value)` pairs in field order.
    pub fn constraints(&self) -> impl Iterator<Item = (&str, &str)> {
        self.constraints
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// Value required for `field`, if constrained.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.constraints.get(field).map(String::as_str)
    }

    /// Whether `document` satisfies every constraint.
    pub fn matches(&self, document: &Document) -> bool {
        self.constraints.iter().all(|(field, expected)| {
            matches!(document.get(field), Some(Value::String(actual)) if actual == expected)
        })
    }

    /// Constraints rendered as a JSON object, for logs and diagnostics.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.constraints
                .iter()
                .map(|(field, value)| (field.clone(), Value::String(value.clone())))
                .collect(),
        )
    }
}

/// Build a filter from request parameters for one resource family.
///
/// Unrecognised keys are ignored; absent and empty values add no constraint.
pub fn build_filter(fields: &[FilterField], params: &HashMap<String, String>) -> QueryFilter {
    fields
        .iter()
        .filter_map(|mapping| {
            params
                .get(mapping.param)
                .filter(|value| !value.is_empty())
                .map(|value| (mapping.field, value))
        })
        .fold(QueryFilter::default(), |filter, (field, value)| {
            filter.with(field, value.as_str())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[rstest]
    #[case(FOOD_LISTING_FILTERS)]
    #[case(FOOD_REQUEST_FILTERS)]
    fn no_parameters_yields_match_all(#[case] fields: &[FilterField]) {
        let filter = build_filter(fields, &HashMap::new());
        assert!(filter.is_empty());
        assert!(filter.matches(&doc(json!({ "anything": "goes" }))));
        assert_eq!(filter.to_json(), json!({}));
    }

    #[rstest]
    fn present_parameters_compose_as_and() {
        let filter = build_filter(
            FOOD_LISTING_FILTERS,
            &params(&[("donator_email", "a@x.com"), ("status", "Available")]),
        );

        assert_eq!(filter.get("donator_email"), Some("a@x.com"));
        assert_eq!(filter.get("food_status"), Some("Available"));
        assert!(filter.matches(&doc(json!({
            "donator_email": "a@x.com",
            "food_status": "Available",
        }))));
        assert!(!filter.matches(&doc(json!({
            "donator_email": "a@x.com",
            "food_status": "Requested",
        }))));
    }

    #[rstest]
    #[case("id")]
    #[case("user_id")]
    fn id_parameter_maps_to_user_id_field(#[case] param: &str) {
        let filter = build_filter(FOOD_LISTING_FILTERS, &params(&[(param, "u-1")]));
        assert_eq!(filter.to_json(), json!({ "user_id": "u-1" }));
    }

    #[rstest]
    fn empty_and_unknown_parameters_are_ignored() {
        let filter = build_filter(
            FOOD_REQUEST_FILTERS,
            &params(&[("email", ""), ("food_id", "f-1"), ("$where", "1")]),
        );
        assert_eq!(filter.to_json(), json!({ "food_id": "f-1" }));
    }

    #[rstest]
    #[case(json!({ "user_email": "A@x.com" }))]
    #[case(json!({ "user_email": ["a@x.com"] }))]
    #[case(json!({ "user_email": "a@x.com.evil" }))]
    #[case(json!({}))]
    fn constraints_are_exact_string_equality(#[case] candidate: Value) {
        let filter = QueryFilter::default().with("user_email", "a@x.com");
        assert!(!filter.matches(&doc(candidate)));
    }

    #[rstest]
    fn operator_looking_values_stay_literal() {
        let filter = build_filter(FOOD_REQUEST_FILTERS, &params(&[("email", "{\"$ne\":null}")]));
        assert!(!filter.matches(&doc(json!({ "user_email": "a@x.com" }))));
        assert_eq!(filter.to_json(), json!({ "user_email": "{\"$ne\":null}" }));
    }
}
