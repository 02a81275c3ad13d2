//! Diesel table definitions; keep in step with `backend/migrations`.

diesel::table! {
    /// Schema-less records for every resource family.
    ///
    /// `position` preserves insertion order and breaks sort ties. `body` is
    /// always a JSON object and never carries `_id`.
    documents (id) {
        id -> Uuid,
        position -> Int8,
        collection -> Text,
        body -> Jsonb,
        created_at -> Timestamptz,
    }
}
