//! Tests for the domain error payload and its serialisation contract.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("x"), ErrorCode::Forbidden)]
#[case(Error::not_found("x"), ErrorCode::NotFound)]
#[case(Error::internal("x"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_as_camel_case_without_empty_fields(base_error: Error) {
    let value = serde_json::to_value(&base_error).expect("serialise error");
    assert_eq!(value, json!({ "code": "invalid_request", "message": "bad" }));
}

#[rstest]
fn serialises_trace_id_and_details(expected_trace_id: String) {
    let error = Error::not_found("missing")
        .try_with_trace_id(expected_trace_id.clone())
        .expect("non-empty trace id")
        .with_details(json!({ "id": "abc" }));

    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "not_found",
            "message": "missing",
            "traceId": expected_trace_id,
            "details": { "id": "abc" },
        })
    );
}

#[rstest]
#[tokio::test]
async fn deserialising_ignores_ambient_trace_id(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let payload = json!({ "code": "forbidden", "message": "nope" });
    let error = TraceId::scope(trace_id, async move {
        serde_json::from_value::<Error>(payload).expect("valid payload")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
fn deserialising_rejects_blank_message() {
    let payload = json!({ "code": "forbidden", "message": "  " });
    assert!(serde_json::from_value::<Error>(payload).is_err());
}
