//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
#[case(Error::duplicate_application("x"), ErrorCode::DuplicateApplication)]
#[case(Error::already_saved("x"), ErrorCode::AlreadySaved)]
#[case(Error::invalid_transition("x"), ErrorCode::InvalidTransition)]
#[case(Error::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("x"), ErrorCode::Forbidden)]
#[case(Error::not_found("x"), ErrorCode::NotFound)]
#[case(Error::unavailable("x"), ErrorCode::Unavailable)]
#[case(Error::internal("x"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn blank_messages_fall_back_to_default() {
    let err = Error::not_found("   ");
    assert_eq!(err.message(), "Not found");
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values() {
    let result = Error::invalid_request("bad").try_with_trace_id("  ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn unavailable_is_marked_retryable() {
    let err = Error::unavailable("db down");
    assert_eq!(err.details(), Some(&json!({ "retryable": true })));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_camel_case_without_empty_fields() {
    let value = serde_json::to_value(Error::forbidden("nope")).expect("serialise");
    assert_eq!(value, json!({ "code": "forbidden", "message": "nope" }));
}

#[rstest]
fn serialises_trace_and_details(expected_trace_id: String) {
    let err = Error::duplicate_application("again")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "alreadyApplied": true }));
    let value = serde_json::to_value(err).expect("serialise");
    assert_eq!(
        value,
        json!({
            "code": "duplicate_application",
            "message": "again",
            "traceId": expected_trace_id,
            "details": { "alreadyApplied": true }
        })
    );
}

#[rstest]
#[tokio::test]
async fn deserialising_ignores_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async move {
        serde_json::from_value::<Error>(json!({ "code": "not_found", "message": "gone" }))
            .expect("valid payload")
    })
    .await;
    assert!(error.trace_id().is_none());
}

#[rstest]
fn deserialising_rejects_blank_message() {
    let result = serde_json::from_value::<Error>(json!({ "code": "not_found", "message": " " }));
    assert!(result.is_err());
}
