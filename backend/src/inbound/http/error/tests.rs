//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("connection refused by 10.0.0.7")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}))
}

async fn body_json(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error body is JSON")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::SEE_OTHER)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(internal_error: Error) {
    let response = internal_error.error_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(header.as_deref(), Some(TRACE_ID));

    let body = body_json(response).await;
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["message"], REDACTED);
    assert_eq!(body["traceId"], TRACE_ID);
    assert!(body.get("details").is_none());
}

#[rstest]
#[actix_web::test]
async fn invalid_request_keeps_message_and_details() {
    let error = Error::invalid_request("target_date is not a valid date")
        .with_details(json!({"field": "target_date"}));

    let body = body_json(error.error_response()).await;

    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], "target_date is not a valid date");
    assert_eq!(body["details"]["field"], "target_date");
}

#[rstest]
fn unauthorized_redirects_to_login_without_caching() {
    let response = Error::unauthorized("login required").error_response();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some(LOGIN_PATH)
    );
    assert_eq!(
        response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok()),
        Some("no-store")
    );
}

#[rstest]
fn storage_not_found_stays_not_found() {
    let error = storage_failure("goal", "update", RepositoryError::not_found());
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(RepositoryError::timeout("list goals"))]
#[case(RepositoryError::connection("refused"))]
#[case(RepositoryError::query("syntax error"))]
#[case(RepositoryError::conflict("goals_pkey"))]
fn other_storage_failures_become_internal(#[case] err: RepositoryError) {
    let error = storage_failure("goal", "insert", err);
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(redact_if_internal(&error).message(), REDACTED);
}
