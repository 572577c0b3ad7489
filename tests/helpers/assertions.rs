// Test Assertion Helpers
//
// Common assertions for responses produced by `actix_web::test`.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

/// Assert the status and return the JSON body
///
/// # Panics
/// If the status differs, with the response body in the message
pub async fn assert_status_json<B: MessageBody>(
    resp: ServiceResponse<B>,
    expected: StatusCode,
) -> Value {
    let status = resp.status();
    let body = test::read_body(resp).await;
    let text = String::from_utf8_lossy(&body).to_string();

    assert_eq!(
        status, expected,
        "Expected {} but got {}: {}",
        expected, status, text
    );

    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// Assert a standard error body carrying `message`
pub fn assert_error_message(body: &Value, message: &str) {
    let actual = body["error"]["message"]
        .as_str()
        .unwrap_or_else(|| panic!("Expected error body, got {}", body));
    assert!(
        actual.contains(message),
        "Expected error containing '{}', got '{}'",
        message,
        actual
    );
}
