#[macro_use]
#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::Utc;
use helpers::*;
use kaabo::modules::checkout::services::webhook_signature::sign_payload;
use kaabo::modules::transactions::TransactionStatus;

const WEBHOOK_SECRET: &str = "whsec_test_secret";

/// Create a checkout through the API and return its session id
macro_rules! start_checkout {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/create-checkout-session")
            .set_json(TestDataFactory::package_checkout("summer-tech", "single", 1))
            .to_request();
        let body = assert_status_json(test::call_service(&$app, req).await, StatusCode::OK).await;
        body["session_id"].as_str().unwrap().to_string()
    }};
}

/// Test completed event marks the booking completed
#[actix_web::test]
async fn test_completed_webhook_updates_booking() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    // Step 1: Create checkout via API
    let session_id = start_checkout!(app);

    // Step 2: Provider reports the session completed
    let req = test::TestRequest::post()
        .uri("/api/webhook")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(TestDataFactory::webhook_event(
            "checkout.session.completed",
            &session_id,
        ))
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["success"], true);

    // Step 3: Booking updated
    let tx = ctx.services.transactions.get_by_session(&session_id).await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Completed);
}

/// Test the root-level webhook path behaves the same
#[actix_web::test]
async fn test_root_webhook_path() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);
    let session_id = start_checkout!(app);

    let req = test::TestRequest::post()
        .uri("/webhook")
        .set_payload(TestDataFactory::webhook_event(
            "checkout.session.expired",
            &session_id,
        ))
        .to_request();
    assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;

    let tx = ctx.services.transactions.get_by_session(&session_id).await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Expired);
}

/// Test a late completion still wins over an earlier expiry
#[actix_web::test]
async fn test_completion_after_expiry() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);
    let session_id = start_checkout!(app);

    for event_type in [
        "checkout.session.expired",
        "checkout.session.completed",
        "checkout.session.expired",
    ] {
        let req = test::TestRequest::post()
            .uri("/api/webhook")
            .set_payload(TestDataFactory::webhook_event(event_type, &session_id))
            .to_request();
        assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;
    }

    let tx = ctx.services.transactions.get_by_session(&session_id).await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Completed);
}

/// Test events for unknown sessions and unhandled types are acknowledged
#[actix_web::test]
async fn test_unmatched_events_acknowledged() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let events = [
        TestDataFactory::webhook_event("checkout.session.completed", "cs_test_unknown"),
        TestDataFactory::webhook_event("payment_intent.succeeded", "pi_123"),
    ];

    for payload in events {
        let req = test::TestRequest::post()
            .uri("/api/webhook")
            .set_payload(payload)
            .to_request();
        let body = assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;
        assert_eq!(body["success"], true);
    }

    assert_eq!(count_rows(&ctx.pool, "payment_transactions").await, 0);
}

/// Test malformed payloads are rejected
#[actix_web::test]
async fn test_malformed_webhook_rejected() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/webhook")
        .set_payload("{\"type\": 42")
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::BAD_REQUEST).await;
    assert_error_message(&body, "Invalid webhook payload");
}

/// Test signed deliveries are accepted and unsigned or forged ones rejected
#[actix_web::test]
async fn test_webhook_signature_verification() {
    let ctx = TestContext::with_webhook_secret(WEBHOOK_SECRET).await;
    let app = test_app!(ctx);
    let session_id = start_checkout!(app);
    let payload = TestDataFactory::webhook_event("checkout.session.completed", &session_id);

    // Step 1: Missing header
    let req = test::TestRequest::post()
        .uri("/api/webhook")
        .set_payload(payload.clone())
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::BAD_REQUEST).await;
    assert_error_message(&body, "Missing Stripe-Signature header");

    // Step 2: Signed with the wrong secret
    let forged = sign_payload(&payload, "whsec_wrong", Utc::now().timestamp()).unwrap();
    let req = test::TestRequest::post()
        .uri("/api/webhook")
        .insert_header(("Stripe-Signature", forged))
        .set_payload(payload.clone())
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::BAD_REQUEST).await;
    assert_error_message(&body, "Invalid webhook signature");

    // Step 3: Replayed outside the tolerance window
    let stale = sign_payload(&payload, WEBHOOK_SECRET, Utc::now().timestamp() - 3_600).unwrap();
    let req = test::TestRequest::post()
        .uri("/api/webhook")
        .insert_header(("Stripe-Signature", stale))
        .set_payload(payload.clone())
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::BAD_REQUEST).await;
    assert_error_message(&body, "Signature timestamp outside tolerance");

    let tx = ctx.services.transactions.get_by_session(&session_id).await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Pending);

    // Step 4: Properly signed
    let signed = sign_payload(&payload, WEBHOOK_SECRET, Utc::now().timestamp()).unwrap();
    let req = test::TestRequest::post()
        .uri("/api/webhook")
        .insert_header(("Stripe-Signature", signed))
        .set_payload(payload)
        .to_request();
    assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;

    let tx = ctx.services.transactions.get_by_session(&session_id).await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Completed);
}
