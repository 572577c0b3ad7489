#[macro_use]
#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::http::StatusCode;
use actix_web::test;
use helpers::*;
use kaabo::modules::transactions::{
    JsonFileTransactionStore, PaymentTransaction, TransactionStatus, TransactionStore,
};

/// Test the full booking flow against the JSON file store
#[actix_web::test]
async fn test_checkout_and_webhook_with_json_store() {
    let ctx = TestContext::with_json_store().await;
    let app = test_app!(ctx);
    assert_eq!(ctx.services.transactions.backend(), "json");

    // Step 1: Create checkout
    let req = test::TestRequest::post()
        .uri("/api/create-checkout-session")
        .set_json(TestDataFactory::custom_checkout("FASHION WEEK", 350_000, 2))
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;
    let session_id = body["session_id"].as_str().unwrap().to_string();

    // Step 2: Complete via webhook
    let req = test::TestRequest::post()
        .uri("/api/webhook")
        .set_payload(TestDataFactory::webhook_event(
            "checkout.session.completed",
            &session_id,
        ))
        .to_request();
    assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;

    // Step 3: File on disk reflects the booking
    let path = ctx.bookings_dir.as_ref().unwrap().path().join("bookings.json");
    let raw = std::fs::read_to_string(&path).unwrap();
    let stored: Vec<PaymentTransaction> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].session_id, session_id);
    assert_eq!(stored[0].status, TransactionStatus::Completed);
    assert_eq!(stored[0].visitor_count, 2);

    // Step 4: A fresh store sees the same data
    let reopened = JsonFileTransactionStore::open(path.clone()).await.unwrap();
    let tx = reopened.find_by_session_id(&session_id).await.unwrap().unwrap();
    assert_eq!(tx.amount_cents, 350_000);

    // Nothing went to the SQL table
    assert_eq!(count_rows(&ctx.pool, "payment_transactions").await, 0);
}

/// Test admin endpoints read from the JSON store
#[actix_web::test]
async fn test_bookings_listed_from_json_store() {
    let ctx = TestContext::with_json_store().await;
    let app = test_app!(ctx);
    let admin = ctx.admin_token().await;

    for package in ["summer-tech", "october-tech"] {
        let req = test::TestRequest::post()
            .uri("/api/create-checkout-session")
            .set_json(TestDataFactory::package_checkout(package, "double", 1))
            .to_request();
        assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;
    }

    let req = test::TestRequest::get()
        .uri("/api/bookings")
        .insert_header(bearer(&admin))
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;
    let bookings = body.as_array().unwrap();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0]["package_id"], "october-tech");
    assert_eq!(bookings[1]["amount_cents"], 190_000);
}
