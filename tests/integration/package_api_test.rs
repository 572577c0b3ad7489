#[macro_use]
#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::http::StatusCode;
use actix_web::test;
use helpers::*;
use serde_json::json;

/// Test the seeded catalog is listed in order
#[actix_web::test]
async fn test_seeded_packages_listed() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/packages").to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;

    let packages = body["packages"].as_array().unwrap();
    assert_eq!(packages.len(), 6);
    assert_eq!(packages[0]["package_id"], "summer-tech");
    assert_eq!(packages[0]["single_price"], 240_000);
    assert_eq!(packages[0]["double_price"], 190_000);
}

/// Test seeding twice leaves the catalog unchanged
#[actix_web::test]
async fn test_seeding_is_idempotent() {
    let ctx = TestContext::new().await;

    let inserted = ctx.services.packages.seed_default_packages().await.unwrap();
    assert_eq!(inserted, 0);
    assert_eq!(count_rows(&ctx.pool, "packages").await, 6);
}

/// Test fetching a single package and an unknown one
#[actix_web::test]
async fn test_get_package_by_slug() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/packages/detty-december")
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["title"], "DETTY DECEMBER");

    let req = test::TestRequest::get()
        .uri("/api/packages/no-such-trip")
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::NOT_FOUND).await;
    assert_eq!(body["error"]["message"], "Package not found");
}

/// Test package creation requires an admin
#[actix_web::test]
async fn test_create_package_requires_admin() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);
    let payload = TestDataFactory::new_package("abuja-weekend");

    // Anonymous
    let req = test::TestRequest::post()
        .uri("/api/packages")
        .set_json(&payload)
        .to_request();
    assert_status_json(test::call_service(&app, req).await, StatusCode::UNAUTHORIZED).await;

    // Customer
    let (_, token) = ctx.customer(&TestDataFactory::random_email()).await;
    let req = test::TestRequest::post()
        .uri("/api/packages")
        .insert_header(bearer(&token))
        .set_json(&payload)
        .to_request();
    assert_status_json(test::call_service(&app, req).await, StatusCode::FORBIDDEN).await;

    assert_eq!(count_rows(&ctx.pool, "packages").await, 6);
}

/// Test admin creates, edits and deletes a package
#[actix_web::test]
async fn test_admin_package_lifecycle() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);
    let token = ctx.admin_token().await;

    // Step 1: Create
    let req = test::TestRequest::post()
        .uri("/api/packages")
        .insert_header(bearer(&token))
        .set_json(TestDataFactory::new_package("Abuja-Weekend"))
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(body["package"]["package_id"], "abuja-weekend");
    assert_eq!(body["package"]["single_price"], 150_000);
    assert_eq!(body["package"]["double_price"], 120_000);

    // Step 2: Same slug again
    let req = test::TestRequest::post()
        .uri("/api/packages")
        .insert_header(bearer(&token))
        .set_json(TestDataFactory::new_package("abuja-weekend"))
        .to_request();
    assert_status_json(test::call_service(&app, req).await, StatusCode::CONFLICT).await;

    // Step 3: Partial update keeps other fields
    let req = test::TestRequest::put()
        .uri("/api/packages/abuja-weekend")
        .insert_header(bearer(&token))
        .set_json(json!({ "date": "DECEMBER 5TH - 7TH, 2025" }))
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["package"]["date"], "DECEMBER 5TH - 7TH, 2025");
    assert_eq!(body["package"]["title"], "ABUJA WEEKEND");

    // Step 4: Delete
    let req = test::TestRequest::delete()
        .uri("/api/packages/abuja-weekend")
        .insert_header(bearer(&token))
        .to_request();
    assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;

    let req = test::TestRequest::delete()
        .uri("/api/packages/abuja-weekend")
        .insert_header(bearer(&token))
        .to_request();
    assert_status_json(test::call_service(&app, req).await, StatusCode::NOT_FOUND).await;
}

/// Test missing fields are rejected
#[actix_web::test]
async fn test_create_package_missing_fields() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);
    let token = ctx.admin_token().await;

    let req = test::TestRequest::post()
        .uri("/api/packages")
        .insert_header(bearer(&token))
        .set_json(json!({ "package_id": "half-done", "title": "HALF DONE" }))
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::BAD_REQUEST).await;
    assert_error_message(&body, "Missing required fields");
}

/// Test the admin panel price form with display-formatted prices
#[actix_web::test]
async fn test_admin_price_update() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);
    let token = ctx.admin_token().await;

    let req = test::TestRequest::put()
        .uri("/api/admin/packages/fashion-week")
        .insert_header(bearer(&token))
        .set_json(json!({ "singlePrice": "3,750", "doublePrice": "$2,999.50" }))
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["package"]["single_price"], 375_000);
    assert_eq!(body["package"]["double_price"], 299_950);

    let req = test::TestRequest::put()
        .uri("/api/admin/packages/fashion-week")
        .insert_header(bearer(&token))
        .set_json(json!({ "singlePrice": "0" }))
        .to_request();
    assert_status_json(test::call_service(&app, req).await, StatusCode::BAD_REQUEST).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/packages")
        .insert_header(bearer(&token))
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;
    let fashion = body["packages"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["package_id"] == "fashion-week")
        .cloned()
        .unwrap();
    assert_eq!(fashion["single_price"], 375_000);
}

/// Test malformed JSON is reported as a client error
#[actix_web::test]
async fn test_malformed_json_rejected() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);
    let token = ctx.admin_token().await;

    let req = test::TestRequest::post()
        .uri("/api/packages")
        .insert_header(bearer(&token))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::BAD_REQUEST).await;
    assert_error_message(&body, "Invalid JSON payload");
}
