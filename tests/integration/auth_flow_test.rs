#[macro_use]
#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use helpers::*;
use serde_json::json;

fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "kaabo_session")
        .map(|c| c.into_owned())
        .expect("Expected a session cookie")
}

/// Test registration returns a token and hides the password hash
#[actix_web::test]
async fn test_register_issues_token() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);
    let email = TestDataFactory::random_email();

    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(TestDataFactory::register(&email, "s3cret-pass"))
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::CREATED).await;

    assert_eq!(body["message"], "User registered successfully");
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], email.as_str());
    assert_eq!(body["user"]["first_name"], "Ngozi");
    assert_eq!(body["user"]["role"], "customer");
    assert!(body["user"].get("password_hash").is_none());

    // Same email again
    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(TestDataFactory::register(&email.to_uppercase(), "other-pass"))
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::CONFLICT).await;
    assert_error_message(&body, "Email already registered");
}

/// Test registration input validation
#[actix_web::test]
async fn test_register_validation() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({ "email": "", "password": "" }))
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::BAD_REQUEST).await;
    assert_error_message(&body, "Email and password are required");

    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(TestDataFactory::register("not-an-email", "pw"))
        .to_request();
    assert_status_json(test::call_service(&app, req).await, StatusCode::BAD_REQUEST).await;
}

/// Test login establishes a cookie session that logout clears
#[actix_web::test]
async fn test_login_session_lifecycle() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    // Step 1: Anonymous
    let req = test::TestRequest::get().uri("/api/check-auth").to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["authenticated"], false);

    // Step 2: Login
    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = session_cookie(&resp);
    let body = assert_status_json(resp, StatusCode::OK).await;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["role"], "admin");

    // Step 3: Cookie alone authenticates
    let req = test::TestRequest::get()
        .uri("/api/check-auth")
        .cookie(cookie.clone())
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);

    let req = test::TestRequest::get()
        .uri("/api/bookings")
        .cookie(cookie.clone())
        .to_request();
    assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;

    // Step 4: Logout replaces the cookie with an empty one
    let req = test::TestRequest::post()
        .uri("/api/logout")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cleared = session_cookie(&resp);
    assert!(cleared.value().is_empty());
    let body = assert_status_json(resp, StatusCode::OK).await;
    assert_eq!(body["message"], "Logged out successfully");

    let req = test::TestRequest::get()
        .uri("/api/check-auth")
        .cookie(cleared)
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["authenticated"], false);
}

/// Test wrong passwords are rejected
#[actix_web::test]
async fn test_login_wrong_password() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": ADMIN_EMAIL, "password": "nope" }))
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::UNAUTHORIZED).await;
    assert_error_message(&body, "Invalid email or password");
}

/// Test bearer and basic credentials on a protected route
#[actix_web::test]
async fn test_me_with_bearer_and_basic() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);
    let email = TestDataFactory::random_email();
    let (user, token) = ctx.customer(&email).await;

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(bearer(&token))
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["user"]["id"], user.id);

    let basic = STANDARD.encode(format!("{}:customer-pass", email));
    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(("Authorization", format!("Basic {}", basic)))
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["user"]["email"], email.as_str());

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(bearer("not.a.jwt"))
        .to_request();
    assert_status_json(test::call_service(&app, req).await, StatusCode::UNAUTHORIZED).await;

    let req = test::TestRequest::get().uri("/api/me").to_request();
    assert_status_json(test::call_service(&app, req).await, StatusCode::UNAUTHORIZED).await;
}

/// Test the admin panel login response shapes
#[actix_web::test]
async fn test_admin_login() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    // Admin
    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "username": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["success"], true);
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/admin/packages")
        .insert_header(bearer(&token))
        .to_request();
    assert_status_json(test::call_service(&app, req).await, StatusCode::OK).await;

    // Customer credentials are not enough
    let email = TestDataFactory::random_email();
    ctx.customer(&email).await;
    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "username": email, "password": "customer-pass" }))
        .to_request();
    let body = assert_status_json(test::call_service(&app, req).await, StatusCode::UNAUTHORIZED).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid credentials");
}

/// Test the admin is seeded once
#[actix_web::test]
async fn test_admin_seeded_once() {
    let ctx = TestContext::new().await;

    let created = ctx
        .services
        .users
        .ensure_admin("second-admin@kaabo.com", "pw")
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(count_rows(&ctx.pool, "users").await, 1);
}
