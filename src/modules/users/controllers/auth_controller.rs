use std::sync::Arc;

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::core::error::AppError;
use crate::middleware::auth::{AuthenticatedUser, SESSION_USER_KEY};
use crate::modules::users::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::modules::users::services::UserService;

/// Admin panel login body
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default, alias = "email")]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn remember(session: &Session, user_id: i64) -> Result<(), AppError> {
    session.renew();
    session
        .insert(SESSION_USER_KEY, user_id)
        .map_err(|e| AppError::internal(format!("Failed to store session: {}", e)))
}

/// POST /api/register
pub async fn register(
    service: web::Data<Arc<UserService>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let (user, token) = service.register(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "User registered successfully".to_string(),
        token,
        user,
    }))
}

/// POST /api/login
pub async fn login(
    service: web::Data<Arc<UserService>>,
    session: Session,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let (user, token) = service.login(&request.email, &request.password).await?;
    remember(&session, user.id)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user,
    }))
}

/// Admin panel login; failures use the panel's `{"success": false}` shape
/// POST /api/admin/login
pub async fn admin_login(
    service: web::Data<Arc<UserService>>,
    session: Session,
    request: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();

    match service.admin_login(&request.username, &request.password).await {
        Ok((user, token)) => {
            remember(&session, user.id)?;
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "message": "Login successful",
                "token": token,
            })))
        }
        Err(AppError::Unauthorized(_)) => Ok(HttpResponse::Unauthorized().json(json!({
            "success": false,
            "message": "Invalid credentials",
        }))),
        Err(e) => Err(e),
    }
}

/// POST /api/logout
pub async fn logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(json!({ "message": "Logged out successfully" }))
}

/// GET /api/check-auth
pub async fn check_auth(user: Option<AuthenticatedUser>) -> HttpResponse {
    match user {
        Some(AuthenticatedUser(user)) => HttpResponse::Ok().json(json!({
            "authenticated": true,
            "user": user,
        })),
        None => HttpResponse::Ok().json(json!({ "authenticated": false })),
    }
}

/// GET /api/me
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "user": user.0 }))
}

/// Configure auth routes (mounted inside `/api`)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/admin/login", web::post().to(admin_login))
        .route("/logout", web::post().to(logout))
        .route("/check-auth", web::get().to(check_auth))
        .route("/me", web::get().to(me));
}
