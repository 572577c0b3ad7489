use std::sync::Arc;

use actix_session::SessionExt;
use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures_util::future::LocalBoxFuture;

use crate::core::{AppError, Result};
use crate::modules::users::{User, UserService};

/// Session key holding the logged-in user's id
pub const SESSION_USER_KEY: &str = "user_id";

/// Any logged-in user.
///
/// Credentials are taken from, in order: `Authorization: Bearer <jwt>`,
/// `Authorization: Basic <email:password>`, then the session cookie.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// A logged-in user with the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

enum Credentials {
    Bearer(String),
    Basic { email: String, password: String },
}

fn parse_authorization(req: &HttpRequest) -> Result<Option<Credentials>> {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AppError::unauthorized("Invalid authorization header"))?;

    if let Some(token) = value.strip_prefix("Bearer ") {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::unauthorized("Token is missing"));
        }
        return Ok(Some(Credentials::Bearer(token.to_string())));
    }

    if let Some(encoded) = value.strip_prefix("Basic ") {
        let decoded = STANDARD
            .decode(encoded.trim())
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or_else(|| AppError::unauthorized("Invalid basic credentials"))?;
        let (email, password) = decoded
            .split_once(':')
            .ok_or_else(|| AppError::unauthorized("Invalid basic credentials"))?;
        return Ok(Some(Credentials::Basic {
            email: email.to_string(),
            password: password.to_string(),
        }));
    }

    Err(AppError::unauthorized("Unsupported authorization scheme"))
}

/// Resolve the user behind the request's credentials
pub async fn resolve_user(req: &HttpRequest) -> Result<User> {
    let users = req
        .app_data::<web::Data<Arc<UserService>>>()
        .ok_or_else(|| AppError::internal("User service not configured"))?
        .clone();

    match parse_authorization(req)? {
        Some(Credentials::Bearer(token)) => users.user_from_token(&token).await,
        Some(Credentials::Basic { email, password }) => users
            .verify_credentials(&email, &password)
            .await
            .map_err(|_| AppError::unauthorized("Invalid credentials")),
        None => {
            let user_id = req
                .get_session()
                .get::<i64>(SESSION_USER_KEY)
                .map_err(|_| AppError::unauthorized("Invalid session"))?
                .ok_or_else(|| AppError::unauthorized("Token is missing"))?;

            users
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| AppError::unauthorized("User not found"))
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { resolve_user(&req).await.map(AuthenticatedUser) })
    }
}

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let user = resolve_user(&req).await?;
            if !user.is_admin() {
                tracing::warn!(user_id = user.id, path = %req.path(), "Admin route denied");
                return Err(AppError::forbidden("Admin privileges required"));
            }
            Ok(AdminUser(user))
        })
    }
}
