use super::super::models::{NewUser, RegisterRequest, Role, User};
use super::super::repositories::UserRepository;
use super::password::{hash_password, verify_password};
use super::token_manager::TokenManager;
use crate::core::{AppError, Result};

/// Account registration, credential checks and token issuance
pub struct UserService {
    user_repo: UserRepository,
    tokens: TokenManager,
}

impl UserService {
    pub fn new(user_repo: UserRepository, tokens: TokenManager) -> Self {
        Self { user_repo, tokens }
    }

    /// Register a customer account and issue its first token
    pub async fn register(&self, request: RegisterRequest) -> Result<(User, String)> {
        let email = request.email.trim().to_lowercase();
        if email.is_empty() || request.password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }
        if !email.contains('@') {
            return Err(AppError::validation("Email address is invalid"));
        }

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let user = self
            .user_repo
            .create(&NewUser {
                email,
                password_hash: hash_password(&request.password)?,
                first_name: request.first_name.trim().to_string(),
                last_name: request.last_name.trim().to_string(),
                role: Role::Customer,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");

        let token = self.tokens.issue(&user)?;
        Ok((user, token))
    }

    /// Check an email/password pair
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        Ok(user)
    }

    /// Verify credentials and issue a token
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String)> {
        let user = self.verify_credentials(email, password).await?;
        let token = self.tokens.issue(&user)?;

        tracing::info!(user_id = user.id, role = %user.role, "User logged in");
        Ok((user, token))
    }

    /// Login restricted to admin accounts
    pub async fn admin_login(&self, username: &str, password: &str) -> Result<(User, String)> {
        let user = self
            .verify_credentials(username, password)
            .await
            .map_err(|_| AppError::unauthorized("Invalid credentials"))?;

        if !user.is_admin() {
            tracing::warn!(user_id = user.id, "Non-admin attempted admin login");
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let token = self.tokens.issue(&user)?;
        Ok((user, token))
    }

    /// Resolve the account behind a bearer token
    pub async fn user_from_token(&self, token: &str) -> Result<User> {
        let claims = self.tokens.verify(token)?;
        self.user_repo
            .find_by_id(claims.user_id()?)
            .await?
            .ok_or_else(|| AppError::unauthorized("User not found"))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        self.user_repo.find_by_id(id).await
    }

    /// Create the admin account unless one already exists
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<bool> {
        if self.user_repo.admin_exists().await? {
            return Ok(false);
        }

        let admin = self
            .user_repo
            .create(&NewUser {
                email: email.trim().to_lowercase(),
                password_hash: hash_password(password)?,
                first_name: "Admin".to_string(),
                last_name: "User".to_string(),
                role: Role::Admin,
            })
            .await?;

        tracing::info!(user_id = admin.id, email = %admin.email, "Seeded admin user");
        Ok(true)
    }
}
