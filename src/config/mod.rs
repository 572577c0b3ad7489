use crate::core::{AppError, Currency, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub stripe: StripeConfig,
    pub security: SecurityConfig,
    pub storage: StorageConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    /// Signing secret for `Stripe-Signature`; verification is skipped when unset
    pub webhook_secret: Option<String>,
    pub base_url: String,
    pub success_url: String,
    pub cancel_url: String,
    pub default_currency: Currency,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// HS256 secret for bearer tokens, also the master key for session cookies
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub rate_limit_per_minute: u32,
}

/// Where booking records live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStoreKind {
    Sql,
    Json,
}

impl FromStr for BookingStoreKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sql" | "sqlite" => Ok(BookingStoreKind::Sql),
            "json" | "file" => Ok(BookingStoreKind::Json),
            other => Err(format!("Unknown booking store: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub booking_store: BookingStoreKind,
    pub bookings_file: PathBuf,
}

/// Credentials of the admin account created on first start
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub admin_email: String,
    pub admin_password: String,
}

pub(crate) fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub(crate) fn parse_env<T: FromStr>(key: &str, default: &str) -> Result<T> {
    env_or(key, default)
        .parse()
        .map_err(|_| AppError::Configuration(format!("Invalid {}", key)))
}

fn require_env(key: &str) -> Result<String> {
    env::var(key).map_err(|_| AppError::Configuration(format!("{} not set", key)))
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let jwt_secret = require_env("JWT_SECRET").or_else(|_| require_env("SESSION_SECRET"))?;

        let config = Config {
            app: AppConfig {
                env: env_or("APP_ENV", "development"),
                log_level: env_or("LOG_LEVEL", "info"),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            stripe: StripeConfig {
                secret_key: require_env("STRIPE_SECRET_KEY")?,
                webhook_secret: env::var("STRIPE_WEBHOOK_SECRET")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                base_url: env_or("STRIPE_BASE_URL", "https://api.stripe.com"),
                success_url: env_or(
                    "CHECKOUT_SUCCESS_URL",
                    "http://localhost:5173/enroll/summary?session_id={CHECKOUT_SESSION_ID}",
                ),
                cancel_url: env_or("CHECKOUT_CANCEL_URL", "http://localhost:5173/enroll/summary"),
                default_currency: env_or("DEFAULT_CURRENCY", "usd")
                    .parse()
                    .map_err(AppError::Configuration)?,
            },
            security: SecurityConfig {
                jwt_secret,
                jwt_expiry_hours: parse_env("JWT_EXPIRY_HOURS", "24")?,
                rate_limit_per_minute: parse_env("RATE_LIMIT_PER_MINUTE", "1000")?,
            },
            storage: StorageConfig {
                booking_store: env_or("BOOKING_STORE", "sql")
                    .parse()
                    .map_err(AppError::Configuration)?,
                bookings_file: PathBuf::from(env_or("BOOKINGS_FILE", "bookings.json")),
            },
            seed: SeedConfig {
                admin_email: env_or("ADMIN_EMAIL", "admin@kaabo.com"),
                admin_password: env_or("ADMIN_PASSWORD", "admin123"),
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.security.rate_limit_per_minute == 0 {
            return Err(AppError::Configuration(
                "Rate limit must be greater than 0".to_string(),
            ));
        }

        if self.security.jwt_expiry_hours <= 0 {
            return Err(AppError::Configuration(
                "JWT expiry hours must be greater than 0".to_string(),
            ));
        }

        // cookie key derivation needs at least 32 bytes of master key
        if self.security.jwt_secret.len() < 32 {
            return Err(AppError::Configuration(
                "JWT_SECRET must be at least 32 bytes".to_string(),
            ));
        }

        if self.stripe.secret_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "STRIPE_SECRET_KEY cannot be empty".to_string(),
            ));
        }

        if self.seed.admin_password.is_empty() {
            return Err(AppError::Configuration(
                "ADMIN_PASSWORD cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
