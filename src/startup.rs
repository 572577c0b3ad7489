//! Service wiring and route registration shared by the binary and the tests

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::web;
use sqlx::SqlitePool;

use crate::config::{BookingStoreKind, Config, SeedConfig, StorageConfig};
use crate::core::Result;
use crate::middleware::json_error_handler;
use crate::modules::checkout::{self, CheckoutGateway, CheckoutService, CheckoutSettings};
use crate::modules::health;
use crate::modules::packages::repositories::PackageRepository;
use crate::modules::packages::{self, PackageService};
use crate::modules::transactions::controllers::webhook_controller;
use crate::modules::transactions::{
    self, JsonFileTransactionStore, SqlTransactionRepository, TransactionService,
    TransactionStore, WebhookHandler,
};
use crate::modules::users::repositories::UserRepository;
use crate::modules::users::{self, TokenManager, UserService};

/// Settings the services need beyond their collaborators
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub checkout: CheckoutSettings,
    pub webhook_secret: Option<String>,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
}

impl From<&Config> for ServiceSettings {
    fn from(config: &Config) -> Self {
        Self {
            checkout: CheckoutSettings::from(&config.stripe),
            webhook_secret: config.stripe.webhook_secret.clone(),
            jwt_secret: config.security.jwt_secret.clone(),
            jwt_expiry_hours: config.security.jwt_expiry_hours,
        }
    }
}

/// Open the booking store selected by configuration
pub async fn build_store(
    storage: &StorageConfig,
    pool: &SqlitePool,
) -> Result<Arc<dyn TransactionStore>> {
    let store: Arc<dyn TransactionStore> = match storage.booking_store {
        BookingStoreKind::Sql => Arc::new(SqlTransactionRepository::new(pool.clone())),
        BookingStoreKind::Json => {
            let store = JsonFileTransactionStore::open(storage.bookings_file.clone()).await?;
            tracing::info!(path = %store.path().display(), "Using booking file");
            Arc::new(store)
        }
    };

    tracing::info!(backend = store.backend(), "Booking store ready");
    Ok(store)
}

/// Cookie-backed sessions signed and encrypted with a key derived from `secret`
pub fn session_middleware(secret: &str, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::derive_from(secret.as_bytes()))
        .cookie_name("kaabo_session".to_string())
        .cookie_secure(secure)
        .cookie_http_only(true)
        .build()
}

/// Every service, shared across workers
#[derive(Clone)]
pub struct AppServices {
    pub pool: SqlitePool,
    pub packages: Arc<PackageService>,
    pub transactions: Arc<TransactionService>,
    pub checkout: Arc<CheckoutService>,
    pub users: Arc<UserService>,
    pub webhooks: Arc<WebhookHandler>,
}

impl AppServices {
    pub fn new(
        pool: SqlitePool,
        store: Arc<dyn TransactionStore>,
        gateway: Arc<dyn CheckoutGateway>,
        settings: ServiceSettings,
    ) -> Self {
        let packages = Arc::new(PackageService::new(PackageRepository::new(pool.clone())));
        let transactions = Arc::new(TransactionService::new(store));
        let checkout = Arc::new(CheckoutService::new(
            gateway,
            packages.clone(),
            transactions.clone(),
            settings.checkout,
        ));
        let users = Arc::new(UserService::new(
            UserRepository::new(pool.clone()),
            TokenManager::new(&settings.jwt_secret, settings.jwt_expiry_hours),
        ));
        let webhooks = Arc::new(WebhookHandler::new(
            transactions.clone(),
            settings.webhook_secret,
        ));

        Self {
            pool,
            packages,
            transactions,
            checkout,
            users,
            webhooks,
        }
    }

    /// Seed the admin account and the default catalog
    pub async fn bootstrap(&self, seed: &SeedConfig) -> Result<()> {
        self.users
            .ensure_admin(&seed.admin_email, &seed.admin_password)
            .await?;
        self.packages.seed_default_packages().await?;
        Ok(())
    }

    /// Register shared state and every route
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.pool.clone()))
            .app_data(web::Data::new(self.packages.clone()))
            .app_data(web::Data::new(self.transactions.clone()))
            .app_data(web::Data::new(self.checkout.clone()))
            .app_data(web::Data::new(self.users.clone()))
            .app_data(web::Data::new(self.webhooks.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .configure(health::controllers::configure)
            .configure(webhook_controller::configure)
            .service(
                web::scope("/api")
                    .configure(users::controllers::configure)
                    .configure(packages::controllers::configure)
                    .configure(checkout::controllers::configure)
                    .configure(transactions::controllers::configure)
                    .configure(webhook_controller::configure),
            );
    }
}
