use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kaabo::config::{database::run_migrations, Config, ServerConfig};
use kaabo::middleware::{ErrorLogger, RateLimiter, RequestId};
use kaabo::modules::checkout::{CheckoutGateway, StripeGateway};
use kaabo::startup::{build_store, session_middleware, AppServices, ServiceSettings};

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "kaabo={},actix_web=info,sqlx=warn",
            config.app.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.app.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors(server: &ServerConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .allowed_header("Stripe-Signature")
        .allowed_header("X-Request-ID")
        .expose_headers(vec!["X-Request-ID"])
        .max_age(3600);

    if server.allows_any_origin() {
        return cors.allow_any_origin();
    }

    server
        .cors_allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
        .supports_credentials()
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    init_tracing(&config);

    tracing::info!(
        env = %config.app.env,
        bind = %config.server.bind_address(),
        "Starting Kaabo booking API"
    );

    let pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to apply database schema")?;

    tracing::info!(
        max_connections = config.database.max_connections,
        "Database pool initialized"
    );

    let store = build_store(&config.storage, &pool)
        .await
        .context("Failed to open booking store")?;
    let gateway: Arc<dyn CheckoutGateway> = Arc::new(
        StripeGateway::from_config(&config.stripe).context("Failed to create Stripe client")?,
    );

    if config.stripe.webhook_secret.is_none() {
        tracing::warn!("STRIPE_WEBHOOK_SECRET not set; webhook signatures will not be verified");
    }

    let services = AppServices::new(pool, store, gateway, ServiceSettings::from(&config));
    services
        .bootstrap(&config.seed)
        .await
        .context("Failed to seed initial data")?;

    let rate_limiter = RateLimiter::new(config.security.rate_limit_per_minute);
    let server_config = config.server.clone();
    let session_secret = config.security.jwt_secret.clone();
    let secure_cookies = config.app.is_production();
    let bind_address = config.server.bind_address();

    let server = HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(session_middleware(&session_secret, secure_cookies))
            .wrap(ErrorLogger)
            .wrap(rate_limiter.clone())
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .wrap(cors(&server_config))
            .configure(|cfg| services.configure(cfg))
    })
    .workers(config.server.workers.max(1))
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("Server error")?;
    Ok(())
}
