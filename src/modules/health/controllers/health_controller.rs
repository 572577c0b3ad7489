use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;

use crate::modules::transactions::TransactionService;

/// Liveness body
#[derive(Debug, Serialize, Deserialize)]
pub struct LivenessStatus {
    pub status: String,
    pub version: String,
    pub checked_at: DateTime<Utc>,
}

/// Readiness body; `booking_store` names the configured backend
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessStatus {
    pub ready: bool,
    pub database: bool,
    pub booking_store: Option<String>,
}

/// GET /
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "message": "Kaabo booking API is running",
    }))
}

/// GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(LivenessStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checked_at: Utc::now(),
    })
}

/// GET /ready - 503 until the database answers
pub async fn readiness_check(
    pool: web::Data<SqlitePool>,
    transactions: Option<web::Data<Arc<TransactionService>>>,
) -> HttpResponse {
    let database = match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!(error = %e, "Database readiness check failed");
            false
        }
    };

    let status = ReadinessStatus {
        ready: database,
        database,
        booking_store: transactions.map(|t| t.backend().to_string()),
    };

    if status.ready {
        HttpResponse::Ok().json(status)
    } else {
        HttpResponse::ServiceUnavailable().json(status)
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
