use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::core::error::AppError;
use crate::modules::transactions::services::{WebhookHandler, WebhookOutcome};

/// Header carrying the provider's HMAC signature
pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Receive a provider event
/// POST /api/webhook and POST /webhook
///
/// The raw body is taken as bytes so the signature is checked against exactly
/// what was sent.
pub async fn receive_webhook(
    handler: web::Data<Arc<WebhookHandler>>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    match handler.handle(&body, signature).await? {
        WebhookOutcome::Completed {
            session_id,
            matched,
        } => info!(session_id = %session_id, matched, "Checkout session completed"),
        WebhookOutcome::Expired {
            session_id,
            matched,
        } => info!(session_id = %session_id, matched, "Checkout session expired"),
        WebhookOutcome::Ignored { .. } => {}
    }

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Configure the webhook route; mounted both inside `/api` and at the root
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/webhook", web::post().to(receive_webhook));
}
