use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::transaction_service::TransactionService;
use crate::core::{AppError, Result};
use crate::modules::checkout::services::webhook_signature::{
    verify_signature, DEFAULT_TOLERANCE_SECS,
};

/// Provider event envelope
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventData {
    pub object: Value,
}

impl WebhookEvent {
    /// Checkout session id carried by `checkout.session.*` events
    pub fn session_id(&self) -> Result<&str> {
        self.data
            .object
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::validation("Event object has no session id"))
    }
}

/// What a webhook delivery did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    Completed { session_id: String, matched: bool },
    Expired { session_id: String, matched: bool },
    Ignored { event_type: String },
}

/// Applies provider events to stored bookings
pub struct WebhookHandler {
    transactions: Arc<TransactionService>,
    signing_secret: Option<String>,
}

impl WebhookHandler {
    /// Signatures are only checked when `signing_secret` is set
    pub fn new(transactions: Arc<TransactionService>, signing_secret: Option<String>) -> Self {
        Self {
            transactions,
            signing_secret: signing_secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn verifies_signatures(&self) -> bool {
        self.signing_secret.is_some()
    }

    /// Verify, parse and apply one delivery
    pub async fn handle(&self, payload: &[u8], signature: Option<&str>) -> Result<WebhookOutcome> {
        if let Some(secret) = &self.signing_secret {
            let header = signature
                .ok_or_else(|| AppError::validation("Missing Stripe-Signature header"))?;
            verify_signature(
                header,
                payload,
                secret,
                DEFAULT_TOLERANCE_SECS,
                Utc::now().timestamp(),
            )?;
        }

        let event: WebhookEvent = serde_json::from_slice(payload)
            .map_err(|e| AppError::validation(format!("Invalid webhook payload: {}", e)))?;

        info!(event_id = %event.id, event_type = %event.event_type, "Received webhook event");

        match event.event_type.as_str() {
            "checkout.session.completed" => {
                let session_id = event.session_id()?.to_string();
                let matched = self
                    .transactions
                    .mark_completed(&session_id)
                    .await?
                    .is_some();
                Ok(WebhookOutcome::Completed {
                    session_id,
                    matched,
                })
            }
            "checkout.session.expired" => {
                let session_id = event.session_id()?.to_string();
                let matched = self
                    .transactions
                    .mark_expired(&session_id)
                    .await?
                    .is_some();
                Ok(WebhookOutcome::Expired {
                    session_id,
                    matched,
                })
            }
            other => {
                warn!(event_type = %other, "Ignoring unhandled webhook event");
                Ok(WebhookOutcome::Ignored {
                    event_type: other.to_string(),
                })
            }
        }
    }
}
