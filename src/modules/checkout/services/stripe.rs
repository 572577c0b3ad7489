use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::gateway_trait::{CheckoutGateway, CheckoutSession, CheckoutSessionRequest};
use crate::config::StripeConfig;
use crate::core::error::{AppError, Result};

/// Stripe Checkout client
pub struct StripeGateway {
    client: Client,
    secret_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl StripeGateway {
    pub fn new(secret_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            secret_key: secret_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &StripeConfig) -> Result<Self> {
        Self::new(config.secret_key.clone(), config.base_url.clone())
    }

    /// Turn a non-2xx response into a gateway error carrying Stripe's message
    async fn error_from(response: reqwest::Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<StripeErrorBody>(&body)
            .ok()
            .and_then(|b| match (b.error.message, b.error.kind) {
                (Some(message), _) => Some(message),
                (None, Some(kind)) => Some(kind),
                (None, None) => None,
            })
            .unwrap_or(body);

        AppError::Gateway(format!("Stripe API error {}: {}", status.as_u16(), message))
    }

    async fn parse_session(response: reqwest::Response) -> Result<CheckoutSession> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        response
            .json::<CheckoutSession>()
            .await
            .map_err(|e| AppError::Gateway(format!("Failed to parse Stripe response: {}", e)))
    }
}

/// `GET` URL for one session; ids are limited to `[A-Za-z0-9_]`
fn session_url(base_url: &str, session_id: &str) -> Result<String> {
    let valid = !session_id.is_empty()
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(AppError::validation("Invalid checkout session id"));
    }

    Ok(format!("{}/v1/checkout/sessions/{}", base_url, session_id))
}

/// Form parameters for `POST /v1/checkout/sessions`
pub fn session_form_params(request: &CheckoutSessionRequest) -> Vec<(String, String)> {
    let mut params = vec![
        ("mode".to_string(), "payment".to_string()),
        ("payment_method_types[]".to_string(), "card".to_string()),
        (
            "line_items[0][price_data][currency]".to_string(),
            request.currency.code().to_string(),
        ),
        (
            "line_items[0][price_data][unit_amount]".to_string(),
            request.amount_cents.to_string(),
        ),
        (
            "line_items[0][price_data][product_data][name]".to_string(),
            request.product_name.clone(),
        ),
        ("line_items[0][quantity]".to_string(), "1".to_string()),
        ("success_url".to_string(), request.success_url.clone()),
        ("cancel_url".to_string(), request.cancel_url.clone()),
    ];

    if let Some(description) = request
        .product_description
        .as_ref()
        .filter(|d| !d.trim().is_empty())
    {
        params.push((
            "line_items[0][price_data][product_data][description]".to_string(),
            description.clone(),
        ));
    }

    if let Some(email) = request.customer_email.as_ref().filter(|e| !e.trim().is_empty()) {
        params.push(("customer_email".to_string(), email.clone()));
    }

    for (key, value) in &request.metadata {
        params.push((format!("metadata[{}]", key), value.clone()));
    }

    params
}

#[async_trait]
impl CheckoutGateway for StripeGateway {
    async fn create_session(&self, request: CheckoutSessionRequest) -> Result<CheckoutSession> {
        // https://docs.stripe.com/api/checkout/sessions/create
        let url = format!("{}/v1/checkout/sessions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&session_form_params(&request))
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Stripe API error: {}", e)))?;

        let session = Self::parse_session(response).await?;
        tracing::debug!(session_id = %session.id, "Stripe checkout session created");
        Ok(session)
    }

    async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSession> {
        let url = session_url(&self.base_url, session_id)?;

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Stripe API error: {}", e)))?;

        Self::parse_session(response).await
    }

    fn name(&self) -> &str {
        "stripe"
    }
}
