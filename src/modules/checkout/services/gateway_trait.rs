use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{Currency, Result};

/// Hosted checkout provider
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Create a hosted checkout session and return its id and redirect URL
    async fn create_session(&self, request: CheckoutSessionRequest) -> Result<CheckoutSession>;

    /// Fetch the current state of a session
    async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSession>;

    /// Get gateway name
    fn name(&self) -> &str;
}

/// A single-line-item payment request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    /// Total charged, in the currency's minor unit
    pub amount_cents: i64,

    pub currency: Currency,

    /// Line item name shown on the hosted page
    pub product_name: String,

    pub product_description: Option<String>,

    pub success_url: String,

    pub cancel_url: String,

    /// Prefills the hosted page's email field
    pub customer_email: Option<String>,

    /// Echoed back by the provider on the session object
    pub metadata: BTreeMap<String, String>,
}

/// Provider-side view of a checkout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,

    /// Hosted page URL; only present while the session is open
    pub url: Option<String>,

    /// `paid`, `unpaid` or `no_payment_required`
    pub payment_status: String,

    /// `open`, `complete` or `expired`
    #[serde(default)]
    pub status: Option<String>,
}

impl CheckoutSession {
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }
}
