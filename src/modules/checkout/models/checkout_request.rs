use serde::{Deserialize, Serialize};

use crate::modules::packages::Occupancy;

/// POST /api/create-checkout-session body.
///
/// Accepts both the snake_case names and the camelCase names the booking
/// front end sends.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCheckoutRequest {
    #[serde(default, alias = "packageId")]
    pub package_id: Option<String>,

    #[serde(default)]
    pub occupancy: Option<Occupancy>,

    #[serde(default, alias = "visitorCount")]
    pub visitor_count: Option<i64>,

    #[serde(default, alias = "packageTitle")]
    pub package_title: Option<String>,

    #[serde(default, alias = "amountCents", alias = "amountInCents")]
    pub amount_cents: Option<i64>,

    #[serde(default, alias = "successUrl")]
    pub success_url: Option<String>,

    #[serde(default, alias = "cancelUrl")]
    pub cancel_url: Option<String>,

    #[serde(default, alias = "customerEmail")]
    pub email: Option<String>,

    #[serde(default, alias = "firstName")]
    pub first_name: Option<String>,

    #[serde(default, alias = "lastName")]
    pub last_name: Option<String>,

    #[serde(default, alias = "customerName")]
    pub customer_name: Option<String>,

    #[serde(default, alias = "customerPhone")]
    pub phone: Option<String>,
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl CreateCheckoutRequest {
    /// First and last name, falling back to splitting `customer_name` on its first space
    pub fn contact_names(&self) -> (Option<String>, Option<String>) {
        let first = non_blank(self.first_name.as_ref());
        let last = non_blank(self.last_name.as_ref());
        if first.is_some() || last.is_some() {
            return (first, last);
        }

        match non_blank(self.customer_name.as_ref()) {
            Some(full) => match full.split_once(' ') {
                Some((first, last)) => (
                    Some(first.to_string()),
                    Some(last.trim().to_string()).filter(|l| !l.is_empty()),
                ),
                None => (Some(full), None),
            },
            None => (None, None),
        }
    }

    pub fn contact_email(&self) -> Option<String> {
        non_blank(self.email.as_ref())
    }

    pub fn contact_phone(&self) -> Option<String> {
        non_blank(self.phone.as_ref())
    }
}

/// Checkout creation response; `checkoutUrl` duplicates `checkout_url` for older clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub checkout_url: Option<String>,
    #[serde(rename = "checkoutUrl")]
    pub checkout_url_camel: Option<String>,
    pub session_id: String,
}

impl CheckoutResponse {
    pub fn new(session_id: String, url: Option<String>) -> Self {
        Self {
            checkout_url: url.clone(),
            checkout_url_camel: url,
            session_id,
        }
    }
}

/// GET /api/verify-payment/{session_id} response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
}

impl VerifyPaymentResponse {
    pub fn paid() -> Self {
        Self {
            success: true,
            message: "Payment completed successfully".to_string(),
        }
    }

    pub fn not_paid(payment_status: &str) -> Self {
        Self {
            success: false,
            message: format!("Payment not completed. Status: {}", payment_status),
        }
    }
}
