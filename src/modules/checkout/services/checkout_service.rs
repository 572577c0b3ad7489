use std::collections::BTreeMap;
use std::sync::Arc;

use super::super::models::{CheckoutResponse, CreateCheckoutRequest, VerifyPaymentResponse};
use super::gateway_trait::{CheckoutGateway, CheckoutSessionRequest};
use crate::config::StripeConfig;
use crate::core::{AppError, Currency, Result};
use crate::modules::packages::PackageService;
use crate::modules::transactions::models::NewTransaction;
use crate::modules::transactions::TransactionService;
use crate::modules::users::User;

const PRODUCT_DESCRIPTION: &str = "Nigerian Experience Package";

/// Checkout defaults taken from configuration
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub success_url: String,
    pub cancel_url: String,
    pub default_currency: Currency,
}

impl From<&StripeConfig> for CheckoutSettings {
    fn from(config: &StripeConfig) -> Self {
        Self {
            success_url: config.success_url.clone(),
            cancel_url: config.cancel_url.clone(),
            default_currency: config.default_currency,
        }
    }
}

/// What is being bought, resolved before talking to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
struct PricedBooking {
    package_id: Option<String>,
    title: String,
    amount_cents: i64,
    currency: Currency,
    visitor_count: i64,
}

fn product_name(title: &str, visitor_count: i64) -> String {
    let noun = if visitor_count == 1 { "visitor" } else { "visitors" };
    format!("{} - {} {}", title, visitor_count, noun)
}

/// Creates provider checkout sessions and reconciles payment state
pub struct CheckoutService {
    gateway: Arc<dyn CheckoutGateway>,
    packages: Arc<PackageService>,
    transactions: Arc<TransactionService>,
    settings: CheckoutSettings,
}

impl CheckoutService {
    pub fn new(
        gateway: Arc<dyn CheckoutGateway>,
        packages: Arc<PackageService>,
        transactions: Arc<TransactionService>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            gateway,
            packages,
            transactions,
            settings,
        }
    }

    async fn price(&self, request: &CreateCheckoutRequest) -> Result<PricedBooking> {
        let visitor_count = request.visitor_count.unwrap_or(1);
        if visitor_count < 1 {
            return Err(AppError::validation("Visitor count must be at least 1"));
        }

        let package_id = request
            .package_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());

        if let Some(package_id) = package_id {
            let package = self.packages.get_package(package_id).await?;
            let occupancy = request.occupancy.unwrap_or_default();

            return Ok(PricedBooking {
                package_id: Some(package.package_id.clone()),
                amount_cents: package.total_for(occupancy, visitor_count)?,
                title: package.title,
                currency: package.currency,
                visitor_count,
            });
        }

        let title = request
            .package_title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let (Some(title), Some(amount_cents)) = (title, request.amount_cents) else {
            return Err(AppError::validation("Missing required parameters"));
        };
        if amount_cents <= 0 {
            return Err(AppError::validation("Amount must be greater than 0"));
        }

        Ok(PricedBooking {
            package_id: None,
            title: title.to_string(),
            amount_cents,
            currency: self.settings.default_currency,
            visitor_count,
        })
    }

    /// Create a hosted checkout session and record the pending booking
    pub async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
        user: Option<&User>,
    ) -> Result<CheckoutResponse> {
        let booking = self.price(&request).await?;
        let (first_name, last_name) = request.contact_names();
        let email = request
            .contact_email()
            .or_else(|| user.map(|u| u.email.clone()));
        let phone = request.contact_phone();

        let mut metadata = BTreeMap::new();
        metadata.insert("package_title".to_string(), booking.title.clone());
        metadata.insert(
            "visitor_count".to_string(),
            booking.visitor_count.to_string(),
        );
        if let Some(package_id) = &booking.package_id {
            metadata.insert("package_id".to_string(), package_id.clone());
        }
        if let Some(occupancy) = request.occupancy {
            metadata.insert("occupancy".to_string(), occupancy.as_str().to_string());
        }
        if let Some(name) = request.customer_name.as_ref().filter(|n| !n.trim().is_empty()) {
            metadata.insert("customer_name".to_string(), name.trim().to_string());
        }
        if let Some(email) = &email {
            metadata.insert("customer_email".to_string(), email.clone());
        }
        if let Some(phone) = &phone {
            metadata.insert("customer_phone".to_string(), phone.clone());
        }
        if let Some(user) = user {
            metadata.insert("user_id".to_string(), user.id.to_string());
        }

        let session = self
            .gateway
            .create_session(CheckoutSessionRequest {
                amount_cents: booking.amount_cents,
                currency: booking.currency,
                product_name: product_name(&booking.title, booking.visitor_count),
                product_description: Some(PRODUCT_DESCRIPTION.to_string()),
                success_url: request
                    .success_url
                    .clone()
                    .unwrap_or_else(|| self.settings.success_url.clone()),
                cancel_url: request
                    .cancel_url
                    .clone()
                    .unwrap_or_else(|| self.settings.cancel_url.clone()),
                customer_email: email.clone(),
                metadata,
            })
            .await?;

        tracing::info!(
            session_id = %session.id,
            gateway = self.gateway.name(),
            amount = %booking.currency.format_amount(booking.amount_cents),
            "Checkout session created"
        );

        let pending = NewTransaction {
            session_id: session.id.clone(),
            user_id: user.map(|u| u.id),
            package_id: booking.package_id,
            package_title: booking.title,
            amount_cents: booking.amount_cents,
            currency: booking.currency,
            visitor_count: booking.visitor_count,
            email,
            first_name,
            last_name,
            phone,
        };

        // Checkout proceeds even when the booking could not be stored.
        if let Err(e) = self.transactions.record_pending(pending).await {
            tracing::error!(
                session_id = %session.id,
                error = %e,
                "Failed to record pending transaction"
            );
        }

        Ok(CheckoutResponse::new(session.id, session.url))
    }

    /// Ask the provider whether a session was paid and mark the booking completed if so
    pub async fn verify_payment(&self, session_id: &str) -> Result<VerifyPaymentResponse> {
        let session = self.gateway.retrieve_session(session_id).await?;

        if !session.is_paid() {
            tracing::info!(
                session_id = %session_id,
                payment_status = %session.payment_status,
                "Payment not completed"
            );
            return Ok(VerifyPaymentResponse::not_paid(&session.payment_status));
        }

        self.transactions.mark_completed(session_id).await?;
        Ok(VerifyPaymentResponse::paid())
    }
}
