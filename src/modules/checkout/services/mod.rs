pub mod checkout_service;
pub mod gateway_trait;
pub mod stripe;
pub mod webhook_signature;

pub use checkout_service::{CheckoutService, CheckoutSettings};
pub use gateway_trait::{CheckoutGateway, CheckoutSession, CheckoutSessionRequest};
pub use stripe::StripeGateway;
