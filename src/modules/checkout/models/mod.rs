pub mod checkout_request;

pub use checkout_request::{CheckoutResponse, CreateCheckoutRequest, VerifyPaymentResponse};
