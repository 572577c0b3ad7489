pub mod controllers;
pub mod models;
pub mod services;

pub use services::{CheckoutGateway, CheckoutService, CheckoutSettings, StripeGateway};
