pub mod transaction_controller;
pub mod webhook_controller;

pub use transaction_controller::configure;
