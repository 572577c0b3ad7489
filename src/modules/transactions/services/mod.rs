pub mod transaction_service;
pub mod webhook_handler;

pub use transaction_service::TransactionService;
pub use webhook_handler::{WebhookEvent, WebhookHandler, WebhookOutcome};
