pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{NewTransaction, PaymentTransaction, TransactionStatus};
pub use repositories::{JsonFileTransactionStore, SqlTransactionRepository, TransactionStore};
pub use services::{TransactionService, WebhookHandler};
