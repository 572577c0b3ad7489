//! Kaabo booking backend
//!
//! Package catalog, hosted checkout, booking records and account
//! authentication for the Kaabo travel experiences site.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;
pub mod startup;

// Re-export commonly used types
pub use modules::checkout;
pub use modules::packages;
pub use modules::transactions;
pub use modules::users;
pub use startup::{AppServices, ServiceSettings};
