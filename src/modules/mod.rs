pub mod checkout;
pub mod health;
pub mod packages;
pub mod transactions;
pub mod users;
