pub mod json_file_store;
pub mod transaction_repository;
pub mod transaction_store;

pub use json_file_store::JsonFileTransactionStore;
pub use transaction_repository::SqlTransactionRepository;
pub use transaction_store::{StatusUpdate, TransactionStore};
