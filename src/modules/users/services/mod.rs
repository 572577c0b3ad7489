pub mod password;
pub mod token_manager;
pub mod user_service;

pub use password::{hash_password, verify_password};
pub use token_manager::{Claims, TokenManager};
pub use user_service::UserService;
