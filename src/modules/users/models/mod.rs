pub mod user;

pub use user::{AuthResponse, LoginRequest, NewUser, RegisterRequest, Role, User};
