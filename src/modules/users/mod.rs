pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Role, User};
pub use services::{TokenManager, UserService};
