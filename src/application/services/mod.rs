//! Business logic services for the application layer.

pub mod user_service;

pub use user_service::{CreateUser, UpdateUser, UserService};
