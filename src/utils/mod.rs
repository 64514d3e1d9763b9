//! Helper functions used across the application.
//!
//! - [`password`] - Argon2 password hashing

pub mod password;
