//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`database`] - MongoDB client construction and startup connection
//! - [`persistence`] - Repository implementations

pub mod database;
pub mod persistence;
