//! Core domain entities.
//!
//! Entities are plain data structures without persistence concerns. Writes use
//! separate input types:
//! - [`NewUser`] - For inserting a record
//! - [`UserPatch`] - For sparse updates

pub mod user;

pub use user::{NewUser, User, UserPatch};
