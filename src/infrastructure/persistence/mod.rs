//! Repository implementations.
//!
//! # Repositories
//!
//! - [`MongoUserRepository`] - User storage in a MongoDB collection
//! - [`InMemoryUserRepository`] - Process-local storage for tests and tooling

pub mod in_memory_user_repository;
pub mod mongo_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
pub use mongo_user_repository::MongoUserRepository;
