//! Repository trait for user data access.

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the user collection.
///
/// Every method is a single round-trip to storage. Identifiers that cannot
/// be parsed as an ObjectId are treated as "no match", never as an error.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MongoUserRepository`] - MongoDB implementation
/// - [`crate::infrastructure::persistence::InMemoryUserRepository`] - Process-local implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_user.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates the unique index on `email`.
    ///
    /// Called once during startup; a failure here is not recoverable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the index cannot be created.
    async fn ensure_indexes(&self) -> Result<(), AppError>;

    /// Inserts a new user and returns its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already taken.
    /// Returns [`AppError::Upstream`] on database errors.
    async fn insert(&self, new_user: NewUser) -> Result<String, AppError>;

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on database errors.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// Returns up to `limit` users starting at `offset`, in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on database errors.
    async fn find_page(&self, offset: u64, limit: i64) -> Result<Vec<User>, AppError>;

    /// Applies a sparse update and returns the post-update record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(User))` if a record matched
    /// - `Ok(None)` if no record has this identifier
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new email is already taken.
    /// Returns [`AppError::Upstream`] on database errors.
    async fn update(&self, id: &str, patch: UserPatch) -> Result<Option<User>, AppError>;

    /// Hard-deletes a user. Returns `true` if a record was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on database errors.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;

    /// Counts all stored users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on database errors.
    async fn count(&self) -> Result<u64, AppError>;

    /// Round-trips to storage to confirm it is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if storage does not answer.
    async fn ping(&self) -> Result<(), AppError>;
}
