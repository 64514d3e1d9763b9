//! User management service.

use std::sync::Arc;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::hash_password_blocking;

/// Page number used when the caller passes zero or a negative value.
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when the caller passes zero or a negative value.
pub const DEFAULT_LIMIT: i64 = 10;

const USER_NOT_FOUND: &str = "no user with that id exists";

/// Validated input for creating a user. `password` is plaintext.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub age: i32,
    pub email: String,
    pub password: String,
    pub address: String,
}

/// Sparse input for updating a user. `None` and empty strings mean "leave as is".
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub address: Option<String>,
}

/// Resolves `page`/`limit` defaults and returns `(offset, limit)`.
///
/// # Defaults
///
/// - `page <= 0` → 1
/// - `limit <= 0` → 10
pub fn page_bounds(page: i64, limit: i64) -> (u64, i64) {
    let page = if page <= 0 { DEFAULT_PAGE } else { page };
    let limit = if limit <= 0 { DEFAULT_LIMIT } else { limit };

    let offset = (page - 1).saturating_mul(limit);

    (offset as u64, limit)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Service for the user CRUD operations.
///
/// Owns the rules that sit between HTTP and storage: password hashing,
/// sparse-update construction and pagination bounds. Every operation is a
/// single storage round-trip (create re-reads once) and nothing is retried.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Creates a user and returns the canonical stored record.
    ///
    /// The password is hashed before it reaches the repository.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email already exists.
    /// Returns [`AppError::Upstream`] on storage or hashing errors.
    pub async fn create_user(&self, input: CreateUser) -> Result<User, AppError> {
        let password_hash = hash_password_blocking(input.password).await?;

        let new_user = NewUser {
            name: input.name,
            age: input.age,
            email: input.email,
            password_hash,
            address: input.address,
        };

        let id = self.repository.insert(new_user).await?;

        let user = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::upstream("created user could not be read back"))?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Applies a sparse update and returns the post-update record.
    ///
    /// Only supplied, non-empty fields are written. A supplied password is
    /// re-hashed. An update with nothing to change returns the current record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this identifier.
    /// Returns [`AppError::Conflict`] if the new email is already taken.
    /// Returns [`AppError::Upstream`] on storage or hashing errors.
    pub async fn update_user(&self, id: &str, input: UpdateUser) -> Result<User, AppError> {
        let password_hash = match non_empty(input.password) {
            Some(password) => Some(hash_password_blocking(password).await?),
            None => None,
        };

        let patch = UserPatch {
            name: non_empty(input.name),
            age: input.age,
            email: non_empty(input.email),
            password_hash,
            address: non_empty(input.address),
        };

        if patch.is_empty() {
            return self.find_user_by_id(id).await;
        }

        let user = self
            .repository
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        tracing::info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    /// Retrieves a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this identifier.
    /// Returns [`AppError::Upstream`] on storage errors.
    pub async fn find_user_by_id(&self, id: &str) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
    }

    /// Returns one page of users in storage order.
    ///
    /// See [`page_bounds`] for defaults. An empty page is `Ok(vec![])`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on storage errors.
    pub async fn find_users(&self, page: i64, limit: i64) -> Result<Vec<User>, AppError> {
        let (offset, limit) = page_bounds(page, limit);
        self.repository.find_page(offset, limit).await
    }

    /// Hard-deletes a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing was deleted.
    /// Returns [`AppError::Upstream`] on storage errors.
    pub async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found(USER_NOT_FOUND));
        }

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Checks that storage is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if storage does not answer.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
