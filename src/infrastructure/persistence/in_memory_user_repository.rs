//! Process-local user repository.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

#[derive(Debug, Clone)]
struct StoredUser {
    oid: ObjectId,
    user: User,
    password_hash: String,
}

/// A repository that keeps users in memory.
///
/// Mirrors the storage contract of
/// [`MongoUserRepository`](super::MongoUserRepository): ObjectId identifiers,
/// a unique email constraint, and insertion order for paging.
///
/// # Use Cases
///
/// - HTTP and service tests that should not need a running MongoDB
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<StoredUser>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        debug!("Using in-memory user repository");
        Self::default()
    }

    /// Returns the stored password hash for `id`, if the user exists.
    pub fn stored_password_hash(&self, id: &str) -> Option<String> {
        let oid = Self::parse_id(id)?;
        self.read()
            .ok()?
            .iter()
            .find(|s| s.oid == oid)
            .map(|s| s.password_hash.clone())
    }

    /// Parses ids the way the driver does; malformed ids match nothing.
    fn parse_id(id: &str) -> Option<ObjectId> {
        ObjectId::parse_str(id).ok()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<StoredUser>>, AppError> {
        self.users
            .read()
            .map_err(|_| AppError::upstream("user store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<StoredUser>>, AppError> {
        self.users
            .write()
            .map_err(|_| AppError::upstream("user store lock poisoned"))
    }

    fn email_taken(users: &[StoredUser], email: &str, except: Option<ObjectId>) -> bool {
        users
            .iter()
            .any(|s| s.user.email == email && Some(s.oid) != except)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn insert(&self, new_user: NewUser) -> Result<String, AppError> {
        let mut users = self.write()?;

        if Self::email_taken(&users, &new_user.email, None) {
            return Err(AppError::conflict("email already exists"));
        }

        let oid = ObjectId::new();
        let id = oid.to_hex();
        users.push(StoredUser {
            oid,
            user: User {
                id: id.clone(),
                name: new_user.name,
                age: new_user.age,
                email: new_user.email,
                address: new_user.address,
            },
            password_hash: new_user.password_hash,
        });

        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let Some(oid) = Self::parse_id(id) else {
            return Ok(None);
        };
        let users = self.read()?;
        Ok(users.iter().find(|s| s.oid == oid).map(|s| s.user.clone()))
    }

    async fn find_page(&self, offset: u64, limit: i64) -> Result<Vec<User>, AppError> {
        let users = self.read()?;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(users
            .iter()
            .skip(offset)
            .take(limit)
            .map(|s| s.user.clone())
            .collect())
    }

    async fn update(&self, id: &str, patch: UserPatch) -> Result<Option<User>, AppError> {
        let Some(oid) = Self::parse_id(id) else {
            return Ok(None);
        };
        let mut users = self.write()?;

        let Some(pos) = users.iter().position(|s| s.oid == oid) else {
            return Ok(None);
        };

        if let Some(ref email) = patch.email
            && Self::email_taken(&users, email, Some(oid))
        {
            return Err(AppError::conflict("email already exists"));
        }

        let stored = &mut users[pos];

        if let Some(name) = patch.name {
            stored.user.name = name;
        }
        if let Some(age) = patch.age {
            stored.user.age = age;
        }
        if let Some(email) = patch.email {
            stored.user.email = email;
        }
        if let Some(password_hash) = patch.password_hash {
            stored.password_hash = password_hash;
        }
        if let Some(address) = patch.address {
            stored.user.address = address;
        }

        Ok(Some(stored.user.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let Some(oid) = Self::parse_id(id) else {
            return Ok(false);
        };
        let mut users = self.write()?;
        let before = users.len();
        users.retain(|s| s.oid != oid);
        Ok(users.len() < before)
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.read()?.len() as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
