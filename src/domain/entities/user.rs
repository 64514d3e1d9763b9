//! User entity and its write-side companions.

/// A stored user as seen by the rest of the application.
///
/// The password hash is never part of this type; reads project it away at
/// the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// 24-character hex ObjectId assigned at insert time.
    pub id: String,
    pub name: String,
    pub age: i32,
    pub email: String,
    pub address: String,
}

/// Input data for inserting a new user.
///
/// `password_hash` must already be a PHC string; plaintext never reaches
/// the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub age: i32,
    pub email: String,
    pub password_hash: String,
    pub address: String,
}

/// Sparse update for an existing user.
///
/// `None` fields are left unchanged. `age: Some(0)` writes zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub address: Option<String>,
}

impl UserPatch {
    /// Returns true if the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.address.is_none()
    }
}
