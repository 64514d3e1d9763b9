//! DTOs for the user endpoints.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError};

use crate::application::services::{CreateUser, UpdateUser};
use crate::domain::entities::User;

/// Request body for `POST /api/users`.
///
/// All fields are required. A missing string field fails deserialization;
/// a missing `age` fails the `required` rule.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(
        required(message = "age is required"),
        range(min = 0, message = "age must not be negative")
    )]
    pub age: Option<i32>,

    #[validate(
        length(min = 1, message = "email is required"),
        email(message = "invalid email format")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,

    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            age: req.age.unwrap_or_default(),
            email: req.email,
            password: req.password,
            address: req.address,
        }
    }
}

/// Email format rule for sparse updates. An empty string means "no change"
/// and is accepted here.
fn validate_email_if_present(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || email.validate_email() {
        return Ok(());
    }

    Err(ValidationError::new("email").with_message("invalid email format".into()))
}

/// Request body for `PATCH /api/users/{id}`.
///
/// Every field is optional; absent fields and empty strings are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub name: Option<String>,

    #[validate(range(min = 0, message = "age must not be negative"))]
    pub age: Option<i32>,

    #[validate(custom(function = "validate_email_if_present"))]
    pub email: Option<String>,

    pub password: Option<String>,

    pub address: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            email: req.email,
            password: req.password,
            address: req.address,
        }
    }
}

/// Public user representation. Never carries the password.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub age: i32,
    pub email: String,
    pub address: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
            email: user.email,
            address: user.address,
        }
    }
}
