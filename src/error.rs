//! Application error type and its HTTP mapping.
//!
//! Every layer returns [`AppError`]. The kind of the error, not its message,
//! decides the response status:
//!
//! | Variant      | Status                  |
//! |--------------|-------------------------|
//! | `Validation` | 400 Bad Request         |
//! | `NotFound`   | 404 Not Found           |
//! | `Conflict`   | 409 Conflict            |
//! | `Upstream`   | 502 Bad Gateway         |
//!
//! Error responses share one body shape:
//!
//! ```json
//! { "status": "fail", "message": "no user with that id exists" }
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::error::{ErrorKind, WriteFailure};
use serde::Serialize;
use thiserror::Error;

/// MongoDB server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input.
    #[error("{message}")]
    Validation { message: String },

    /// No record matches the requested identifier.
    #[error("{message}")]
    NotFound { message: String },

    /// A uniqueness constraint rejected the write.
    #[error("{message}")]
    Conflict { message: String },

    /// Storage or infrastructure failure.
    #[error("{message}")]
    Upstream { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// HTTP status code for this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::warn!(error = %self, "Request failed with upstream error");
        }

        let body = ErrorBody {
            status: "fail",
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Returns `true` if the driver error is a unique index violation.
///
/// Inserts report it as a write error; `findAndModify` reports it as a
/// command error.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            return AppError::conflict("email already exists");
        }

        AppError::upstream(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let reasons: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                format!("{}: {}", field, reasons.join(", "))
            })
            .collect();
        fields.sort();

        AppError::bad_request(format!("invalid request: {}", fields.join("; ")))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AppError::upstream(format!("password hashing failed: {}", err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::upstream(format!("background task failed: {}", err))
    }
}
