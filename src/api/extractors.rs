//! Request extractors shared by the API handlers.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body extractor that runs `validator` rules after deserialization.
///
/// Syntax errors, shape errors and rule failures are all rejected with
/// [`AppError::Validation`], so handlers only ever see a valid payload.
///
/// ```rust,ignore
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateUserRequest>) { .. }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;

        data.validate()?;

        Ok(ValidatedJson(data))
    }
}
