//! Handlers for user management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};

use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::response::{DataResponse, ListResponse};
use crate::api::dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::api::extractors::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a user.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "John Doe",
///   "age": 30,
///   "email": "john@x.com",
///   "password": "pw",
///   "address": "123 Main St"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the body is malformed or fails validation
/// - 409 if the email is already registered
/// - 502 on storage errors
pub async fn create_user_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<DataResponse<UserResponse>>), AppError> {
    let user = state.user_service.create_user(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(UserResponse::from(user))),
    ))
}

/// Partially updates a user.
///
/// # Endpoint
///
/// `PATCH /api/users/{id}`
///
/// All fields are optional; only supplied, non-empty fields change. A new
/// password is re-hashed.
///
/// # Errors
///
/// - 400 if the body is malformed or a field fails validation (including a
///   non-empty `email` that is not an address)
/// - 404 if no user has this id
/// - 409 if the new email is already registered
/// - 502 on storage errors
///
/// A malformed body is a client error and always maps to 400; it is never
/// reported as 502, which is reserved for storage failures.
pub async fn update_user_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<DataResponse<UserResponse>>, AppError> {
    let user = state.user_service.update_user(&id, payload.into()).await?;

    Ok(Json(DataResponse::new(UserResponse::from(user))))
}

/// Returns a single user.
///
/// # Endpoint
///
/// `GET /api/users/{id}`
///
/// # Errors
///
/// Returns 404 if no user has this id (malformed ids included).
pub async fn get_user_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DataResponse<UserResponse>>, AppError> {
    let user = state.user_service.find_user_by_id(&id).await?;

    Ok(Json(DataResponse::new(UserResponse::from(user))))
}

/// Lists users page by page.
///
/// # Endpoint
///
/// `GET /api/users?page=1&limit=10`
///
/// Non-positive or absent values fall back to page 1 and limit 10.
///
/// # Errors
///
/// - 400 if `page` or `limit` is not an integer
/// - 502 on storage errors
///
/// A non-integer `page`/`limit` is a client error and always maps to 400; it
/// is never reported as 502, which is reserved for storage failures.
pub async fn list_users_handler(
    State(state): State<AppState>,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<ListResponse<UserResponse>>, AppError> {
    let Query(params) = query?;
    let (page, limit) = params.page_and_limit();

    let users = state.user_service.find_users(page, limit).await?;

    Ok(Json(ListResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// Deletes a user.
///
/// # Endpoint
///
/// `DELETE /api/users/{id}`
///
/// Returns 204 No Content on success.
///
/// # Errors
///
/// Returns 404 if no user has this id.
pub async fn delete_user_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.user_service.delete_user(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
