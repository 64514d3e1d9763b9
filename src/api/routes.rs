//! API route configuration.

use crate::api::handlers::{
    create_user_handler, delete_user_handler, get_user_handler, healthchecker_handler,
    list_users_handler, update_user_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All routes mounted under `/api`.
///
/// # Endpoints
///
/// - `GET    /healthchecker` - Liveness probe
/// - `GET    /users`         - List users (paginated)
/// - `POST   /users`         - Create a user
/// - `GET    /users/{id}`    - Fetch a user
/// - `PATCH  /users/{id}`    - Partially update a user
/// - `DELETE /users/{id}`    - Delete a user
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/healthchecker", get(healthchecker_handler))
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/{id}",
            get(get_user_handler)
                .patch(update_user_handler)
                .delete(delete_user_handler),
        )
}
