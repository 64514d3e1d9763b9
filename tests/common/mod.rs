#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use users_api::domain::entities::{NewUser, User, UserPatch};
use users_api::domain::repositories::UserRepository;
use users_api::error::AppError;
use users_api::infrastructure::persistence::InMemoryUserRepository;
use users_api::routes::router;
use users_api::state::AppState;

pub fn create_test_state() -> (AppState, Arc<InMemoryUserRepository>) {
    let repo = Arc::new(InMemoryUserRepository::new());
    let state = AppState::new(repo.clone());
    (state, repo)
}

pub fn create_test_server() -> TestServer {
    let (state, _repo) = create_test_state();
    TestServer::new(router(state)).unwrap()
}

pub fn create_test_router_with(repo: Arc<dyn UserRepository>) -> Router {
    router(AppState::new(repo))
}

pub fn user_payload(email: &str) -> Value {
    json!({
        "name": "John Doe",
        "age": 30,
        "email": email,
        "password": "pw",
        "address": "123 Main St"
    })
}

/// Creates a user through the API and returns its id.
pub async fn create_user(server: &TestServer, email: &str) -> String {
    let response = server.post("/api/users").json(&user_payload(email)).await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<Value>();
    json["data"]["id"].as_str().unwrap().to_string()
}

/// Repository whose every call fails as if the database were unreachable.
pub struct UnreachableRepository;

fn unreachable() -> AppError {
    AppError::upstream("server selection timeout")
}

#[async_trait]
impl UserRepository for UnreachableRepository {
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        Err(unreachable())
    }

    async fn insert(&self, _new_user: NewUser) -> Result<String, AppError> {
        Err(unreachable())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<User>, AppError> {
        Err(unreachable())
    }

    async fn find_page(&self, _offset: u64, _limit: i64) -> Result<Vec<User>, AppError> {
        Err(unreachable())
    }

    async fn update(&self, _id: &str, _patch: UserPatch) -> Result<Option<User>, AppError> {
        Err(unreachable())
    }

    async fn delete(&self, _id: &str) -> Result<bool, AppError> {
        Err(unreachable())
    }

    async fn count(&self) -> Result<u64, AppError> {
        Err(unreachable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unreachable())
    }
}
