mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use users_api::routes::app_router;

const MISSING_ID: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

#[tokio::test]
async fn test_create_user_success() {
    let server = common::create_test_server();

    let response = server
        .post("/api/users")
        .json(&common::user_payload("john@x.com"))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["name"], "John Doe");
    assert_eq!(json["data"]["age"], 30);
    assert_eq!(json["data"]["email"], "john@x.com");
    assert_eq!(json["data"]["address"], "123 Main St");
    assert!(!json["data"]["id"].as_str().unwrap().is_empty());
    assert!(json["data"].get("password").is_none());
}

#[tokio::test]
async fn test_create_delete_get_scenario() {
    let server = common::create_test_server();
    let payload = common::user_payload("john@x.com");

    let created = server.post("/api/users").json(&payload).await;
    created.assert_status(StatusCode::CREATED);
    let id = created.json::<Value>()["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let duplicate = server.post("/api/users").json(&payload).await;
    duplicate.assert_status(StatusCode::CONFLICT);
    assert_eq!(duplicate.json::<Value>()["status"], "fail");

    let deleted = server.delete(&format!("/api/users/{}", id)).await;
    deleted.assert_status(StatusCode::NO_CONTENT);
    assert!(deleted.text().is_empty());

    let fetched = server.get(&format!("/api/users/{}", id)).await;
    fetched.assert_status_not_found();
}

#[tokio::test]
async fn test_create_user_missing_age() {
    let server = common::create_test_server();

    let response = server
        .post("/api/users")
        .json(&json!({
            "name": "John",
            "email": "john@x.com",
            "password": "pw",
            "address": "a"
        }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["status"], "fail");
    assert!(json["message"].as_str().unwrap().contains("age"));
}

#[tokio::test]
async fn test_create_user_empty_fields() {
    let server = common::create_test_server();

    let response = server
        .post("/api/users")
        .json(&json!({
            "name": "",
            "age": 30,
            "email": "john@x.com",
            "password": "pw",
            "address": "a"
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_user_invalid_email() {
    let server = common::create_test_server();

    let mut payload = common::user_payload("not-an-email");
    payload["age"] = json!(20);

    let response = server.post("/api/users").json(&payload).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_user_malformed_json() {
    let server = common::create_test_server();

    let response = server
        .post("/api/users")
        .text("{\"name\": ")
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["status"], "fail");
}

#[tokio::test]
async fn test_get_user_success() {
    let server = common::create_test_server();
    let id = common::create_user(&server, "john@x.com").await;

    let response = server.get(&format!("/api/users/{}", id)).await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["id"], id.as_str());
    assert!(json["data"].get("password").is_none());
}

#[tokio::test]
async fn test_get_user_not_found() {
    let server = common::create_test_server();

    let response = server.get(&format!("/api/users/{}", MISSING_ID)).await;

    response.assert_status_not_found();
    let json = response.json::<Value>();
    assert_eq!(json["status"], "fail");
    assert_eq!(json["message"], "no user with that id exists");
}

#[tokio::test]
async fn test_malformed_id_is_not_found() {
    let server = common::create_test_server();

    server.get("/api/users/not-an-id").await.assert_status_not_found();
    server
        .delete("/api/users/not-an-id")
        .await
        .assert_status_not_found();
    server
        .patch("/api/users/not-an-id")
        .json(&json!({ "name": "Jane" }))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_update_user_sparse() {
    let server = common::create_test_server();
    let id = common::create_user(&server, "john@x.com").await;

    let response = server
        .patch(&format!("/api/users/{}", id))
        .json(&json!({ "address": "9 Elm St" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["data"]["address"], "9 Elm St");
    assert_eq!(json["data"]["name"], "John Doe");
    assert_eq!(json["data"]["age"], 30);
    assert_eq!(json["data"]["email"], "john@x.com");
}

#[tokio::test]
async fn test_update_user_age_zero_and_empty_string() {
    let server = common::create_test_server();
    let id = common::create_user(&server, "john@x.com").await;

    let response = server
        .patch(&format!("/api/users/{}", id))
        .json(&json!({ "age": 0, "name": "" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["data"]["age"], 0);
    assert_eq!(json["data"]["name"], "John Doe");
}

#[tokio::test]
async fn test_update_user_password_rehashed() {
    let (state, repo) = common::create_test_state();
    let server = TestServer::new(users_api::routes::router(state)).unwrap();
    let id = common::create_user(&server, "john@x.com").await;
    let before = repo.stored_password_hash(&id).unwrap();

    let response = server
        .patch(&format!("/api/users/{}", id))
        .json(&json!({ "password": "new-password" }))
        .await;

    response.assert_status_ok();
    assert!(response.json::<Value>()["data"].get("password").is_none());

    let after = repo.stored_password_hash(&id).unwrap();
    assert_ne!(before, after);
    assert!(after.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_update_user_empty_body_returns_current() {
    let server = common::create_test_server();
    let id = common::create_user(&server, "john@x.com").await;

    let response = server
        .patch(&format!("/api/users/{}", id))
        .json(&json!({}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["email"], "john@x.com");
}

#[tokio::test]
async fn test_update_user_not_found() {
    let server = common::create_test_server();

    let response = server
        .patch(&format!("/api/users/{}", MISSING_ID))
        .json(&json!({ "name": "Jane" }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_update_user_email_conflict() {
    let server = common::create_test_server();
    common::create_user(&server, "john@x.com").await;
    let id = common::create_user(&server, "jane@x.com").await;

    let response = server
        .patch(&format!("/api/users/{}", id))
        .json(&json!({ "email": "john@x.com" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_user_invalid_email() {
    let server = common::create_test_server();
    let id = common::create_user(&server, "john@x.com").await;

    let response = server
        .patch(&format!("/api/users/{}", id))
        .json(&json!({ "email": "not-an-email" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["status"], "fail");
    assert!(json["message"].as_str().unwrap().contains("email"));

    let current = server.get(&format!("/api/users/{}", id)).await;
    assert_eq!(current.json::<Value>()["data"]["email"], "john@x.com");
}

#[tokio::test]
async fn test_update_user_empty_email_is_ignored() {
    let server = common::create_test_server();
    let id = common::create_user(&server, "john@x.com").await;

    let response = server
        .patch(&format!("/api/users/{}", id))
        .json(&json!({ "email": "", "name": "Jane" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["data"]["email"], "john@x.com");
    assert_eq!(json["data"]["name"], "Jane");
}

#[tokio::test]
async fn test_update_user_malformed_body() {
    let server = common::create_test_server();
    let id = common::create_user(&server, "john@x.com").await;

    let response = server
        .patch(&format!("/api/users/{}", id))
        .json(&json!({ "age": "thirty" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_update_user_negative_age() {
    let server = common::create_test_server();
    let id = common::create_user(&server, "john@x.com").await;

    let response = server
        .patch(&format!("/api/users/{}", id))
        .json(&json!({ "age": -1 }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_delete_user_twice() {
    let server = common::create_test_server();
    let id = common::create_user(&server, "john@x.com").await;

    server
        .delete(&format!("/api/users/{}", id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete(&format!("/api/users/{}", id))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_list_users_empty() {
    let server = common::create_test_server();

    let response = server.get("/api/users").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["status"], "success");
    assert_eq!(json["results"], 0);
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn test_list_users_pagination() {
    let server = common::create_test_server();
    for i in 0..5 {
        common::create_user(&server, &format!("user{}@x.com", i)).await;
    }

    let response = server
        .get("/api/users")
        .add_query_param("page", 2)
        .add_query_param("limit", 2)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["results"], 2);
    assert_eq!(json["data"][0]["email"], "user2@x.com");
    assert_eq!(json["data"][1]["email"], "user3@x.com");

    let last = server
        .get("/api/users")
        .add_query_param("page", 3)
        .add_query_param("limit", 2)
        .await;
    assert_eq!(last.json::<Value>()["results"], 1);

    let beyond = server
        .get("/api/users")
        .add_query_param("page", 4)
        .add_query_param("limit", 2)
        .await;
    assert_eq!(beyond.json::<Value>()["results"], 0);
}

#[tokio::test]
async fn test_list_users_defaults_for_non_positive() {
    let server = common::create_test_server();
    for i in 0..12 {
        common::create_user(&server, &format!("user{}@x.com", i)).await;
    }

    let response = server
        .get("/api/users")
        .add_query_param("page", 0)
        .add_query_param("limit", -5)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["results"], 10);
    assert_eq!(json["data"][0]["email"], "user0@x.com");
}

#[tokio::test]
async fn test_list_users_invalid_page() {
    let server = common::create_test_server();

    let response = server
        .get("/api/users")
        .add_query_param("page", "abc")
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["status"], "fail");
}

#[tokio::test]
async fn test_storage_failure_is_bad_gateway() {
    let app = common::create_test_router_with(Arc::new(common::UnreachableRepository));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/api/users").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["status"], "fail");
}

#[tokio::test]
async fn test_trailing_slash_is_normalized() {
    let (state, _repo) = common::create_test_state();
    let app = app_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
