use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use userbase::api::{self, AppState};
use userbase::repositories::InMemoryUserRepository;
use userbase::services::{AuthService, StaticCredentialStore, UserService};

// ─── Test helpers ───────────────────────────────────────────────────────

const SECRET: &str = "integration-test-secret";

fn test_server() -> TestServer {
    let credentials = StaticCredentialStore::boxed("admin", "123456").unwrap();
    let auth_service = Arc::new(AuthService::new(credentials, SECRET));
    let user_service = Arc::new(UserService::new(InMemoryUserRepository::boxed()));
    let state = AppState::new(user_service, auth_service);

    let app = api::build_router(state, "http://localhost:3000").unwrap();
    TestServer::new(app).unwrap()
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

async fn login(server: &TestServer) -> String {
    let response = server
        .post("/login")
        .json(&json!({"username": "admin", "password": "123456"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json::<Value>()["token"].as_str().unwrap().to_string()
}

async fn create_user(server: &TestServer, token: &str, name: &str, email: &str) -> Value {
    let response = server
        .post("/users")
        .add_header(header::AUTHORIZATION, bearer(token))
        .json(&json!({"name": name, "email": email}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap()
}

// ─── Login ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_returns_verifiable_token() {
    let server = test_server();

    let response = server
        .post("/login")
        .json(&json!({"username": "admin", "password": "123456"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["token_type"], "Bearer");

    let verifier = AuthService::new(StaticCredentialStore::boxed("admin", "123456").unwrap(), SECRET);
    let claims = verifier.verify_token(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.username, "admin");
    assert!(claims.exp <= chrono::Utc::now().timestamp() + 3600 + 5);
}

#[tokio::test]
async fn login_with_bad_credentials_returns_same_401() {
    let server = test_server();

    let wrong_password = server
        .post("/login")
        .json(&json!({"username": "admin", "password": "wrongpassword"}))
        .await;
    let unknown_user = server
        .post("/login")
        .json(&json!({"username": "ghost", "password": "123456"}))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.json::<Value>(), unknown_user.json::<Value>());
    assert_eq!(error_code(&wrong_password.json::<Value>()), "UNAUTHORIZED");
}

#[tokio::test]
async fn login_with_missing_fields_is_unauthorized() {
    let server = test_server();

    let response = server.post("/login").json(&json!({"username": "admin"})).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

// ─── Auth guard ─────────────────────────────────────────────────────────

#[tokio::test]
async fn list_without_token_is_missing_token() {
    let server = test_server();

    let response = server.get("/users").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&response.json::<Value>()), "MISSING_TOKEN");
}

#[tokio::test]
async fn create_without_token_does_not_touch_store() {
    let server = test_server();

    let response = server
        .post("/users")
        .json(&json!({"name": "John Doe", "email": "john.doe@example.com"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let token = login(&server).await;
    let users = server
        .get("/users")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await
        .json::<Value>();
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn invalid_token_is_rejected() {
    let server = test_server();

    let response = server
        .get("/users")
        .add_header(header::AUTHORIZATION, bearer("not.a.token"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&response.json::<Value>()), "INVALID_TOKEN");
}

// ─── Users ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_update_delete_scenario() {
    let server = test_server();
    let token = login(&server).await;

    let created = create_user(&server, &token, "John Doe", "john.doe@example.com").await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "John Doe");
    assert_eq!(created["email"], "john.doe@example.com");

    let updated = server
        .put(&format!("/users/{}", id))
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({"name": "Jane Updated", "email": "jane.updated@example.com"}))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    assert_eq!(
        updated.json::<Value>(),
        json!({"id": id, "name": "Jane Updated", "email": "jane.updated@example.com"})
    );

    let deleted = server
        .delete(&format!("/users/{}", id))
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);
    assert!(deleted.as_bytes().is_empty());

    let users = server
        .get("/users")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await
        .json::<Value>();
    assert!(users
        .as_array()
        .unwrap()
        .iter()
        .all(|u| u["id"].as_i64() != Some(id)));
}

#[tokio::test]
async fn create_with_missing_email_is_bad_request() {
    let server = test_server();
    let token = login(&server).await;

    let response = server
        .post("/users")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({"name": "John Doe"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "name and email are required");
}

#[tokio::test]
async fn ids_keep_increasing_after_delete() {
    let server = test_server();
    let token = login(&server).await;

    let first = create_user(&server, &token, "A", "a@example.com").await;
    let first_id = first["id"].as_i64().unwrap();
    server
        .delete(&format!("/users/{}", first_id))
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;

    let second = create_user(&server, &token, "B", "b@example.com").await;
    assert!(second["id"].as_i64().unwrap() > first_id);
}

#[tokio::test]
async fn update_unknown_id_is_not_found_even_with_bad_body() {
    let server = test_server();
    let token = login(&server).await;

    let valid_body = server
        .put("/users/999")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({"name": "Non-existent User", "email": "non.existent@example.com"}))
        .await;
    let empty_body = server
        .put("/users/999")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({}))
        .await;
    let not_json = server
        .put("/users/999")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .text("not json")
        .await;

    assert_eq!(valid_body.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(empty_body.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(not_json.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_existing_with_missing_field_is_bad_request() {
    let server = test_server();
    let token = login(&server).await;
    let created = create_user(&server, &token, "Jane Doe", "jane.doe@example.com").await;

    let response = server
        .put(&format!("/users/{}", created["id"]))
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({"email": "jane@example.com"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() {
    let server = test_server();
    let token = login(&server).await;

    let response = server
        .delete("/users/999")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(error_code(&response.json::<Value>()), "NOT_FOUND");
}

#[tokio::test]
async fn get_single_user() {
    let server = test_server();
    let token = login(&server).await;
    let created = create_user(&server, &token, "Mark Smith", "mark.smith@example.com").await;

    let found = server
        .get(&format!("/users/{}", created["id"]))
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;
    let non_numeric = server
        .get("/users/abc")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(found.status_code(), StatusCode::OK);
    assert_eq!(found.json::<Value>(), created);
    assert_eq!(non_numeric.status_code(), StatusCode::NOT_FOUND);
}
