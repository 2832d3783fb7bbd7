//! Auth API HTTP Handler Tests
//!
//! Login, registration and token renewal.

use super::{build_test_router, post_json, send_raw, TestAppState, PASSWORD};
use axum::http::{Method, StatusCode};
use bookstore_core::api::SuccessResponse;
use bookstore_core::domain::{Role, TokenResponse, UserOverview};
use serde_json::{json, Value};

// ============================================================================
// Register Tests
// ============================================================================

#[tokio::test]
async fn test_register_creates_user_with_user_role() {
    let state = TestAppState::new();
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<SuccessResponse<UserOverview>>) = post_json(
        &app,
        "/api/register",
        None,
        &json!({
            "firstname": "Jana",
            "surname": "Novakova",
            "phone": "+420123456789",
            "email": "jana@example.com",
            "password": "secret1"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let created = body.unwrap().data;
    assert_eq!(created.email, "jana@example.com");
    assert_eq!(created.role, Role::User);

    let stored = state.db.users.read().await;
    assert_eq!(stored.len(), 1);
    assert_ne!(stored[0].password_hash, "secret1");
}

#[tokio::test]
async fn test_register_duplicate_email_returns_409() {
    let state = TestAppState::new();
    state.login_as("taken@example.com", Role::User).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/register",
        None,
        &json!({
            "firstname": "Other",
            "surname": "Person",
            "email": "taken@example.com",
            "password": "secret1"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.unwrap()["error"], "conflict");
}

#[tokio::test]
async fn test_register_invalid_email_returns_400() {
    let state = TestAppState::new();
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/register",
        None,
        &json!({
            "firstname": "Jana",
            "surname": "Novakova",
            "email": "not-an-email",
            "password": "secret1"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["error"], "validation");
}

#[tokio::test]
async fn test_register_malformed_json_returns_400() {
    let state = TestAppState::new();
    let app = build_test_router(state);

    let (status, body) = send_raw(&app, Method::POST, "/api/register", None, "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "bad_request");
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_returns_token_and_role() {
    let state = TestAppState::new();
    state.login_as("staff@example.com", Role::Employee).await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<SuccessResponse<TokenResponse>>) = post_json(
        &app,
        "/api/login",
        None,
        &json!({ "email": "staff@example.com", "password": PASSWORD }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let token = body.unwrap().data;
    assert_eq!(token.role, Role::Employee);
    assert_eq!(token.expires_in, 3600);

    let claims = state.jwt_manager.verify_session_token(&token.token).unwrap();
    assert_eq!(claims.sub, "staff@example.com");
}

#[tokio::test]
async fn test_login_unknown_user_returns_400() {
    let state = TestAppState::new();
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/login",
        None,
        &json!({ "email": "nobody@example.com", "password": PASSWORD }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["message"], "Unknown user!");
}

#[tokio::test]
async fn test_login_wrong_password_returns_400() {
    let state = TestAppState::new();
    state.login_as("jana@example.com", Role::User).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/login",
        None,
        &json!({ "email": "jana@example.com", "password": "nope-nope" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["message"], "Wrong password!");
}

// ============================================================================
// Renew Token Tests
// ============================================================================

#[tokio::test]
async fn test_renew_token_without_bearer_returns_empty_401() {
    let state = TestAppState::new();
    let app = build_test_router(state);

    let (status, body) = send_raw(&app, Method::POST, "/api/renewToken", None, "").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_renew_token_with_garbage_token_returns_401() {
    let state = TestAppState::new();
    let app = build_test_router(state);

    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/api/renewToken",
        Some("definitely.not.a-jwt"),
        "",
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_renew_token_issues_token_with_stored_role() {
    let state = TestAppState::new();
    let (user, token) = state.login_as("jana@example.com", Role::User).await;

    // Promote after the token was issued
    state.db.users.write().await[0].role = Role::Admin;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<SuccessResponse<TokenResponse>>) =
        post_json(&app, "/api/renewToken", Some(&token), &json!({})).await;

    assert_eq!(status, StatusCode::OK);
    let renewed = body.unwrap().data;
    assert_eq!(renewed.role, Role::Admin);
    assert!(!renewed.token.is_empty());
    assert_eq!(user.email, "jana@example.com");
}

#[tokio::test]
async fn test_token_of_deleted_user_is_rejected() {
    let state = TestAppState::new();
    let (_, token) = state.login_as("gone@example.com", Role::User).await;
    state.db.users.write().await.clear();
    let app = build_test_router(state);

    let (status, body) =
        send_raw(&app, Method::POST, "/api/renewToken", Some(&token), "").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.is_empty());
}
