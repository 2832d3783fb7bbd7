//! Health and documentation endpoint tests

use super::{build_test_router, get_json, TestAppState};
use axum::http::StatusCode;
use bookstore_core::api::health::HealthResponse;
use serde_json::Value;

#[tokio::test]
async fn test_health_returns_healthy() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<HealthResponse>) =
        get_json(&app, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().status, "healthy");
}

#[tokio::test]
async fn test_ready_uses_state_check() {
    let app = build_test_router(TestAppState::new());

    // Plain-text body, so only the status is checked
    let (status, _): (StatusCode, Option<Value>) = get_json(&app, "/ready", None).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_openapi_document_is_public() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Value>) =
        get_json(&app, "/api/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    let doc = body.unwrap();
    assert!(doc["paths"]["/api/order/create"].is_object());
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = build_test_router(TestAppState::new());

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app, "/api/does-not-exist", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
