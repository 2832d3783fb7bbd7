//! Product API HTTP Handler Tests

use super::{
    build_test_router, delete_json, get_json, post_json, put_empty, put_json, send_raw,
    TestAppState,
};
use crate::api::product_input;
use axum::http::{Method, StatusCode};
use bookstore_core::api::{MessageResponse, SuccessResponse};
use bookstore_core::domain::{ProductDetail, ProductEvidence, Role, DEFAULT_PRODUCT_IMAGE};
use serde_json::{json, Value};

async fn seeded() -> (TestAppState, i64, i64, i64) {
    let state = TestAppState::new();
    let fantasy = state.db.add_category("Fantasy").await;
    let english = state.db.add_language("English").await;
    let tolkien = state.db.add_author("John", "Tolkien").await;

    let mut hobbit = product_input("The Hobbit", 10.0, 5);
    hobbit.pages = 310;
    hobbit.author_id = Some(tolkien.id);
    hobbit.category_ids = vec![fantasy.id];
    hobbit.language_id = Some(english.id);
    let hobbit_id = state.db.add_product(hobbit).await;

    let mut rur = product_input("R.U.R.", 20.0, 2);
    rur.pages = 120;
    let rur_id = state.db.add_product(rur).await;

    let expensive_id = state
        .db
        .add_product(product_input("Atlas of Everything", 99.9, 1))
        .await;

    (state, hobbit_id, rur_id, expensive_id)
}

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
async fn test_list_products_is_public() {
    let (state, ..) = seeded().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<SuccessResponse<Vec<ProductDetail>>>) =
        get_json(&app, "/api/productdescription", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().data.len(), 3);
}

#[tokio::test]
async fn test_get_product_resolves_references() {
    let (state, hobbit_id, ..) = seeded().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<SuccessResponse<ProductDetail>>) = get_json(
        &app,
        &format!("/api/productdescription/{}", hobbit_id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let product = body.unwrap().data;
    assert_eq!(product.author.unwrap().last_name, "Tolkien");
    assert_eq!(product.categories.len(), 1);
    assert_eq!(product.language.unwrap().language, "English");
    assert_eq!(product.current_price, 10.0);
}

#[tokio::test]
async fn test_get_product_non_numeric_id_returns_400() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Value>) =
        get_json(&app, "/api/productdescription/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["error"], "bad_request");
}

#[tokio::test]
async fn test_search_matches_author_case_insensitive() {
    let (state, hobbit_id, ..) = seeded().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<SuccessResponse<Vec<ProductDetail>>>) = post_json(
        &app,
        "/api/productdescription/search",
        None,
        &json!({ "query": "tolk" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let found = body.unwrap().data;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, hobbit_id);
}

// ============================================================================
// Filter
// ============================================================================

#[tokio::test]
async fn test_filter_without_bounds_returns_everything() {
    let (state, ..) = seeded().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<SuccessResponse<Vec<ProductDetail>>>) =
        post_json(&app, "/api/productdescription/filter", None, &json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().data.len(), 3);
}

#[tokio::test]
async fn test_filter_price_bounds_are_inclusive() {
    let (state, hobbit_id, rur_id, _) = seeded().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<SuccessResponse<Vec<ProductDetail>>>) = post_json(
        &app,
        "/api/productdescription/filter",
        None,
        &json!({ "price_from": 10.0, "price_to": 20.0 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let mut ids: Vec<i64> = body.unwrap().data.iter().map(|p| p.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![hobbit_id, rur_id]);
}

#[tokio::test]
async fn test_filter_combines_dimensions() {
    let (state, hobbit_id, ..) = seeded().await;
    let fantasy_id = state.db.categories.read().await[0].id;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<SuccessResponse<Vec<ProductDetail>>>) = post_json(
        &app,
        "/api/productdescription/filter",
        None,
        &json!({ "pages_from": 200, "category_ids": [fantasy_id] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let found = body.unwrap().data;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, hobbit_id);
}

// ============================================================================
// Admin writes
// ============================================================================

#[tokio::test]
async fn test_create_product_assigns_default_image() {
    let state = TestAppState::new();
    let token = state.admin_token().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<SuccessResponse<ProductDetail>>) = post_json(
        &app,
        "/api/productdescription",
        Some(&token),
        &product_input("Valka s mloky", 15.5, 4),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let created = body.unwrap().data;
    assert_eq!(created.image.as_deref(), Some(DEFAULT_PRODUCT_IMAGE));
    assert_eq!(created.available_quantity, 4);
}

#[tokio::test]
async fn test_create_product_with_unknown_category_returns_404() {
    let state = TestAppState::new();
    let token = state.admin_token().await;
    let app = build_test_router(state.clone());

    let mut input = product_input("Ghost", 1.0, 1);
    input.category_ids = vec![777];
    let (status, _): (StatusCode, Option<Value>) =
        post_json(&app, "/api/productdescription", Some(&token), &input).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(state.db.products.read().await.is_empty());
}

#[tokio::test]
async fn test_update_product_records_evidence_once() {
    let (state, _, rur_id, _) = seeded().await;
    let token = state.admin_token().await;
    let app = build_test_router(state.clone());

    let mut input = product_input("R.U.R.", 25.0, 2);
    input.pages = 120;
    let (status, body): (StatusCode, Option<SuccessResponse<ProductDetail>>) = put_json(
        &app,
        &format!("/api/productdescription/{}", rur_id),
        Some(&token),
        &input,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().data.price, 25.0);

    // Same payload again is a no-op
    let (status, _): (StatusCode, Option<SuccessResponse<ProductDetail>>) = put_json(
        &app,
        &format!("/api/productdescription/{}", rur_id),
        Some(&token),
        &input,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let evidences = state.db.evidences.read().await;
    assert_eq!(evidences.len(), 1);
    assert_eq!(evidences[0].change_description, "Product information was updated.");
}

#[tokio::test]
async fn test_set_discount_creates_missing_discount() {
    let (state, hobbit_id, ..) = seeded().await;
    let token = state.admin_token().await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<SuccessResponse<ProductDetail>>) = put_empty(
        &app,
        &format!("/api/productdescription/{}/discount/20", hobbit_id),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let product = body.unwrap().data;
    assert_eq!(product.discount.unwrap().percent, 20);
    assert_eq!(product.current_price, 8.0);
    assert_eq!(state.db.discounts.read().await.len(), 1);

    let evidences = state.db.evidences.read().await;
    assert_eq!(evidences[0].change_description, "Discount updated from 0% to 20%.");
}

#[tokio::test]
async fn test_set_discount_out_of_range_returns_400() {
    let (state, hobbit_id, ..) = seeded().await;
    let token = state.admin_token().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = put_empty(
        &app,
        &format!("/api/productdescription/{}/discount/101", hobbit_id),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_product() {
    let (state, _, _, expensive_id) = seeded().await;
    let token = state.admin_token().await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<MessageResponse>) = delete_json(
        &app,
        &format!("/api/productdescription/{}", expensive_id),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().message, "Product deleted");
    assert!(state.db.stored_product(expensive_id).await.is_none());
}

// ============================================================================
// Staff stock management
// ============================================================================

#[tokio::test]
async fn test_employee_sets_quantity_and_evidence_names_them() {
    let (state, hobbit_id, ..) = seeded().await;
    let (employee, token) = state
        .login_as("clerk@bookstore.test", Role::Employee)
        .await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<SuccessResponse<ProductDetail>>) = put_empty(
        &app,
        &format!("/api/productdescription/{}/12", hobbit_id),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().data.available_quantity, 12);

    let (status, body): (StatusCode, Option<SuccessResponse<Vec<ProductEvidence>>>) = get_json(
        &app,
        &format!("/api/productdescription/{}/evidences", hobbit_id),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let evidences = body.unwrap().data;
    assert_eq!(evidences.len(), 1);
    assert_eq!(evidences[0].email, employee.email);
    assert_eq!(evidences[0].role, "employee");
    assert_eq!(evidences[0].change_description, "Quantity updated from 5 to 12.");
}

#[tokio::test]
async fn test_negative_quantity_returns_400() {
    let (state, hobbit_id, ..) = seeded().await;
    let token = state.employee_token().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = put_empty(
        &app,
        &format!("/api/productdescription/{}/-1", hobbit_id),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_evidences_hidden_from_customers() {
    let (state, hobbit_id, ..) = seeded().await;
    let (_, token) = state.login_as("reader@example.com", Role::User).await;
    let app = build_test_router(state);

    let (status, body) = send_raw(
        &app,
        Method::GET,
        &format!("/api/productdescription/{}/evidences", hobbit_id),
        Some(&token),
        "",
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_employee_cannot_create_products() {
    let state = TestAppState::new();
    let token = state.employee_token().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/productdescription",
        Some(&token),
        &product_input("Sneaky", 1.0, 1),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
