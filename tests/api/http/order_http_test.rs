//! Order API HTTP Handler Tests

use super::{
    build_test_router, delete_json, get_json, post_json, put_json, send_raw, TestAppState,
};
use crate::api::product_input;
use axum::http::{Method, StatusCode};
use bookstore_core::api::{MessageResponse, SuccessResponse};
use bookstore_core::domain::{
    CreatedOrder, OrderDetail, OrderPreview, OrderStatus, ProductDetail, Role,
};
use serde_json::{json, Value};

fn order_body(items: Value) -> Value {
    json!({
        "items": items,
        "user_address": { "town": "Brno", "street": "Kolejni", "street_number": "2" },
        "delivery_address": { "town": "Praha", "street": "Narodni", "street_number": "1" },
        "order_user_info": {
            "firstname": "Jan",
            "surname": "Novak",
            "phone": "+420111222333",
            "email": "jan@example.com"
        }
    })
}

async fn stocked() -> (TestAppState, i64, i64) {
    let state = TestAppState::new();
    let author = state.db.add_author("Karel", "Capek").await;
    let category = state.db.add_category("Drama").await;
    let mut rur = product_input("R.U.R.", 10.0, 5);
    rur.author_id = Some(author.id);
    rur.category_ids = vec![category.id];
    let rur_id = state.db.add_product(rur).await;
    let cheap_id = state.db.add_product(product_input("Pamphlet", 2.5, 1)).await;
    (state, rur_id, cheap_id)
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_anonymous_order_decrements_stock() {
    let (state, rur_id, cheap_id) = stocked().await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<SuccessResponse<CreatedOrder>>) = post_json(
        &app,
        "/api/order/create",
        None,
        &order_body(json!([{ "id": rur_id, "amount": 2 }, { "id": cheap_id, "amount": 1 }])),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let order_id = body.unwrap().data.id;

    assert_eq!(state.db.stored_product(rur_id).await.unwrap().available_quantity, 3);
    assert_eq!(state.db.stored_product(cheap_id).await.unwrap().available_quantity, 0);

    let orders = state.db.orders.read().await;
    let order = orders.iter().find(|o| o.id == order_id).unwrap();
    assert_eq!(order.status, OrderStatus::InProgress);
    assert_eq!(order.total_price, 22.5);
    assert_eq!(order.registered_user_id, None);
    assert_eq!(order.delivery_address.town.as_deref(), Some("Praha"));
}

#[tokio::test]
async fn test_order_snapshots_item_details() {
    let (state, rur_id, _) = stocked().await;
    let token = state.admin_token().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<SuccessResponse<CreatedOrder>>) = post_json(
        &app,
        "/api/order/create",
        None,
        &order_body(json!([{ "id": rur_id, "amount": 1 }])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let order_id = body.unwrap().data.id;

    // Reprice the product after the sale
    let (_, product): (StatusCode, Option<SuccessResponse<ProductDetail>>) = get_json(
        &app,
        &format!("/api/productdescription/{}", rur_id),
        None,
    )
    .await;
    let product = product.unwrap().data;
    let mut update = product_input("R.U.R.", 99.0, product.available_quantity);
    update.author_id = product.author.as_ref().map(|a| a.id);
    update.category_ids = product.categories.iter().map(|c| c.id).collect();

    let (status, _): (StatusCode, Option<SuccessResponse<ProductDetail>>) = put_json(
        &app,
        &format!("/api/productdescription/{}", rur_id),
        Some(&token),
        &update,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body): (StatusCode, Option<SuccessResponse<OrderDetail>>) =
        get_json(&app, &format!("/api/order/{}", order_id), Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    let items = body.unwrap().data.items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "R.U.R.");
    assert_eq!(items[0].author.as_deref(), Some("Karel Capek"));
    assert_eq!(items[0].categories, "Drama");
    assert_eq!(items[0].unit_price, 10.0);
}

#[tokio::test]
async fn test_duplicate_lines_are_merged() {
    let (state, rur_id, _) = stocked().await;
    let app = build_test_router(state.clone());

    let (status, _): (StatusCode, Option<SuccessResponse<CreatedOrder>>) = post_json(
        &app,
        "/api/order/create",
        None,
        &order_body(json!([{ "id": rur_id, "amount": 2 }, { "id": rur_id, "amount": 1 }])),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let items = state.db.order_items.read().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 3);
}

#[tokio::test]
async fn test_zero_amount_returns_400() {
    let (state, rur_id, _) = stocked().await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/order/create",
        None,
        &order_body(json!([{ "id": rur_id, "amount": 0 }])),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["message"], "Amount must be at least 1");
    assert!(state.db.orders.read().await.is_empty());
}

#[tokio::test]
async fn test_unknown_product_returns_404() {
    let (state, ..) = stocked().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/order/create",
        None,
        &order_body(json!([{ "id": 9999, "amount": 1 }])),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["message"], "Product not found");
}

#[tokio::test]
async fn test_out_of_stock_returns_400_and_keeps_stock() {
    let (state, rur_id, cheap_id) = stocked().await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/order/create",
        None,
        &order_body(json!([{ "id": rur_id, "amount": 1 }, { "id": cheap_id, "amount": 2 }])),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["message"], "Not enough items in stock");
    assert_eq!(state.db.stored_product(rur_id).await.unwrap().available_quantity, 5);
    assert!(state.db.orders.read().await.is_empty());
}

#[tokio::test]
async fn test_overflowing_merged_amount_returns_400_and_keeps_stock() {
    let (state, rur_id, _) = stocked().await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/order/create",
        None,
        &order_body(json!([
            { "id": rur_id, "amount": i32::MAX },
            { "id": rur_id, "amount": i32::MAX }
        ])),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["message"], "Not enough items in stock");
    assert_eq!(state.db.stored_product(rur_id).await.unwrap().available_quantity, 5);
    assert!(state.db.orders.read().await.is_empty());
}

#[tokio::test]
async fn test_empty_item_list_returns_400() {
    let (state, ..) = stocked().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) =
        post_json(&app, "/api/order/create", None, &order_body(json!([]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Customer reads
// ============================================================================

#[tokio::test]
async fn test_registered_order_shows_in_own_list() {
    let (state, rur_id, _) = stocked().await;
    let (user, token) = state.login_as("jan@example.com", Role::User).await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<SuccessResponse<CreatedOrder>>) = post_json(
        &app,
        "/api/order/create",
        Some(&token),
        &order_body(json!([{ "id": rur_id, "amount": 1 }])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let order_id = body.unwrap().data.id;

    let (status, body): (StatusCode, Option<SuccessResponse<Vec<OrderPreview>>>) =
        get_json(&app, "/api/order", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let own = body.unwrap().data;
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].id, order_id);

    let (status, body): (StatusCode, Option<SuccessResponse<OrderDetail>>) =
        get_json(&app, &format!("/api/order/{}", order_id), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let detail = body.unwrap().data;
    assert_eq!(detail.order.registered_user_id, Some(user.id));
    assert_eq!(detail.items.len(), 1);
    assert!(detail.modifications.is_empty());
}

#[tokio::test]
async fn test_foreign_order_is_not_found() {
    let (state, rur_id, _) = stocked().await;
    let (_, owner_token) = state.login_as("owner@example.com", Role::User).await;
    let (_, other_token) = state.login_as("other@example.com", Role::User).await;
    let app = build_test_router(state);

    let (_, body): (StatusCode, Option<SuccessResponse<CreatedOrder>>) = post_json(
        &app,
        "/api/order/create",
        Some(&owner_token),
        &order_body(json!([{ "id": rur_id, "amount": 1 }])),
    )
    .await;
    let order_id = body.unwrap().data.id;

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app, &format!("/api/order/{}", order_id), Some(&other_token)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_own_orders_require_token() {
    let app = build_test_router(TestAppState::new());

    let (status, body) = send_raw(&app, Method::GET, "/api/order", None, "").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.is_empty());
}

// ============================================================================
// Staff operations
// ============================================================================

#[tokio::test]
async fn test_staff_lists_all_and_by_email() {
    let (state, rur_id, cheap_id) = stocked().await;
    let token = state.employee_token().await;
    let app = build_test_router(state);

    for id in [rur_id, cheap_id] {
        let (status, _): (StatusCode, Option<SuccessResponse<CreatedOrder>>) = post_json(
            &app,
            "/api/order/create",
            None,
            &order_body(json!([{ "id": id, "amount": 1 }])),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body): (StatusCode, Option<SuccessResponse<Vec<OrderPreview>>>) =
        get_json(&app, "/api/order/all", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().data.len(), 2);

    let (status, body): (StatusCode, Option<SuccessResponse<Vec<OrderPreview>>>) =
        get_json(&app, "/api/order/byEmail/jan@example.com", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().data.len(), 2);

    let (status, body): (StatusCode, Option<SuccessResponse<Vec<OrderPreview>>>) =
        get_json(&app, "/api/order/byEmail/nobody@example.com", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.unwrap().data.is_empty());
}

#[tokio::test]
async fn test_customer_cannot_list_all_orders() {
    let state = TestAppState::new();
    let (_, token) = state.login_as("jan@example.com", Role::User).await;
    let app = build_test_router(state);

    let (status, _) = send_raw(&app, Method::GET, "/api/order/all", Some(&token), "").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_status_update_records_modification() {
    let (state, rur_id, _) = stocked().await;
    let (employee, token) = state
        .login_as("packer@bookstore.test", Role::Employee)
        .await;
    let app = build_test_router(state);

    let (_, body): (StatusCode, Option<SuccessResponse<CreatedOrder>>) = post_json(
        &app,
        "/api/order/create",
        None,
        &order_body(json!([{ "id": rur_id, "amount": 1 }])),
    )
    .await;
    let order_id = body.unwrap().data.id;

    let (status, body): (StatusCode, Option<SuccessResponse<OrderDetail>>) = put_json(
        &app,
        "/api/order/update",
        Some(&token),
        &json!({ "id": order_id, "status": "SHIPPED" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let detail = body.unwrap().data;
    assert_eq!(detail.order.status, OrderStatus::Shipped);
    assert_eq!(detail.modifications.len(), 1);
    assert_eq!(detail.modifications[0].to_status, OrderStatus::Shipped);
    assert_eq!(detail.modifications[0].email.as_deref(), Some(employee.email.as_str()));
}

#[tokio::test]
async fn test_status_update_unknown_status_returns_400() {
    let (state, ..) = stocked().await;
    let token = state.employee_token().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = put_json(
        &app,
        "/api/order/update",
        Some(&token),
        &json!({ "id": 1, "status": "TELEPORTED" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_update_unknown_order_returns_404() {
    let state = TestAppState::new();
    let token = state.employee_token().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = put_json(
        &app,
        "/api/order/update",
        Some(&token),
        &json!({ "id": 4040, "status": "PACKED" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_deletes_order_without_restocking() {
    let (state, rur_id, _) = stocked().await;
    let token = state.admin_token().await;
    let app = build_test_router(state.clone());

    let (_, body): (StatusCode, Option<SuccessResponse<CreatedOrder>>) = post_json(
        &app,
        "/api/order/create",
        None,
        &order_body(json!([{ "id": rur_id, "amount": 2 }])),
    )
    .await;
    let order_id = body.unwrap().data.id;

    let (status, body): (StatusCode, Option<MessageResponse>) =
        delete_json(&app, &format!("/api/order/{}", order_id), Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().message, "Order deleted");
    assert!(state.db.orders.read().await.is_empty());
    assert!(state.db.order_items.read().await.is_empty());
    assert_eq!(state.db.stored_product(rur_id).await.unwrap().available_quantity, 3);
}

#[tokio::test]
async fn test_delete_unknown_order_returns_404() {
    let state = TestAppState::new();
    let token = state.admin_token().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) =
        delete_json(&app, "/api/order/31337", Some(&token)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
