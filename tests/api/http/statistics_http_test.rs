//! Statistics API HTTP Handler Tests

use super::{build_test_router, post_json, send_raw, TestAppState};
use crate::api::product_input;
use axum::http::{Method, StatusCode};
use bookstore_core::api::SuccessResponse;
use bookstore_core::domain::{
    CreatedOrder, IncomeStatistics, RankingStatistics, Role, SalesStatistics,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

fn this_week() -> Value {
    let now = Utc::now();
    json!({
        "from_date": (now - Duration::days(3)).to_rfc3339(),
        "to_date": (now + Duration::days(3)).to_rfc3339(),
    })
}

/// Two orders: 2x "Dune" and 1x "Dune" + 1x "Emma"
async fn with_sales() -> (TestAppState, String) {
    let state = TestAppState::new();
    let scifi = state.db.add_category("Sci-Fi").await;
    let classics = state.db.add_category("Classics").await;
    let mut dune = product_input("Dune", 10.0, 10);
    dune.category_ids = vec![scifi.id];
    let dune_id = state.db.add_product(dune).await;
    let mut emma = product_input("Emma", 5.0, 10);
    emma.category_ids = vec![classics.id];
    let emma_id = state.db.add_product(emma).await;

    let token = state.admin_token().await;
    let app = build_test_router(state.clone());
    for items in [
        json!([{ "id": dune_id, "amount": 2 }]),
        json!([{ "id": dune_id, "amount": 1 }, { "id": emma_id, "amount": 1 }]),
    ] {
        let (status, _): (StatusCode, Option<SuccessResponse<CreatedOrder>>) = post_json(
            &app,
            "/api/order/create",
            None,
            &json!({
                "items": items,
                "order_user_info": {
                    "firstname": "Jan",
                    "surname": "Novak",
                    "email": "jan@example.com"
                }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    (state, token)
}

#[tokio::test]
async fn test_sales_in_time_counts_orders() {
    let (state, token) = with_sales().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<SuccessResponse<SalesStatistics>>) = post_json(
        &app,
        "/api/statistics/allSalesInTime",
        Some(&token),
        &this_week(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let stats = body.unwrap().data;
    assert_eq!(stats.total, 2);
    assert_eq!(stats.per_day.len(), 1);
    assert_eq!(stats.per_day[0].occurence, 2);
}

#[tokio::test]
async fn test_income_in_time_sums_totals() {
    let (state, token) = with_sales().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<SuccessResponse<IncomeStatistics>>) = post_json(
        &app,
        "/api/statistics/incomePerTime",
        Some(&token),
        &this_week(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().data.total, 35.0);
}

#[tokio::test]
async fn test_most_sold_categories_ranked() {
    let (state, token) = with_sales().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<SuccessResponse<RankingStatistics>>) = post_json(
        &app,
        "/api/statistics/mostSoldCategories",
        Some(&token),
        &this_week(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let stats = body.unwrap().data;
    assert_eq!(stats.per_day[0].name, "Sci-Fi");
    assert_eq!(stats.per_day[0].occurence, 2);
    assert_eq!(stats.total, 3);
}

#[tokio::test]
async fn test_most_sold_items_ranked() {
    let (state, token) = with_sales().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<SuccessResponse<RankingStatistics>>) = post_json(
        &app,
        "/api/statistics/mostSoldItems",
        Some(&token),
        &this_week(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<String> = body.unwrap().data.per_day.into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["Dune".to_string(), "Emma".to_string()]);
}

#[tokio::test]
async fn test_range_outside_sales_is_empty() {
    let (state, token) = with_sales().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<SuccessResponse<SalesStatistics>>) = post_json(
        &app,
        "/api/statistics/allSalesInTime",
        Some(&token),
        &json!({ "from_date": "2001-01-01T00:00:00", "to_date": "2001-12-31T23:59:59" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let stats = body.unwrap().data;
    assert_eq!(stats.total, 0);
    assert!(stats.per_day.is_empty());
}

#[tokio::test]
async fn test_reversed_range_returns_400() {
    let state = TestAppState::new();
    let token = state.admin_token().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/statistics/incomePerTime",
        Some(&token),
        &json!({ "from_date": "2024-02-01T00:00:00", "to_date": "2024-01-01T00:00:00" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["message"], "Invalid request!");
}

#[tokio::test]
async fn test_missing_bound_returns_400() {
    let state = TestAppState::new();
    let token = state.admin_token().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/statistics/mostSoldItems",
        Some(&token),
        &json!({ "from_date": "2024-01-01T00:00:00" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_statistics_are_admin_only() {
    let state = TestAppState::new();
    let (_, token) = state.login_as("clerk@bookstore.test", Role::Employee).await;
    let app = build_test_router(state);

    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/api/statistics/allSalesInTime",
        Some(&token),
        &this_week().to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.is_empty());
}
