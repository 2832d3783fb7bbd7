//! Sales statistics endpoints (admin only)

use crate::api::SuccessResponse;
use crate::domain::{IncomeStatistics, RankingStatistics, SalesStatistics, StatisticsRequest};
use crate::error::Result;
use crate::state::HasServices;
use axum::{extract::State, response::IntoResponse, Json};

#[utoipa::path(
    post,
    path = "/api/statistics/allSalesInTime",
    tag = "Statistics",
    security(("bearer_jwt" = [])),
    request_body = StatisticsRequest,
    responses(
        (status = 200, description = "Orders per day", body = SalesStatistics),
        (status = 400, description = "Invalid date range")
    )
)]
pub async fn sales_in_time<S: HasServices>(
    State(state): State<S>,
    Json(request): Json<StatisticsRequest>,
) -> Result<impl IntoResponse> {
    let stats = state.statistics_service().sales_in_time(&request).await?;
    Ok(Json(SuccessResponse::new(stats)))
}

#[utoipa::path(
    post,
    path = "/api/statistics/incomePerTime",
    tag = "Statistics",
    security(("bearer_jwt" = [])),
    request_body = StatisticsRequest,
    responses(
        (status = 200, description = "Income per day", body = IncomeStatistics),
        (status = 400, description = "Invalid date range")
    )
)]
pub async fn income_in_time<S: HasServices>(
    State(state): State<S>,
    Json(request): Json<StatisticsRequest>,
) -> Result<impl IntoResponse> {
    let stats = state.statistics_service().income_in_time(&request).await?;
    Ok(Json(SuccessResponse::new(stats)))
}

#[utoipa::path(
    post,
    path = "/api/statistics/mostSoldCategories",
    tag = "Statistics",
    security(("bearer_jwt" = [])),
    request_body = StatisticsRequest,
    responses(
        (status = 200, description = "Sales per category", body = RankingStatistics),
        (status = 400, description = "Invalid date range")
    )
)]
pub async fn most_sold_categories<S: HasServices>(
    State(state): State<S>,
    Json(request): Json<StatisticsRequest>,
) -> Result<impl IntoResponse> {
    let stats = state
        .statistics_service()
        .most_sold_categories(&request)
        .await?;
    Ok(Json(SuccessResponse::new(stats)))
}

#[utoipa::path(
    post,
    path = "/api/statistics/mostSoldItems",
    tag = "Statistics",
    security(("bearer_jwt" = [])),
    request_body = StatisticsRequest,
    responses(
        (status = 200, description = "Best-selling items", body = RankingStatistics),
        (status = 400, description = "Invalid date range")
    )
)]
pub async fn most_sold_items<S: HasServices>(
    State(state): State<S>,
    Json(request): Json<StatisticsRequest>,
) -> Result<impl IntoResponse> {
    let stats = state.statistics_service().most_sold_items(&request).await?;
    Ok(Json(SuccessResponse::new(stats)))
}
