//! Discount endpoints

use crate::api::{MessageResponse, SuccessResponse};
use crate::domain::{Discount, DiscountInput};
use crate::error::Result;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/discount",
    tag = "Catalog",
    responses((status = 200, description = "All discounts", body = Vec<Discount>))
)]
pub async fn list<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let discounts = state.catalog_service().list_discounts().await?;
    Ok(Json(SuccessResponse::new(discounts)))
}

#[utoipa::path(
    post,
    path = "/api/discount",
    tag = "Catalog",
    security(("bearer_jwt" = [])),
    request_body = DiscountInput,
    responses(
        (status = 201, description = "Discount created", body = Discount),
        (status = 400, description = "Value outside 0..=100"),
        (status = 409, description = "Discount already exists")
    )
)]
pub async fn create<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<DiscountInput>,
) -> Result<impl IntoResponse> {
    let discount = state.catalog_service().create_discount(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(discount))))
}

#[utoipa::path(
    delete,
    path = "/api/discount/{value}",
    tag = "Catalog",
    security(("bearer_jwt" = [])),
    params(("value" = i32, Path, description = "Discount percentage")),
    responses(
        (status = 200, description = "Discount deleted", body = MessageResponse),
        (status = 404, description = "Discount not found")
    )
)]
pub async fn delete_by_value<S: HasServices>(
    State(state): State<S>,
    Path(value): Path<i32>,
) -> Result<impl IntoResponse> {
    state.catalog_service().delete_discount_by_value(value).await?;
    Ok(Json(MessageResponse::new("Discount deleted")))
}

#[utoipa::path(
    delete,
    path = "/api/discount",
    tag = "Catalog",
    security(("bearer_jwt" = [])),
    request_body = DiscountInput,
    responses(
        (status = 200, description = "Discount deleted", body = MessageResponse),
        (status = 404, description = "Discount not found")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<DiscountInput>,
) -> Result<impl IntoResponse> {
    state
        .catalog_service()
        .delete_discount_by_value(input.percent)
        .await?;
    Ok(Json(MessageResponse::new("Discount deleted")))
}
