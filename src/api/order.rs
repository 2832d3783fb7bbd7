//! Order endpoints

use crate::api::{MessageResponse, SuccessResponse};
use crate::domain::{CreateOrderInput, CreatedOrder, OrderDetail, OrderPreview, UpdateOrderStatusInput};
use crate::error::Result;
use crate::middleware::auth::{AuthUser, OptionalAuth};
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/order/all",
    tag = "Orders",
    security(("bearer_jwt" = [])),
    responses((status = 200, description = "All orders", body = Vec<OrderPreview>))
)]
pub async fn list_all<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let orders = state.order_service().list_all().await?;
    Ok(Json(SuccessResponse::new(orders)))
}

#[utoipa::path(
    get,
    path = "/api/order/byEmail/{email}",
    tag = "Orders",
    security(("bearer_jwt" = [])),
    params(("email" = String, Path, description = "Contact or account email")),
    responses((status = 200, description = "Matching orders", body = Vec<OrderPreview>))
)]
pub async fn by_email<S: HasServices>(
    State(state): State<S>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse> {
    let orders = state.order_service().list_by_email(&email).await?;
    Ok(Json(SuccessResponse::new(orders)))
}

#[utoipa::path(
    get,
    path = "/api/order",
    tag = "Orders",
    security(("bearer_jwt" = [])),
    responses((status = 200, description = "The caller's orders", body = Vec<OrderPreview>))
)]
pub async fn list_own<S: HasServices>(
    State(state): State<S>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse> {
    let orders = state.order_service().list_own(&actor).await?;
    Ok(Json(SuccessResponse::new(orders)))
}

#[utoipa::path(
    get,
    path = "/api/order/{id}",
    tag = "Orders",
    security(("bearer_jwt" = [])),
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with items and history", body = OrderDetail),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let order = state.order_service().get(id, &actor).await?;
    Ok(Json(SuccessResponse::new(order)))
}

#[utoipa::path(
    post,
    path = "/api/order/create",
    tag = "Orders",
    request_body = CreateOrderInput,
    responses(
        (status = 201, description = "Order placed", body = CreatedOrder),
        (status = 400, description = "Invalid amount or not enough items in stock"),
        (status = 404, description = "Product not found")
    )
)]
/// Place an order; linked to the caller when a valid token is sent
pub async fn create<S: HasServices>(
    State(state): State<S>,
    OptionalAuth(auth): OptionalAuth,
    Json(input): Json<CreateOrderInput>,
) -> Result<impl IntoResponse> {
    let buyer = auth.map(|AuthUser(actor)| actor);
    let created = state.order_service().create(input, buyer.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(created))))
}

#[utoipa::path(
    put,
    path = "/api/order/update",
    tag = "Orders",
    security(("bearer_jwt" = [])),
    request_body = UpdateOrderStatusInput,
    responses(
        (status = 200, description = "Status changed", body = OrderDetail),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    AuthUser(actor): AuthUser,
    Json(input): Json<UpdateOrderStatusInput>,
) -> Result<impl IntoResponse> {
    let order = state.order_service().update_status(input, &actor).await?;
    Ok(Json(SuccessResponse::new(order)))
}

#[utoipa::path(
    delete,
    path = "/api/order/{id}",
    tag = "Orders",
    security(("bearer_jwt" = [])),
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted", body = MessageResponse),
        (status = 404, description = "Order not found")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.order_service().delete(id).await?;
    Ok(Json(MessageResponse::new("Order deleted")))
}
