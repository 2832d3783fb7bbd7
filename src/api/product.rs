//! Catalog item endpoints
//!
//! Reads are public. Quantity changes are open to staff, every other write
//! to admins. Each write made on behalf of a user leaves an evidence row.

use crate::api::{MessageResponse, SuccessResponse};
use crate::domain::{ProductDetail, ProductEvidence, ProductFilter, ProductInput, SearchQuery};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/productdescription",
    tag = "Products",
    responses((status = 200, description = "All products", body = Vec<ProductDetail>))
)]
pub async fn list<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let products = state.product_service().list().await?;
    Ok(Json(SuccessResponse::new(products)))
}

#[utoipa::path(
    get,
    path = "/api/productdescription/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ProductDetail),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let product = state.product_service().get(id).await?;
    Ok(Json(SuccessResponse::new(product)))
}

#[utoipa::path(
    get,
    path = "/api/productdescription/{id}/evidences",
    tag = "Products",
    security(("bearer_jwt" = [])),
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Audit trail", body = Vec<ProductEvidence>),
        (status = 404, description = "Product not found")
    )
)]
pub async fn evidences<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let evidences = state.product_service().list_evidences(id).await?;
    Ok(Json(SuccessResponse::new(evidences)))
}

#[utoipa::path(
    post,
    path = "/api/productdescription/search",
    tag = "Products",
    request_body = SearchQuery,
    responses((status = 200, description = "Matching products", body = Vec<ProductDetail>))
)]
pub async fn search<S: HasServices>(
    State(state): State<S>,
    Json(query): Json<SearchQuery>,
) -> Result<impl IntoResponse> {
    let products = state.product_service().search(&query.query).await?;
    Ok(Json(SuccessResponse::new(products)))
}

#[utoipa::path(
    post,
    path = "/api/productdescription/filter",
    tag = "Products",
    request_body = ProductFilter,
    responses((status = 200, description = "Matching products", body = Vec<ProductDetail>))
)]
pub async fn filter<S: HasServices>(
    State(state): State<S>,
    Json(filter): Json<ProductFilter>,
) -> Result<impl IntoResponse> {
    let products = state.product_service().filter(&filter).await?;
    Ok(Json(SuccessResponse::new(products)))
}

#[utoipa::path(
    post,
    path = "/api/productdescription",
    tag = "Products",
    security(("bearer_jwt" = [])),
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = ProductDetail),
        (status = 404, description = "Referenced author, language, discount or category not found"),
        (status = 409, description = "Product name taken")
    )
)]
pub async fn create<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<ProductInput>,
) -> Result<impl IntoResponse> {
    let product = state.product_service().create(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(product))))
}

#[utoipa::path(
    put,
    path = "/api/productdescription/{id}",
    tag = "Products",
    security(("bearer_jwt" = [])),
    params(("id" = i64, Path, description = "Product id")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = ProductDetail),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product name taken")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<ProductInput>,
) -> Result<impl IntoResponse> {
    let product = state.product_service().update(id, input, &actor).await?;
    Ok(Json(SuccessResponse::new(product)))
}

#[utoipa::path(
    put,
    path = "/api/productdescription/{id}/discount/{value}",
    tag = "Products",
    security(("bearer_jwt" = [])),
    params(
        ("id" = i64, Path, description = "Product id"),
        ("value" = i32, Path, description = "Discount percentage")
    ),
    responses(
        (status = 200, description = "Discount applied", body = ProductDetail),
        (status = 400, description = "Value outside 0..=100"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn set_discount<S: HasServices>(
    State(state): State<S>,
    AuthUser(actor): AuthUser,
    Path((id, value)): Path<(i64, i32)>,
) -> Result<impl IntoResponse> {
    let product = state
        .product_service()
        .set_discount(id, value, &actor)
        .await?;
    Ok(Json(SuccessResponse::new(product)))
}

#[utoipa::path(
    put,
    path = "/api/productdescription/{id}/{amount}",
    tag = "Products",
    security(("bearer_jwt" = [])),
    params(
        ("id" = i64, Path, description = "Product id"),
        ("amount" = i32, Path, description = "New available quantity")
    ),
    responses(
        (status = 200, description = "Quantity updated", body = ProductDetail),
        (status = 400, description = "Negative quantity"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn set_quantity<S: HasServices>(
    State(state): State<S>,
    AuthUser(actor): AuthUser,
    Path((id, amount)): Path<(i64, i32)>,
) -> Result<impl IntoResponse> {
    let product = state
        .product_service()
        .set_quantity(id, amount, &actor)
        .await?;
    Ok(Json(SuccessResponse::new(product)))
}

#[utoipa::path(
    delete,
    path = "/api/productdescription/{id}",
    tag = "Products",
    security(("bearer_jwt" = [])),
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.product_service().delete(id).await?;
    Ok(Json(MessageResponse::new("Product deleted")))
}
