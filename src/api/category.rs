//! Category endpoints

use crate::api::{MessageResponse, SuccessResponse};
use crate::domain::{Category, CategoryInput, CategoryNameInput};
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
    path = "/api/category",
    tag = "Catalog",
    responses((status = 200, description = "All categories", body = Vec<Category>))
)]
pub async fn list<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let categories = state.catalog_service().list_categories().await?;
    Ok(Json(SuccessResponse::new(categories)))
}

#[utoipa::path(
    get,
    path = "/api/category/{id}",
    tag = "Catalog",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let category = state.catalog_service().get_category(id).await?;
    Ok(Json(SuccessResponse::new(category)))
}

#[utoipa::path(
    post,
    path = "/api/category",
    tag = "Catalog",
    security(("bearer_jwt" = [])),
    request_body = CategoryInput,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 409, description = "Category already exists")
    )
)]
pub async fn create<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<CategoryInput>,
) -> Result<impl IntoResponse> {
    let category = state.catalog_service().create_category(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(category))))
}

#[utoipa::path(
    put,
    path = "/api/category/{id}",
    tag = "Catalog",
    security(("bearer_jwt" = [])),
    params(("id" = i64, Path, description = "Category id")),
    request_body = CategoryInput,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Name taken by another category")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
    Json(input): Json<CategoryInput>,
) -> Result<impl IntoResponse> {
    let category = state.catalog_service().update_category(id, input).await?;
    Ok(Json(SuccessResponse::new(category)))
}

#[utoipa::path(
    delete,
    path = "/api/category/{id}",
    tag = "Catalog",
    security(("bearer_jwt" = [])),
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 400, description = "Category is used in a product"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.catalog_service().delete_category(id).await?;
    Ok(Json(MessageResponse::new("Category deleted")))
}

#[utoipa::path(
    delete,
    path = "/api/category",
    tag = "Catalog",
    security(("bearer_jwt" = [])),
    request_body = CategoryNameInput,
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 400, description = "Category is used in a product"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_by_name<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<CategoryNameInput>,
) -> Result<impl IntoResponse> {
    state
        .catalog_service()
        .delete_category_by_name(&input.name)
        .await?;
    Ok(Json(MessageResponse::new("Category deleted")))
}
