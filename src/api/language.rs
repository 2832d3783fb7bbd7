//! Language endpoints

use crate::api::{MessageResponse, SuccessResponse};
use crate::domain::{Language, LanguageInput};
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
    path = "/api/language",
    tag = "Catalog",
    responses((status = 200, description = "All languages", body = Vec<Language>))
)]
pub async fn list<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let languages = state.catalog_service().list_languages().await?;
    Ok(Json(SuccessResponse::new(languages)))
}

#[utoipa::path(
    get,
    path = "/api/language/{id}",
    tag = "Catalog",
    params(("id" = i64, Path, description = "Language id")),
    responses(
        (status = 200, description = "Language", body = Language),
        (status = 404, description = "Language not found")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let language = state.catalog_service().get_language(id).await?;
    Ok(Json(SuccessResponse::new(language)))
}

#[utoipa::path(
    post,
    path = "/api/language",
    tag = "Catalog",
    security(("bearer_jwt" = [])),
    request_body = LanguageInput,
    responses(
        (status = 201, description = "Language created", body = Language),
        (status = 409, description = "Language already exists")
    )
)]
pub async fn create<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<LanguageInput>,
) -> Result<impl IntoResponse> {
    let language = state.catalog_service().create_language(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(language))))
}

#[utoipa::path(
    put,
    path = "/api/language/{id}",
    tag = "Catalog",
    security(("bearer_jwt" = [])),
    params(("id" = i64, Path, description = "Language id")),
    request_body = LanguageInput,
    responses(
        (status = 200, description = "Language updated", body = Language),
        (status = 404, description = "Language not found")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
    Json(input): Json<LanguageInput>,
) -> Result<impl IntoResponse> {
    let language = state.catalog_service().update_language(id, input).await?;
    Ok(Json(SuccessResponse::new(language)))
}

#[utoipa::path(
    delete,
    path = "/api/language/{id}",
    tag = "Catalog",
    security(("bearer_jwt" = [])),
    params(("id" = i64, Path, description = "Language id")),
    responses(
        (status = 200, description = "Language deleted", body = MessageResponse),
        (status = 404, description = "Language not found")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.catalog_service().delete_language(id).await?;
    Ok(Json(MessageResponse::new("Language deleted")))
}

#[utoipa::path(
    delete,
    path = "/api/language",
    tag = "Catalog",
    security(("bearer_jwt" = [])),
    request_body = LanguageInput,
    responses(
        (status = 200, description = "Language deleted", body = MessageResponse),
        (status = 404, description = "Language not found")
    )
)]
pub async fn delete_by_name<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<LanguageInput>,
) -> Result<impl IntoResponse> {
    state
        .catalog_service()
        .delete_language_by_name(&input.language)
        .await?;
    Ok(Json(MessageResponse::new("Language deleted")))
}
