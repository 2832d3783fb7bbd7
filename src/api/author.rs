//! Book author endpoints

use crate::api::{MessageResponse, SuccessResponse};
use crate::domain::{AuthorInput, BookAuthor};
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
    path = "/api/bookauthor",
    tag = "Catalog",
    responses((status = 200, description = "All authors", body = Vec<BookAuthor>))
)]
pub async fn list<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let authors = state.catalog_service().list_authors().await?;
    Ok(Json(SuccessResponse::new(authors)))
}

#[utoipa::path(
    get,
    path = "/api/bookauthor/{id}",
    tag = "Catalog",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author", body = BookAuthor),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let author = state.catalog_service().get_author(id).await?;
    Ok(Json(SuccessResponse::new(author)))
}

#[utoipa::path(
    post,
    path = "/api/bookauthor",
    tag = "Catalog",
    security(("bearer_jwt" = [])),
    request_body = AuthorInput,
    responses(
        (status = 201, description = "Author created", body = BookAuthor),
        (status = 409, description = "Author already exists")
    )
)]
pub async fn create<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<AuthorInput>,
) -> Result<impl IntoResponse> {
    let author = state.catalog_service().create_author(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(author))))
}

#[utoipa::path(
    put,
    path = "/api/bookauthor/{id}",
    tag = "Catalog",
    security(("bearer_jwt" = [])),
    params(("id" = i64, Path, description = "Author id")),
    request_body = AuthorInput,
    responses(
        (status = 200, description = "Author updated", body = BookAuthor),
        (status = 400, description = "Unknown author")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
    Json(input): Json<AuthorInput>,
) -> Result<impl IntoResponse> {
    let author = state.catalog_service().update_author(id, input).await?;
    Ok(Json(SuccessResponse::new(author)))
}

#[utoipa::path(
    delete,
    path = "/api/bookauthor/{id}",
    tag = "Catalog",
    security(("bearer_jwt" = [])),
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author deleted", body = MessageResponse),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.catalog_service().delete_author(id).await?;
    Ok(Json(MessageResponse::new("Author deleted")))
}

#[utoipa::path(
    delete,
    path = "/api/bookauthor",
    tag = "Catalog",
    security(("bearer_jwt" = [])),
    request_body = AuthorInput,
    responses(
        (status = 200, description = "Author deleted", body = MessageResponse),
        (status = 404, description = "Author not found")
    )
)]
/// Delete the author matching the given first and last name
pub async fn delete_by_name<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<AuthorInput>,
) -> Result<impl IntoResponse> {
    state.catalog_service().delete_author_by_name(input).await?;
    Ok(Json(MessageResponse::new("Author deleted")))
}
