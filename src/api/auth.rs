//! Login, registration and token renewal

use crate::api::SuccessResponse;
use crate::domain::{LoginInput, RegisterInput, TokenResponse, UserOverview};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::state::HasServices;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::debug;

#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Session token issued", body = TokenResponse),
        (status = 400, description = "Unknown user or wrong password")
    )
)]
/// Exchange email and password for a session token
pub async fn login<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse> {
    let token = state.user_service().login(input).await?;
    Ok(Json(SuccessResponse::new(token)))
}

#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Auth",
    request_body = RegisterInput,
    responses(
        (status = 201, description = "User registered", body = UserOverview),
        (status = 409, description = "Email already registered")
    )
)]
/// Register a new customer account
pub async fn register<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<RegisterInput>,
) -> Result<impl IntoResponse> {
    let user = state.user_service().register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::new(UserOverview::from(&user))),
    ))
}

#[utoipa::path(
    post,
    path = "/api/renewToken",
    tag = "Auth",
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "Fresh session token", body = TokenResponse),
        (status = 401, description = "Not authenticated")
    )
)]
/// Issue a fresh token for the caller
pub async fn renew_token<S: HasServices>(
    State(state): State<S>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse> {
    let user = state.user_service().get(actor.user_id).await?;
    let token = state.user_service().issue_token(&user)?;
    debug!(user_id = user.id, "Session token renewed");
    Ok(Json(SuccessResponse::new(token)))
}
