//! User profile, password, role and listing endpoints

use crate::api::{MessageResponse, SuccessResponse};
use crate::domain::{
    Address, ChangePasswordInput, RoleRequest, SetPasswordInput, UpdateProfileInput,
    UserOverview, UserProfile,
};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

// ==================== Roles ====================

#[utoipa::path(
    post,
    path = "/api/setRole/{role}",
    tag = "Users",
    security(("bearer_jwt" = [])),
    params(("role" = String, Path, description = "user, employee or admin")),
    request_body = RoleRequest,
    responses(
        (status = 200, description = "Role changed", body = MessageResponse),
        (status = 400, description = "Unknown user or role")
    )
)]
pub async fn set_role<S: HasServices>(
    State(state): State<S>,
    Path(role): Path<String>,
    Json(input): Json<RoleRequest>,
) -> Result<impl IntoResponse> {
    let message = state.user_service().set_role(&role, &input.email).await?;
    Ok(Json(MessageResponse::new(message)))
}

// ==================== Listings ====================

#[utoipa::path(
    get,
    path = "/api/users/getEmployees",
    tag = "Users",
    security(("bearer_jwt" = [])),
    responses((status = 200, description = "Employees and admins", body = Vec<UserOverview>))
)]
pub async fn employees<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let users = state.user_service().list_employees().await?;
    Ok(Json(SuccessResponse::new(users)))
}

#[utoipa::path(
    get,
    path = "/api/users/getEmployeesByName/{name}",
    tag = "Users",
    security(("bearer_jwt" = [])),
    params(("name" = String, Path, description = "Surname fragment")),
    responses((status = 200, description = "Matching employees", body = Vec<UserOverview>))
)]
pub async fn employees_by_name<S: HasServices>(
    State(state): State<S>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse> {
    let users = state.user_service().employees_by_surname(&name).await?;
    Ok(Json(SuccessResponse::new(users)))
}

#[utoipa::path(
    get,
    path = "/api/users/getUsersByName/{name}",
    tag = "Users",
    security(("bearer_jwt" = [])),
    params(("name" = String, Path, description = "Surname fragment")),
    responses((status = 200, description = "Matching customers", body = Vec<UserOverview>))
)]
pub async fn users_by_name<S: HasServices>(
    State(state): State<S>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse> {
    let users = state.user_service().users_by_surname(&name).await?;
    Ok(Json(SuccessResponse::new(users)))
}

#[utoipa::path(
    get,
    path = "/api/users/getEmployeesByEmail/{email}",
    tag = "Users",
    security(("bearer_jwt" = [])),
    params(("email" = String, Path, description = "Email fragment")),
    responses((status = 200, description = "Matching employees", body = Vec<UserOverview>))
)]
pub async fn employees_by_email<S: HasServices>(
    State(state): State<S>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse> {
    let users = state.user_service().employees_by_email(&email).await?;
    Ok(Json(SuccessResponse::new(users)))
}

#[utoipa::path(
    get,
    path = "/api/users/getUsersByEmail/{email}",
    tag = "Users",
    security(("bearer_jwt" = [])),
    params(("email" = String, Path, description = "Email fragment")),
    responses((status = 200, description = "Matching customers", body = Vec<UserOverview>))
)]
pub async fn users_by_email<S: HasServices>(
    State(state): State<S>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse> {
    let users = state.user_service().users_by_email(&email).await?;
    Ok(Json(SuccessResponse::new(users)))
}

// ==================== Profiles ====================

#[utoipa::path(
    get,
    path = "/api/user",
    tag = "Users",
    security(("bearer_jwt" = [])),
    responses((status = 200, description = "The caller's profile", body = UserProfile))
)]
pub async fn get_own<S: HasServices>(
    State(state): State<S>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse> {
    let user = state.user_service().get(actor.user_id).await?;
    Ok(Json(SuccessResponse::new(UserProfile::from(&user))))
}

#[utoipa::path(
    put,
    path = "/api/user",
    tag = "Users",
    security(("bearer_jwt" = [])),
    request_body = UpdateProfileInput,
    responses(
        (status = 200, description = "Profile updated", body = UserProfile),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_own<S: HasServices>(
    State(state): State<S>,
    AuthUser(actor): AuthUser,
    Json(input): Json<UpdateProfileInput>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service()
        .update_profile(actor.user_id, input)
        .await?;
    Ok(Json(SuccessResponse::new(UserProfile::from(&user))))
}

#[utoipa::path(
    get,
    path = "/api/user/{id}",
    tag = "Users",
    security(("bearer_jwt" = [])),
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 404, description = "User not found")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let user = state.user_service().get(id).await?;
    Ok(Json(SuccessResponse::new(UserProfile::from(&user))))
}

#[utoipa::path(
    put,
    path = "/api/user/{id}",
    tag = "Users",
    security(("bearer_jwt" = [])),
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateProfileInput,
    responses(
        (status = 200, description = "Profile updated", body = UserProfile),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateProfileInput>,
) -> Result<impl IntoResponse> {
    let user = state.user_service().update_profile(id, input).await?;
    Ok(Json(SuccessResponse::new(UserProfile::from(&user))))
}

// ==================== Passwords ====================

#[utoipa::path(
    put,
    path = "/api/user/password",
    tag = "Users",
    security(("bearer_jwt" = [])),
    request_body = ChangePasswordInput,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 403, description = "Wrong old password")
    )
)]
pub async fn change_own_password<S: HasServices>(
    State(state): State<S>,
    AuthUser(actor): AuthUser,
    Json(input): Json<ChangePasswordInput>,
) -> Result<impl IntoResponse> {
    state
        .user_service()
        .change_password(actor.user_id, input)
        .await?;
    Ok(Json(MessageResponse::new("Password changed")))
}

#[utoipa::path(
    put,
    path = "/api/user/password/{id}",
    tag = "Users",
    security(("bearer_jwt" = [])),
    params(("id" = i64, Path, description = "User id")),
    request_body = SetPasswordInput,
    responses(
        (status = 200, description = "Password set", body = MessageResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn set_password<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
    Json(input): Json<SetPasswordInput>,
) -> Result<impl IntoResponse> {
    state.user_service().set_password(id, input).await?;
    Ok(Json(MessageResponse::new("Password changed")))
}

// ==================== Addresses ====================

#[utoipa::path(
    get,
    path = "/api/user/address",
    tag = "Users",
    security(("bearer_jwt" = [])),
    responses((status = 200, description = "The caller's address", body = Address))
)]
pub async fn own_address<S: HasServices>(
    State(state): State<S>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse> {
    let address = state.user_service().address(actor.user_id).await?;
    Ok(Json(SuccessResponse::new(address)))
}

#[utoipa::path(
    get,
    path = "/api/user/address/{email}",
    tag = "Users",
    security(("bearer_jwt" = [])),
    params(("email" = String, Path, description = "Account email")),
    responses(
        (status = 200, description = "User address", body = Address),
        (status = 400, description = "Unknown user")
    )
)]
pub async fn address_by_email<S: HasServices>(
    State(state): State<S>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse> {
    let address = state.user_service().address_by_email(&email).await?;
    Ok(Json(SuccessResponse::new(address)))
}
