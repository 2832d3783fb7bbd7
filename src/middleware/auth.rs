//! Bearer-token extractors
//!
//! - `AuthUser` for handlers behind a role gate
//! - `OptionalAuth` for public handlers that use the caller when present

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::domain::Actor;
use crate::error::AppError;
use crate::state::HasServices;

/// The authenticated caller, as loaded from the user store
#[derive(Debug, Clone)]
pub struct AuthUser(pub Actor);

/// Authentication errors
#[derive(Debug)]
pub enum AuthError {
    /// No Authorization header present
    MissingToken,
    /// Invalid Authorization header format
    InvalidHeader,
    /// Signature, expiry or subject did not check out
    InvalidToken,
    /// Stored role is not in the allowed set
    RoleNotAllowed,
    /// The user store could not be queried
    Backend(AppError),
}

impl IntoResponse for AuthError {
    /// Every rejection is a bare 401; only store failures surface as errors.
    fn into_response(self) -> Response {
        match self {
            AuthError::Backend(err) => err.into_response(),
            _ => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader)?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidHeader)
}

/// Verify the bearer token and load the caller from the user store
pub async fn resolve_actor<S: HasServices>(headers: &HeaderMap, state: &S) -> Result<Actor, AuthError> {
    let token = extract_bearer_token(headers)?;
    let user = state
        .user_service()
        .authenticate(token)
        .await
        .map_err(AuthError::Backend)?
        .ok_or(AuthError::InvalidToken)?;

    Ok(Actor::from(&user))
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: HasServices,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Set by the role gate
        if let Some(actor) = parts.extensions.get::<Actor>() {
            return Ok(AuthUser(actor.clone()));
        }

        resolve_actor(&parts.headers, state).await.map(AuthUser)
    }
}

/// Optional authentication extractor
///
/// Returns `Some(AuthUser)` if a valid token for a known user is present, `None` otherwise.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: HasServices,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(OptionalAuth(Some(user))),
            Err(AuthError::Backend(err)) => {
                warn!(error = %err, "Ignoring bearer token, user lookup failed");
                Ok(OptionalAuth(None))
            }
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}
