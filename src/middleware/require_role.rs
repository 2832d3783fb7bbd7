//! Role enforcement middleware for REST route groups
//!
//! Each gated group carries the set of roles it admits. The caller's role is
//! read from the user store, never from the token.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::auth::{resolve_actor, AuthError};
use crate::domain::Role;
use crate::state::HasServices;

/// Shared state for the role gate
#[derive(Clone)]
pub struct RoleGate<S> {
    state: S,
    allowed: &'static [Role],
}

impl<S: HasServices> RoleGate<S> {
    pub fn new(state: S, allowed: &'static [Role]) -> Self {
        Self { state, allowed }
    }
}

/// Admit the request only when the stored role of the bearer is in the gate's set.
///
/// On success the caller is inserted into the request extensions as an
/// [`Actor`](crate::domain::Actor) for `AuthUser` to pick up.
pub async fn require_role<S: HasServices>(
    State(gate): State<RoleGate<S>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let actor = match resolve_actor(request.headers(), &gate.state).await {
        Ok(actor) => actor,
        Err(err) => return err.into_response(),
    };

    if !gate.allowed.contains(&actor.role) {
        debug!(
            user_id = actor.user_id,
            role = %actor.role,
            path = %request.uri().path(),
            "Role not allowed"
        );
        return AuthError::RoleNotAllowed.into_response();
    }

    request.extensions_mut().insert(actor);
    next.run(request).await
}
