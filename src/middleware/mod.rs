//! HTTP middleware
//!
//! - bearer-token extractors (`AuthUser`, `OptionalAuth`)
//! - role gates for route groups
//! - error body normalization
//! - sanitized request tracing

pub mod auth;
pub mod error_response;
pub mod require_role;
pub mod trace;

pub use auth::{AuthUser, OptionalAuth};
pub use error_response::normalize_error_response;
pub use require_role::{require_role, RoleGate};
pub use trace::SanitizedMakeSpan;
