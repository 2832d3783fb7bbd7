//! REST API handlers and shared response types

pub mod auth;
pub mod author;
pub mod category;
pub mod discount;
pub mod health;
pub mod language;
pub mod order;
pub mod product;
pub mod statistics;
pub mod user;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Message response (for delete, etc.)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
