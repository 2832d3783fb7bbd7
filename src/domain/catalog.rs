//! Catalog reference data: authors, categories, languages and discounts

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book author entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookAuthor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl BookAuthor {
    /// "First Last", used when snapshotting an order item
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Input for creating or updating an author
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct AuthorInput {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub first_name: String,
    #[validate(length(min = 2, max = 255))]
    pub last_name: String,
}

/// Category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Input for creating or updating a category
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CategoryInput {
    #[validate(length(min = 2, max = 255))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Body of `DELETE /category` (lookup by name)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CategoryNameInput {
    pub name: String,
}

/// Book language entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Language {
    pub id: i64,
    pub language: String,
}

/// Input for creating, updating or deleting a language by name
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct LanguageInput {
    #[validate(length(min = 2, max = 255))]
    pub language: String,
}

/// Discount entity; `percent` is unique across discounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Discount {
    pub id: i64,
    pub percent: i32,
}

/// Input for creating or deleting a discount by value
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct DiscountInput {
    #[validate(range(min = 0, max = 100))]
    pub percent: i32,
}
