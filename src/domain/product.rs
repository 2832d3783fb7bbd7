//! Catalog item (product description) domain model

use super::catalog::{BookAuthor, Category, Discount, Language};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Image assigned to products created without one
pub const DEFAULT_PRODUCT_IMAGE: &str =
    "https://t3.ftcdn.net/jpg/02/48/42/64/360_F_248426448_NVKLywWqArG2ADUxDq6QprtIzsF82dMF.jpg";

/// Price after applying an optional discount percentage, rounded to cents.
pub fn current_price(price: f64, discount_percent: Option<i32>) -> f64 {
    let percent = discount_percent.unwrap_or(0).clamp(0, 100) as f64;
    let discounted = price * (100.0 - percent) / 100.0;
    (discounted * 100.0).round() / 100.0
}

/// Flat product row joined with its author, language and discount
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub isbn: String,
    pub price: f64,
    pub pages: i32,
    pub image: Option<String>,
    pub available_quantity: i32,
    pub author_id: Option<i64>,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub language_id: Option<i64>,
    pub language: Option<String>,
    pub discount_id: Option<i64>,
    pub discount_percent: Option<i32>,
}

/// Catalog item as returned to clients, including the derived current price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDetail {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub isbn: String,
    pub price: f64,
    pub current_price: f64,
    pub pages: i32,
    pub image: Option<String>,
    pub available_quantity: i32,
    pub author: Option<BookAuthor>,
    pub categories: Vec<Category>,
    pub language: Option<Language>,
    pub discount: Option<Discount>,
}

impl ProductDetail {
    pub fn from_row(row: ProductRow, categories: Vec<Category>) -> Self {
        let author = match (row.author_id, row.author_first_name, row.author_last_name) {
            (Some(id), first_name, last_name) => Some(BookAuthor {
                id,
                first_name: first_name.unwrap_or_default(),
                last_name: last_name.unwrap_or_default(),
            }),
            _ => None,
        };
        let language = match (row.language_id, row.language) {
            (Some(id), Some(language)) => Some(Language { id, language }),
            _ => None,
        };
        let discount = match (row.discount_id, row.discount_percent) {
            (Some(id), Some(percent)) => Some(Discount { id, percent }),
            _ => None,
        };

        Self {
            id: row.id,
            current_price: current_price(row.price, discount.as_ref().map(|d| d.percent)),
            name: row.name,
            description: row.description,
            isbn: row.isbn,
            price: row.price,
            pages: row.pages,
            image: row.image,
            available_quantity: row.available_quantity,
            author,
            categories,
            language,
            discount,
        }
    }

    /// Discount percentage, 0 when no discount is linked
    pub fn discount_percent(&self) -> i32 {
        self.discount.as_ref().map(|d| d.percent).unwrap_or(0)
    }

    /// Comma separated category names, used for order snapshots
    pub fn category_names(&self) -> String {
        self.categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// True when applying `input` would change any stored field
    pub fn differs_from(&self, input: &ProductInput) -> bool {
        let mut current_categories: Vec<i64> = self.categories.iter().map(|c| c.id).collect();
        let mut new_categories = input.category_ids.clone();
        current_categories.sort_unstable();
        new_categories.sort_unstable();
        new_categories.dedup();

        self.name != input.name
            || self.description != input.description
            || self.isbn != input.isbn
            || self.price != input.price
            || self.pages != input.pages
            || (input.image.is_some() && self.image != input.image)
            || self.available_quantity != input.available_quantity
            || self.author.as_ref().map(|a| a.id) != input.author_id
            || self.language.as_ref().map(|l| l.id) != input.language_id
            || self.discount.as_ref().map(|d| d.id) != input.discount_id
            || current_categories != new_categories
    }
}

/// Input for creating or fully updating a product
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub isbn: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub pages: i32,
    pub image: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub available_quantity: i32,
    pub author_id: Option<i64>,
    #[serde(default)]
    pub category_ids: Vec<i64>,
    pub language_id: Option<i64>,
    pub discount_id: Option<i64>,
}

/// Catalog filter. Absent bounds and empty id sets leave a dimension unconstrained;
/// all bounds are inclusive.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ProductFilter {
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    pub pages_from: Option<i32>,
    pub pages_to: Option<i32>,
    pub discount_from: Option<i32>,
    pub discount_to: Option<i32>,
    #[serde(default)]
    pub author_ids: Vec<i64>,
    #[serde(default)]
    pub category_ids: Vec<i64>,
    #[serde(default)]
    pub language_ids: Vec<i64>,
}

fn within<T: PartialOrd + Copy>(value: T, from: Option<T>, to: Option<T>) -> bool {
    from.map_or(true, |from| value >= from) && to.map_or(true, |to| value <= to)
}

impl ProductFilter {
    pub fn is_unbounded(&self) -> bool {
        self.price_from.is_none()
            && self.price_to.is_none()
            && self.pages_from.is_none()
            && self.pages_to.is_none()
            && self.discount_from.is_none()
            && self.discount_to.is_none()
            && self.author_ids.is_empty()
            && self.category_ids.is_empty()
            && self.language_ids.is_empty()
    }

    pub fn matches(&self, product: &ProductDetail) -> bool {
        if !within(product.price, self.price_from, self.price_to)
            || !within(product.pages, self.pages_from, self.pages_to)
            || !within(
                product.discount_percent(),
                self.discount_from,
                self.discount_to,
            )
        {
            return false;
        }

        if !self.author_ids.is_empty()
            && !product
                .author
                .as_ref()
                .is_some_and(|a| self.author_ids.contains(&a.id))
        {
            return false;
        }

        if !self.language_ids.is_empty()
            && !product
                .language
                .as_ref()
                .is_some_and(|l| self.language_ids.contains(&l.id))
        {
            return false;
        }

        self.category_ids.is_empty()
            || product
                .categories
                .iter()
                .any(|c| self.category_ids.contains(&c.id))
    }
}

/// Free-text catalog search
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

/// Product audit trail row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProductEvidence {
    pub id: i64,
    pub product_id: i64,
    pub user_id: Option<i64>,
    pub firstname: String,
    pub surname: String,
    pub email: String,
    pub role: String,
    pub change_description: String,
    pub modified_at: DateTime<Utc>,
}

/// Input for recording a product audit row
#[derive(Debug, Clone)]
pub struct NewProductEvidence {
    pub product_id: i64,
    pub user_id: i64,
    pub firstname: String,
    pub surname: String,
    pub email: String,
    pub role: String,
    pub change_description: String,
}
