//! Category repository

use crate::domain::{Category, CategoryInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>>;
    async fn create(&self, input: &CategoryInput) -> Result<Category>;
    async fn update(&self, id: i64, input: &CategoryInput) -> Result<Category>;
    async fn delete(&self, id: i64) -> Result<()>;
    /// True when at least one product references the category
    async fn is_in_use(&self, id: i64) -> Result<bool>;
}

pub struct CategoryRepositoryImpl {
    pool: MySqlPool,
}

impl CategoryRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryImpl {
    async fn list(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn create(&self, input: &CategoryInput) -> Result<Category> {
        let result = sqlx::query("INSERT INTO categories (name, description) VALUES (?, ?)")
            .bind(&input.name)
            .bind(&input.description)
            .execute(&self.pool)
            .await?;

        self.find_by_id(result.last_insert_id() as i64)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create category")))
    }

    async fn update(&self, id: i64, input: &CategoryInput) -> Result<Category> {
        sqlx::query("UPDATE categories SET name = ?, description = ? WHERE id = ?")
            .bind(&input.name)
            .bind(&input.description)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        Ok(())
    }

    async fn is_in_use(&self, id: i64) -> Result<bool> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM product_categories WHERE category_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(row.0 > 0)
    }
}
