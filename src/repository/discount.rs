//! Discount repository

use crate::domain::Discount;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscountRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Discount>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Discount>>;
    async fn find_by_percent(&self, percent: i32) -> Result<Option<Discount>>;
    async fn create(&self, percent: i32) -> Result<Discount>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct DiscountRepositoryImpl {
    pool: MySqlPool,
}

impl DiscountRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DiscountRepository for DiscountRepositoryImpl {
    async fn list(&self) -> Result<Vec<Discount>> {
        let discounts =
            sqlx::query_as::<_, Discount>("SELECT id, percent FROM discounts ORDER BY percent")
                .fetch_all(&self.pool)
                .await?;

        Ok(discounts)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Discount>> {
        let discount =
            sqlx::query_as::<_, Discount>("SELECT id, percent FROM discounts WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(discount)
    }

    async fn find_by_percent(&self, percent: i32) -> Result<Option<Discount>> {
        let discount =
            sqlx::query_as::<_, Discount>("SELECT id, percent FROM discounts WHERE percent = ?")
                .bind(percent)
                .fetch_optional(&self.pool)
                .await?;

        Ok(discount)
    }

    async fn create(&self, percent: i32) -> Result<Discount> {
        let result = sqlx::query("INSERT INTO discounts (percent) VALUES (?)")
            .bind(percent)
            .execute(&self.pool)
            .await?;

        Ok(Discount {
            id: result.last_insert_id() as i64,
            percent,
        })
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM discounts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Discount {} not found", id)));
        }

        Ok(())
    }
}
