//! Language repository

use crate::domain::{Language, LanguageInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Language>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Language>>;
    async fn find_by_name(&self, language: &str) -> Result<Option<Language>>;
    async fn create(&self, input: &LanguageInput) -> Result<Language>;
    async fn update(&self, id: i64, input: &LanguageInput) -> Result<Language>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct LanguageRepositoryImpl {
    pool: MySqlPool,
}

impl LanguageRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LanguageRepository for LanguageRepositoryImpl {
    async fn list(&self) -> Result<Vec<Language>> {
        let languages =
            sqlx::query_as::<_, Language>("SELECT id, language FROM languages ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(languages)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Language>> {
        let language =
            sqlx::query_as::<_, Language>("SELECT id, language FROM languages WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(language)
    }

    async fn find_by_name(&self, language: &str) -> Result<Option<Language>> {
        let language =
            sqlx::query_as::<_, Language>("SELECT id, language FROM languages WHERE language = ?")
                .bind(language)
                .fetch_optional(&self.pool)
                .await?;

        Ok(language)
    }

    async fn create(&self, input: &LanguageInput) -> Result<Language> {
        let result = sqlx::query("INSERT INTO languages (language) VALUES (?)")
            .bind(&input.language)
            .execute(&self.pool)
            .await?;

        self.find_by_id(result.last_insert_id() as i64)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create language")))
    }

    async fn update(&self, id: i64, input: &LanguageInput) -> Result<Language> {
        sqlx::query("UPDATE languages SET language = ? WHERE id = ?")
            .bind(&input.language)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Language {} not found", id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM languages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Language {} not found", id)));
        }

        Ok(())
    }
}
