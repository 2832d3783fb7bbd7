//! Book author repository

use crate::domain::{AuthorInput, BookAuthor};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<BookAuthor>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<BookAuthor>>;
    async fn find_by_name(&self, first_name: &str, last_name: &str)
        -> Result<Option<BookAuthor>>;
    async fn create(&self, input: &AuthorInput) -> Result<BookAuthor>;
    async fn update(&self, id: i64, input: &AuthorInput) -> Result<BookAuthor>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct AuthorRepositoryImpl {
    pool: MySqlPool,
}

impl AuthorRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for AuthorRepositoryImpl {
    async fn list(&self) -> Result<Vec<BookAuthor>> {
        let authors = sqlx::query_as::<_, BookAuthor>(
            "SELECT id, first_name, last_name FROM book_authors ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BookAuthor>> {
        let author = sqlx::query_as::<_, BookAuthor>(
            "SELECT id, first_name, last_name FROM book_authors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(author)
    }

    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<BookAuthor>> {
        let author = sqlx::query_as::<_, BookAuthor>(
            r#"
            SELECT id, first_name, last_name
            FROM book_authors
            WHERE first_name = ? AND last_name = ?
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(author)
    }

    async fn create(&self, input: &AuthorInput) -> Result<BookAuthor> {
        let result = sqlx::query("INSERT INTO book_authors (first_name, last_name) VALUES (?, ?)")
            .bind(&input.first_name)
            .bind(&input.last_name)
            .execute(&self.pool)
            .await?;

        self.find_by_id(result.last_insert_id() as i64)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create author")))
    }

    async fn update(&self, id: i64, input: &AuthorInput) -> Result<BookAuthor> {
        sqlx::query("UPDATE book_authors SET first_name = ?, last_name = ? WHERE id = ?")
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM book_authors WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }

        Ok(())
    }
}
