//! Catalog reference data: authors, categories, languages and discounts

use crate::domain::{
    AuthorInput, BookAuthor, Category, CategoryInput, Discount, DiscountInput, Language,
    LanguageInput,
};
use crate::error::{AppError, Result};
use crate::repository::{
    AuthorRepository, CategoryRepository, DiscountRepository, LanguageRepository,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct CatalogService<A, C, L, D>
where
    A: AuthorRepository,
    C: CategoryRepository,
    L: LanguageRepository,
    D: DiscountRepository,
{
    author_repo: Arc<A>,
    category_repo: Arc<C>,
    language_repo: Arc<L>,
    discount_repo: Arc<D>,
}

impl<A, C, L, D> CatalogService<A, C, L, D>
where
    A: AuthorRepository,
    C: CategoryRepository,
    L: LanguageRepository,
    D: DiscountRepository,
{
    pub fn new(
        author_repo: Arc<A>,
        category_repo: Arc<C>,
        language_repo: Arc<L>,
        discount_repo: Arc<D>,
    ) -> Self {
        Self {
            author_repo,
            category_repo,
            language_repo,
            discount_repo,
        }
    }

    // ==================== Authors ====================

    pub async fn list_authors(&self) -> Result<Vec<BookAuthor>> {
        self.author_repo.list().await
    }

    pub async fn get_author(&self, id: i64) -> Result<BookAuthor> {
        self.author_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    pub async fn create_author(&self, input: AuthorInput) -> Result<BookAuthor> {
        input.validate()?;

        if self
            .author_repo
            .find_by_name(&input.first_name, &input.last_name)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Author already exists".to_string()));
        }

        let author = self.author_repo.create(&input).await?;
        info!(author_id = author.id, "Author created");
        Ok(author)
    }

    pub async fn update_author(&self, id: i64, input: AuthorInput) -> Result<BookAuthor> {
        input.validate()?;

        if self.author_repo.find_by_id(id).await?.is_none() {
            return Err(AppError::BadRequest("Unknown author!".to_string()));
        }

        if let Some(other) = self
            .author_repo
            .find_by_name(&input.first_name, &input.last_name)
            .await?
        {
            if other.id != id {
                return Err(AppError::Conflict("Author already exists".to_string()));
            }
        }

        self.author_repo.update(id, &input).await
    }

    pub async fn delete_author(&self, id: i64) -> Result<()> {
        self.author_repo.delete(id).await?;
        info!(author_id = id, "Author deleted");
        Ok(())
    }

    pub async fn delete_author_by_name(&self, input: AuthorInput) -> Result<()> {
        let author = self
            .author_repo
            .find_by_name(&input.first_name, &input.last_name)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;

        self.delete_author(author.id).await
    }

    // ==================== Categories ====================

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.category_repo.list().await
    }

    pub async fn get_category(&self, id: i64) -> Result<Category> {
        self.category_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn create_category(&self, input: CategoryInput) -> Result<Category> {
        input.validate()?;

        if self.category_repo.find_by_name(&input.name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                input.name
            )));
        }

        let category = self.category_repo.create(&input).await?;
        info!(category_id = category.id, "Category created");
        Ok(category)
    }

    pub async fn update_category(&self, id: i64, input: CategoryInput) -> Result<Category> {
        input.validate()?;
        let _ = self.get_category(id).await?;

        if let Some(other) = self.category_repo.find_by_name(&input.name).await? {
            if other.id != id {
                return Err(AppError::Conflict(format!(
                    "Category '{}' already exists",
                    input.name
                )));
            }
        }

        self.category_repo.update(id, &input).await
    }

    /// Categories still referenced by a product cannot be removed
    pub async fn delete_category(&self, id: i64) -> Result<()> {
        let _ = self.get_category(id).await?;

        if self.category_repo.is_in_use(id).await? {
            return Err(AppError::BadRequest(
                "Category is used in a product".to_string(),
            ));
        }

        self.category_repo.delete(id).await?;
        info!(category_id = id, "Category deleted");
        Ok(())
    }

    pub async fn delete_category_by_name(&self, name: &str) -> Result<()> {
        let category = self
            .category_repo
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", name)))?;

        self.delete_category(category.id).await
    }

    // ==================== Languages ====================

    pub async fn list_languages(&self) -> Result<Vec<Language>> {
        self.language_repo.list().await
    }

    pub async fn get_language(&self, id: i64) -> Result<Language> {
        self.language_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Language {} not found", id)))
    }

    pub async fn create_language(&self, input: LanguageInput) -> Result<Language> {
        input.validate()?;

        if self
            .language_repo
            .find_by_name(&input.language)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Language '{}' already exists",
                input.language
            )));
        }

        self.language_repo.create(&input).await
    }

    pub async fn update_language(&self, id: i64, input: LanguageInput) -> Result<Language> {
        input.validate()?;
        let _ = self.get_language(id).await?;

        if let Some(other) = self.language_repo.find_by_name(&input.language).await? {
            if other.id != id {
                return Err(AppError::Conflict(format!(
                    "Language '{}' already exists",
                    input.language
                )));
            }
        }

        self.language_repo.update(id, &input).await
    }

    pub async fn delete_language(&self, id: i64) -> Result<()> {
        self.language_repo.delete(id).await
    }

    pub async fn delete_language_by_name(&self, language: &str) -> Result<()> {
        let found = self
            .language_repo
            .find_by_name(language)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Language '{}' not found", language)))?;

        self.language_repo.delete(found.id).await
    }

    // ==================== Discounts ====================

    pub async fn list_discounts(&self) -> Result<Vec<Discount>> {
        self.discount_repo.list().await
    }

    pub async fn create_discount(&self, input: DiscountInput) -> Result<Discount> {
        input.validate()?;

        if self
            .discount_repo
            .find_by_percent(input.percent)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Discount {}% already exists",
                input.percent
            )));
        }

        self.discount_repo.create(input.percent).await
    }

    pub async fn delete_discount_by_value(&self, percent: i32) -> Result<()> {
        let discount = self
            .discount_repo
            .find_by_percent(percent)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Discount {}% not found", percent)))?;

        self.discount_repo.delete(discount.id).await
    }
}
