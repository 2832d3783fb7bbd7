//! Product description business logic

use crate::domain::{
    Actor, NewProductEvidence, ProductDetail, ProductEvidence, ProductFilter, ProductInput,
    DEFAULT_PRODUCT_IMAGE,
};
use crate::error::{AppError, Result};
use crate::repository::{
    AuthorRepository, CategoryRepository, DiscountRepository, LanguageRepository,
    ProductRepository,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct ProductService<P, A, C, L, D>
where
    P: ProductRepository,
    A: AuthorRepository,
    C: CategoryRepository,
    L: LanguageRepository,
    D: DiscountRepository,
{
    product_repo: Arc<P>,
    author_repo: Arc<A>,
    category_repo: Arc<C>,
    language_repo: Arc<L>,
    discount_repo: Arc<D>,
}

impl<P, A, C, L, D> ProductService<P, A, C, L, D>
where
    P: ProductRepository,
    A: AuthorRepository,
    C: CategoryRepository,
    L: LanguageRepository,
    D: DiscountRepository,
{
    pub fn new(
        product_repo: Arc<P>,
        author_repo: Arc<A>,
        category_repo: Arc<C>,
        language_repo: Arc<L>,
        discount_repo: Arc<D>,
    ) -> Self {
        Self {
            product_repo,
            author_repo,
            category_repo,
            language_repo,
            discount_repo,
        }
    }

    pub async fn list(&self) -> Result<Vec<ProductDetail>> {
        self.product_repo.list().await
    }

    pub async fn get(&self, id: i64) -> Result<ProductDetail> {
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<ProductDetail>> {
        self.product_repo.search(query.trim()).await
    }

    pub async fn filter(&self, filter: &ProductFilter) -> Result<Vec<ProductDetail>> {
        if filter.is_unbounded() {
            return self.product_repo.list().await;
        }
        self.product_repo.filter(filter).await
    }

    pub async fn create(&self, mut input: ProductInput) -> Result<ProductDetail> {
        input.validate()?;

        if self.product_repo.find_by_name(&input.name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Product '{}' already exists",
                input.name
            )));
        }
        self.check_references(&input).await?;

        if input.image.as_deref().map_or(true, str::is_empty) {
            input.image = Some(DEFAULT_PRODUCT_IMAGE.to_string());
        }

        let product = self.product_repo.create(&input).await?;
        info!(product_id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Full update; an audit row is written only when something changed
    pub async fn update(&self, id: i64, input: ProductInput, actor: &Actor) -> Result<ProductDetail> {
        input.validate()?;
        let existing = self.get(id).await?;

        if let Some(other) = self.product_repo.find_by_name(&input.name).await? {
            if other.id != id {
                return Err(AppError::Conflict(format!(
                    "Product '{}' already exists",
                    input.name
                )));
            }
        }
        self.check_references(&input).await?;

        if !existing.differs_from(&input) {
            return Ok(existing);
        }

        let updated = self.product_repo.update(id, &input).await?;
        self.record(actor, id, "Product information was updated.".to_string())
            .await?;
        Ok(updated)
    }

    /// Link the product to the discount with `percent`, creating it when missing
    pub async fn set_discount(&self, id: i64, percent: i32, actor: &Actor) -> Result<ProductDetail> {
        if !(0..=100).contains(&percent) {
            return Err(AppError::BadRequest(
                "Discount must be between 0 and 100".to_string(),
            ));
        }
        let existing = self.get(id).await?;

        let discount = match self.discount_repo.find_by_percent(percent).await? {
            Some(discount) => discount,
            None => self.discount_repo.create(percent).await?,
        };
        self.product_repo
            .set_discount(id, Some(discount.id))
            .await?;

        self.record(
            actor,
            id,
            format!(
                "Discount updated from {}% to {}%.",
                existing.discount_percent(),
                percent
            ),
        )
        .await?;
        self.get(id).await
    }

    pub async fn set_quantity(&self, id: i64, quantity: i32, actor: &Actor) -> Result<ProductDetail> {
        if quantity < 0 {
            return Err(AppError::BadRequest(
                "Quantity must not be negative".to_string(),
            ));
        }
        let existing = self.get(id).await?;

        self.product_repo.set_quantity(id, quantity).await?;
        self.record(
            actor,
            id,
            format!(
                "Quantity updated from {} to {}.",
                existing.available_quantity, quantity
            ),
        )
        .await?;
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.product_repo.delete(id).await?;
        info!(product_id = id, "Product deleted");
        Ok(())
    }

    pub async fn list_evidences(&self, id: i64) -> Result<Vec<ProductEvidence>> {
        let _ = self.get(id).await?;
        self.product_repo.list_evidences(id).await
    }

    async fn record(&self, actor: &Actor, product_id: i64, change_description: String) -> Result<()> {
        let evidence = NewProductEvidence {
            product_id,
            user_id: actor.user_id,
            firstname: actor.firstname.clone(),
            surname: actor.surname.clone(),
            email: actor.email.clone(),
            role: actor.role.to_string(),
            change_description,
        };
        self.product_repo.add_evidence(&evidence).await
    }

    async fn check_references(&self, input: &ProductInput) -> Result<()> {
        if let Some(author_id) = input.author_id {
            if self.author_repo.find_by_id(author_id).await?.is_none() {
                return Err(AppError::NotFound(format!("Author {} not found", author_id)));
            }
        }
        if let Some(language_id) = input.language_id {
            if self.language_repo.find_by_id(language_id).await?.is_none() {
                return Err(AppError::NotFound(format!(
                    "Language {} not found",
                    language_id
                )));
            }
        }
        if let Some(discount_id) = input.discount_id {
            if self.discount_repo.find_by_id(discount_id).await?.is_none() {
                return Err(AppError::NotFound(format!(
                    "Discount {} not found",
                    discount_id
                )));
            }
        }
        for category_id in &input.category_ids {
            if self.category_repo.find_by_id(*category_id).await?.is_none() {
                return Err(AppError::NotFound(format!(
                    "Category {} not found",
                    category_id
                )));
            }
        }
        Ok(())
    }
}
