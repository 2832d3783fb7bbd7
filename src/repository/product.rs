//! Product description repository

use crate::domain::{
    Category, NewProductEvidence, ProductDetail, ProductEvidence, ProductFilter, ProductInput,
    ProductRow,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};
use std::collections::HashMap;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<ProductDetail>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductDetail>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<ProductDetail>>;
    /// Substring match over product, author, category and language text
    async fn search(&self, fragment: &str) -> Result<Vec<ProductDetail>>;
    async fn filter(&self, filter: &ProductFilter) -> Result<Vec<ProductDetail>>;
    async fn create(&self, input: &ProductInput) -> Result<ProductDetail>;
    /// Full update; a `None` image keeps the stored one
    async fn update(&self, id: i64, input: &ProductInput) -> Result<ProductDetail>;
    async fn set_discount(&self, id: i64, discount_id: Option<i64>) -> Result<()>;
    async fn set_quantity(&self, id: i64, quantity: i32) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;

    // Audit trail
    async fn add_evidence(&self, evidence: &NewProductEvidence) -> Result<()>;
    async fn list_evidences(&self, product_id: i64) -> Result<Vec<ProductEvidence>>;
}

const PRODUCT_SELECT: &str = r#"
    SELECT p.id, p.name, p.description, p.isbn, p.price, p.pages, p.image,
           p.available_quantity,
           a.id AS author_id, a.first_name AS author_first_name, a.last_name AS author_last_name,
           l.id AS language_id, l.language AS language,
           d.id AS discount_id, d.percent AS discount_percent
    FROM products p
    LEFT JOIN book_authors a ON a.id = p.author_id
    LEFT JOIN languages l ON l.id = p.language_id
    LEFT JOIN discounts d ON d.id = p.discount_id
"#;

#[derive(FromRow)]
struct ProductCategoryRow {
    product_id: i64,
    id: i64,
    name: String,
    description: Option<String>,
}

/// `%fragment%` with LIKE wildcards in the fragment escaped
fn like_pattern(fragment: &str) -> String {
    let escaped = fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

pub struct ProductRepositoryImpl {
    pool: MySqlPool,
}

impl ProductRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Load the categories of every row in one round trip
    async fn with_categories(&self, rows: Vec<ProductRow>) -> Result<Vec<ProductDetail>> {
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let mut qb: QueryBuilder<MySql> = QueryBuilder::new(
            r#"
            SELECT pc.product_id, c.id, c.name, c.description
            FROM product_categories pc
            JOIN categories c ON c.id = pc.category_id
            WHERE pc.product_id IN (
            "#,
        );
        let mut ids = qb.separated(", ");
        for row in &rows {
            ids.push_bind(row.id);
        }
        qb.push(") ORDER BY c.id");

        let category_rows = qb
            .build_query_as::<ProductCategoryRow>()
            .fetch_all(&self.pool)
            .await?;

        let mut by_product: HashMap<i64, Vec<Category>> = HashMap::new();
        for row in category_rows {
            by_product.entry(row.product_id).or_default().push(Category {
                id: row.id,
                name: row.name,
                description: row.description,
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let categories = by_product.remove(&row.id).unwrap_or_default();
                ProductDetail::from_row(row, categories)
            })
            .collect())
    }

    async fn with_categories_one(&self, row: Option<ProductRow>) -> Result<Option<ProductDetail>> {
        match row {
            Some(row) => Ok(self.with_categories(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn replace_categories(
        tx: &mut sqlx::Transaction<'_, MySql>,
        product_id: i64,
        category_ids: &[i64],
    ) -> Result<()> {
        sqlx::query("DELETE FROM product_categories WHERE product_id = ?")
            .bind(product_id)
            .execute(&mut **tx)
            .await?;

        let mut unique = category_ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        for category_id in unique {
            sqlx::query("INSERT INTO product_categories (product_id, category_id) VALUES (?, ?)")
                .bind(product_id)
                .bind(category_id)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryImpl {
    async fn list(&self) -> Result<Vec<ProductDetail>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!("{} ORDER BY p.id", PRODUCT_SELECT))
            .fetch_all(&self.pool)
            .await?;

        self.with_categories(rows).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ProductDetail>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{} WHERE p.id = ?", PRODUCT_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        self.with_categories_one(row).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ProductDetail>> {
        let row =
            sqlx::query_as::<_, ProductRow>(&format!("{} WHERE p.name = ?", PRODUCT_SELECT))
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        self.with_categories_one(row).await
    }

    async fn search(&self, fragment: &str) -> Result<Vec<ProductDetail>> {
        if fragment.is_empty() {
            return self.list().await;
        }

        let pattern = like_pattern(fragment);
        let sql = format!(
            r#"{}
            WHERE p.name LIKE ? OR p.description LIKE ? OR p.isbn LIKE ?
               OR a.first_name LIKE ? OR a.last_name LIKE ?
               OR l.language LIKE ?
               OR EXISTS (
                   SELECT 1 FROM product_categories pc
                   JOIN categories c ON c.id = pc.category_id
                   WHERE pc.product_id = p.id
                     AND (c.name LIKE ? OR c.description LIKE ?)
               )
            ORDER BY p.id
            "#,
            PRODUCT_SELECT
        );

        let mut query = sqlx::query_as::<_, ProductRow>(&sql);
        for _ in 0..8 {
            query = query.bind(&pattern);
        }
        let rows = query.fetch_all(&self.pool).await?;

        self.with_categories(rows).await
    }

    async fn filter(&self, filter: &ProductFilter) -> Result<Vec<ProductDetail>> {
        let mut qb: QueryBuilder<MySql> = QueryBuilder::new(PRODUCT_SELECT);
        qb.push(" WHERE 1 = 1");

        if let Some(from) = filter.price_from {
            qb.push(" AND p.price >= ").push_bind(from);
        }
        if let Some(to) = filter.price_to {
            qb.push(" AND p.price <= ").push_bind(to);
        }
        if let Some(from) = filter.pages_from {
            qb.push(" AND p.pages >= ").push_bind(from);
        }
        if let Some(to) = filter.pages_to {
            qb.push(" AND p.pages <= ").push_bind(to);
        }
        if let Some(from) = filter.discount_from {
            qb.push(" AND COALESCE(d.percent, 0) >= ").push_bind(from);
        }
        if let Some(to) = filter.discount_to {
            qb.push(" AND COALESCE(d.percent, 0) <= ").push_bind(to);
        }
        if !filter.author_ids.is_empty() {
            qb.push(" AND p.author_id IN (");
            let mut ids = qb.separated(", ");
            for id in &filter.author_ids {
                ids.push_bind(*id);
            }
            qb.push(")");
        }
        if !filter.language_ids.is_empty() {
            qb.push(" AND p.language_id IN (");
            let mut ids = qb.separated(", ");
            for id in &filter.language_ids {
                ids.push_bind(*id);
            }
            qb.push(")");
        }
        if !filter.category_ids.is_empty() {
            qb.push(
                " AND EXISTS (SELECT 1 FROM product_categories pc \
                 WHERE pc.product_id = p.id AND pc.category_id IN (",
            );
            let mut ids = qb.separated(", ");
            for id in &filter.category_ids {
                ids.push_bind(*id);
            }
            qb.push("))");
        }
        qb.push(" ORDER BY p.id");

        let rows = qb
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await?;

        self.with_categories(rows).await
    }

    async fn create(&self, input: &ProductInput) -> Result<ProductDetail> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, isbn, price, pages, image,
                                  available_quantity, author_id, language_id, discount_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.isbn)
        .bind(input.price)
        .bind(input.pages)
        .bind(&input.image)
        .bind(input.available_quantity)
        .bind(input.author_id)
        .bind(input.language_id)
        .bind(input.discount_id)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_id() as i64;
        Self::replace_categories(&mut tx, id, &input.category_ids).await?;
        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create product")))
    }

    async fn update(&self, id: i64, input: &ProductInput) -> Result<ProductDetail> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE products
            SET name = ?, description = ?, isbn = ?, price = ?, pages = ?,
                image = COALESCE(?, image), available_quantity = ?,
                author_id = ?, language_id = ?, discount_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.isbn)
        .bind(input.price)
        .bind(input.pages)
        .bind(&input.image)
        .bind(input.available_quantity)
        .bind(input.author_id)
        .bind(input.language_id)
        .bind(input.discount_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        Self::replace_categories(&mut tx, id, &input.category_ids).await?;
        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    async fn set_discount(&self, id: i64, discount_id: Option<i64>) -> Result<()> {
        sqlx::query("UPDATE products SET discount_id = ? WHERE id = ?")
            .bind(discount_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn set_quantity(&self, id: i64, quantity: i32) -> Result<()> {
        sqlx::query("UPDATE products SET available_quantity = ? WHERE id = ?")
            .bind(quantity)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }

        Ok(())
    }

    async fn add_evidence(&self, evidence: &NewProductEvidence) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO product_evidences
                (product_id, user_id, firstname, surname, email, role, change_description, modified_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, NOW())
            "#,
        )
        .bind(evidence.product_id)
        .bind(evidence.user_id)
        .bind(&evidence.firstname)
        .bind(&evidence.surname)
        .bind(&evidence.email)
        .bind(&evidence.role)
        .bind(&evidence.change_description)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_evidences(&self, product_id: i64) -> Result<Vec<ProductEvidence>> {
        let evidences = sqlx::query_as::<_, ProductEvidence>(
            r#"
            SELECT id, product_id, user_id, firstname, surname, email, role,
                   change_description, modified_at
            FROM product_evidences
            WHERE product_id = ?
            ORDER BY id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(evidences)
    }
}
