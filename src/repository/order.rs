//! Order repository

use crate::domain::{
    DailyCount, DailyIncome, DateRange, Modification, NamedCount, NewOrder, Order, OrderItem,
    OrderPreview, OrderRow, OrderStatus,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn list_previews(&self) -> Result<Vec<OrderPreview>>;
    async fn list_previews_by_user(&self, user_id: i64) -> Result<Vec<OrderPreview>>;
    /// Orders whose contact email matches case-insensitively, plus the orders
    /// of the registered user owning that email
    async fn list_previews_by_email(&self, email: &str) -> Result<Vec<OrderPreview>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Order>>;
    async fn list_items(&self, order_id: i64) -> Result<Vec<OrderItem>>;
    async fn list_modifications(&self, order_id: i64) -> Result<Vec<Modification>>;

    /// Persist the order and its snapshots, decrementing stock in the same transaction
    async fn create(&self, order: &NewOrder) -> Result<i64>;
    /// Set the status and record who changed it
    async fn update_status(&self, id: i64, status: OrderStatus, actor_user_id: i64)
        -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;

    // Statistics
    async fn orders_per_day(&self, range: DateRange) -> Result<Vec<DailyCount>>;
    async fn income_per_day(&self, range: DateRange) -> Result<Vec<DailyIncome>>;
    async fn category_sales(&self, range: DateRange) -> Result<Vec<NamedCount>>;
    async fn item_sales(&self, range: DateRange, limit: i64) -> Result<Vec<NamedCount>>;
}

const ORDER_SELECT: &str = r#"
    SELECT o.id, o.status, o.created_at, o.total_price, o.registered_user_id,
           o.order_user_info_id,
           i.firstname AS contact_firstname, i.surname AS contact_surname,
           i.phone AS contact_phone, i.email AS contact_email,
           o.delivery_state, o.delivery_town, o.delivery_street,
           o.delivery_street_number, o.delivery_post_code,
           o.user_state, o.user_town, o.user_street, o.user_street_number, o.user_post_code
    FROM orders o
    JOIN order_user_infos i ON i.id = o.order_user_info_id
"#;

const PREVIEW_SELECT: &str = r#"
    SELECT o.id, o.status, o.created_at, o.total_price, i.email
    FROM orders o
    JOIN order_user_infos i ON i.id = o.order_user_info_id
"#;

pub struct OrderRepositoryImpl {
    pool: MySqlPool,
}

impl OrderRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for OrderRepositoryImpl {
    async fn list_previews(&self) -> Result<Vec<OrderPreview>> {
        let previews = sqlx::query_as::<_, OrderPreview>(&format!(
            "{} ORDER BY o.created_at DESC, o.id DESC",
            PREVIEW_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(previews)
    }

    async fn list_previews_by_user(&self, user_id: i64) -> Result<Vec<OrderPreview>> {
        let previews = sqlx::query_as::<_, OrderPreview>(&format!(
            "{} WHERE o.registered_user_id = ? ORDER BY o.created_at DESC, o.id DESC",
            PREVIEW_SELECT
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(previews)
    }

    async fn list_previews_by_email(&self, email: &str) -> Result<Vec<OrderPreview>> {
        let previews = sqlx::query_as::<_, OrderPreview>(&format!(
            r#"{}
            WHERE LOWER(i.email) = LOWER(?)
               OR o.registered_user_id IN (SELECT u.id FROM users u WHERE LOWER(u.email) = LOWER(?))
            ORDER BY o.created_at DESC, o.id DESC
            "#,
            PREVIEW_SELECT
        ))
        .bind(email)
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(previews)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!("{} WHERE o.id = ?", ORDER_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Order::from))
    }

    async fn list_items(&self, order_id: i64) -> Result<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, name, author, categories, unit_price, quantity
            FROM order_items
            WHERE order_id = ?
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn list_modifications(&self, order_id: i64) -> Result<Vec<Modification>> {
        let modifications = sqlx::query_as::<_, Modification>(
            r#"
            SELECT m.id, m.order_id, m.user_id, u.email, u.firstname, u.surname,
                   m.to_status, m.modified_at
            FROM order_modifications m
            LEFT JOIN users u ON u.id = m.user_id
            WHERE m.order_id = ?
            ORDER BY m.id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(modifications)
    }

    async fn create(&self, order: &NewOrder) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let contact = sqlx::query(
            "INSERT INTO order_user_infos (firstname, surname, phone, email) VALUES (?, ?, ?, ?)",
        )
        .bind(&order.contact.firstname)
        .bind(&order.contact.surname)
        .bind(&order.contact.phone)
        .bind(&order.contact.email)
        .execute(&mut *tx)
        .await?;

        let delivery = &order.delivery_address;
        let billing = &order.user_address;
        let inserted = sqlx::query(
            r#"
            INSERT INTO orders (status, created_at, total_price, registered_user_id, order_user_info_id,
                                delivery_state, delivery_town, delivery_street,
                                delivery_street_number, delivery_post_code,
                                user_state, user_town, user_street, user_street_number, user_post_code)
            VALUES (?, NOW(), ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(order.status)
        .bind(order.total_price)
        .bind(order.registered_user_id)
        .bind(contact.last_insert_id() as i64)
        .bind(&delivery.state)
        .bind(&delivery.town)
        .bind(&delivery.street)
        .bind(&delivery.street_number)
        .bind(&delivery.post_code)
        .bind(&billing.state)
        .bind(&billing.town)
        .bind(&billing.street)
        .bind(&billing.street_number)
        .bind(&billing.post_code)
        .execute(&mut *tx)
        .await?;
        let order_id = inserted.last_insert_id() as i64;

        for item in &order.items {
            let reserved = sqlx::query(
                r#"
                UPDATE products
                SET available_quantity = available_quantity - ?
                WHERE id = ? AND available_quantity >= ?
                "#,
            )
            .bind(item.quantity)
            .bind(item.product_id)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;

            // Rolled back on drop
            if reserved.rows_affected() == 0 {
                return Err(AppError::BadRequest("Not enough items in stock".to_string()));
            }

            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, name, author, categories, unit_price, quantity)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(&item.name)
            .bind(&item.author)
            .bind(&item.categories)
            .bind(item.unit_price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(order_id)
    }

    async fn update_status(
        &self,
        id: i64,
        status: OrderStatus,
        actor_user_id: i64,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM orders WHERE id = ? FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_none() {
            return Err(AppError::NotFound(format!("Order {} not found", id)));
        }

        sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO order_modifications (order_id, user_id, to_status, modified_at) VALUES (?, ?, ?, NOW())",
        )
        .bind(id)
        .bind(actor_user_id)
        .bind(status)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let contact: Option<(i64,)> =
            sqlx::query_as("SELECT order_user_info_id FROM orders WHERE id = ? FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((contact_id,)) = contact else {
            return Err(AppError::NotFound(format!("Order {} not found", id)));
        };

        sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM order_user_infos WHERE id = ?")
            .bind(contact_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn orders_per_day(&self, range: DateRange) -> Result<Vec<DailyCount>> {
        let rows = sqlx::query_as::<_, DailyCount>(
            r#"
            SELECT DATE(created_at) AS date, COUNT(*) AS occurence
            FROM orders
            WHERE created_at BETWEEN ? AND ?
            GROUP BY DATE(created_at)
            ORDER BY date
            "#,
        )
        .bind(range.from)
        .bind(range.to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn income_per_day(&self, range: DateRange) -> Result<Vec<DailyIncome>> {
        let rows = sqlx::query_as::<_, DailyIncome>(
            r#"
            SELECT DATE(created_at) AS date, SUM(total_price) AS income
            FROM orders
            WHERE created_at BETWEEN ? AND ?
            GROUP BY DATE(created_at)
            ORDER BY date
            "#,
        )
        .bind(range.from)
        .bind(range.to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn category_sales(&self, range: DateRange) -> Result<Vec<NamedCount>> {
        let rows = sqlx::query_as::<_, NamedCount>(
            r#"
            SELECT c.name AS name, COUNT(*) AS occurence
            FROM orders o
            JOIN order_items oi ON oi.order_id = o.id
            JOIN product_categories pc ON pc.product_id = oi.product_id
            JOIN categories c ON c.id = pc.category_id
            WHERE o.created_at BETWEEN ? AND ?
            GROUP BY c.name
            ORDER BY occurence DESC, c.name
            "#,
        )
        .bind(range.from)
        .bind(range.to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn item_sales(&self, range: DateRange, limit: i64) -> Result<Vec<NamedCount>> {
        let rows = sqlx::query_as::<_, NamedCount>(
            r#"
            SELECT oi.name AS name, COUNT(*) AS occurence
            FROM orders o
            JOIN order_items oi ON oi.order_id = o.id
            WHERE o.created_at BETWEEN ? AND ?
            GROUP BY oi.name
            ORDER BY occurence DESC, oi.name
            LIMIT ?
            "#,
        )
        .bind(range.from)
        .bind(range.to)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
