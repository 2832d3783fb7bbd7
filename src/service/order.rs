//! Order business logic

use crate::domain::{
    Actor, CreateOrderInput, CreatedOrder, NewOrder, NewOrderItem, OrderDetail, OrderPreview,
    OrderStatus, UpdateOrderStatusInput,
};
use crate::error::{AppError, Result};
use crate::repository::{OrderRepository, ProductRepository};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct OrderService<O: OrderRepository, P: ProductRepository> {
    order_repo: Arc<O>,
    product_repo: Arc<P>,
}

/// Merge repeated product lines so stock is checked against the combined amount.
/// A combined amount that overflows can never be in stock.
fn merge_lines(input: &CreateOrderInput) -> Result<Vec<(i64, i32)>> {
    let mut lines: Vec<(i64, i32)> = Vec::with_capacity(input.items.len());
    for item in &input.items {
        match lines.iter_mut().find(|(id, _)| *id == item.id) {
            Some((_, amount)) => {
                *amount = amount.checked_add(item.amount).ok_or_else(|| {
                    AppError::BadRequest("Not enough items in stock".to_string())
                })?;
            }
            None => lines.push((item.id, item.amount)),
        }
    }
    Ok(lines)
}

impl<O: OrderRepository, P: ProductRepository> OrderService<O, P> {
    pub fn new(order_repo: Arc<O>, product_repo: Arc<P>) -> Self {
        Self {
            order_repo,
            product_repo,
        }
    }

    /// Place an order. Amounts are checked first, then product existence, then stock.
    pub async fn create(&self, input: CreateOrderInput, buyer: Option<&Actor>) -> Result<CreatedOrder> {
        if input.items.iter().any(|item| item.amount < 1) {
            return Err(AppError::BadRequest(
                "Amount must be at least 1".to_string(),
            ));
        }
        input.validate()?;

        let lines = merge_lines(&input)?;

        let mut products = Vec::with_capacity(lines.len());
        for (product_id, amount) in &lines {
            let product = self
                .product_repo
                .find_by_id(*product_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
            products.push((product, *amount));
        }

        if products
            .iter()
            .any(|(product, amount)| product.available_quantity < *amount)
        {
            return Err(AppError::BadRequest("Not enough items in stock".to_string()));
        }

        let items: Vec<NewOrderItem> = products
            .into_iter()
            .map(|(product, amount)| NewOrderItem {
                product_id: product.id,
                author: product.author.as_ref().map(|a| a.display_name()),
                categories: product.category_names(),
                unit_price: product.current_price,
                quantity: amount,
                name: product.name,
            })
            .collect();

        let total: f64 = items
            .iter()
            .map(|item| item.unit_price * item.quantity as f64)
            .sum();

        let order = NewOrder {
            status: OrderStatus::InProgress,
            registered_user_id: buyer.map(|actor| actor.user_id),
            contact: input.order_user_info,
            delivery_address: input.delivery_address,
            user_address: input.user_address,
            total_price: (total * 100.0).round() / 100.0,
            items,
        };

        let id = self.order_repo.create(&order).await?;
        info!(
            order_id = id,
            total_price = order.total_price,
            registered = order.registered_user_id.is_some(),
            "Order created"
        );
        Ok(CreatedOrder { id })
    }

    pub async fn list_all(&self) -> Result<Vec<OrderPreview>> {
        self.order_repo.list_previews().await
    }

    pub async fn list_own(&self, actor: &Actor) -> Result<Vec<OrderPreview>> {
        self.order_repo.list_previews_by_user(actor.user_id).await
    }

    pub async fn list_by_email(&self, email: &str) -> Result<Vec<OrderPreview>> {
        self.order_repo.list_previews_by_email(email.trim()).await
    }

    /// Staff see any order; other callers only their own, anything else is 404
    pub async fn get(&self, id: i64, actor: &Actor) -> Result<OrderDetail> {
        let order = self
            .order_repo
            .find_by_id(id)
            .await?
            .filter(|order| actor.role.is_staff() || order.registered_user_id == Some(actor.user_id))
            .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))?;

        let items = self.order_repo.list_items(id).await?;
        let modifications = self.order_repo.list_modifications(id).await?;

        Ok(OrderDetail {
            order,
            items,
            modifications,
        })
    }

    pub async fn update_status(&self, input: UpdateOrderStatusInput, actor: &Actor) -> Result<OrderDetail> {
        self.order_repo
            .update_status(input.id, input.status, actor.user_id)
            .await?;

        info!(
            order_id = input.id,
            status = %input.status,
            user_id = actor.user_id,
            "Order status changed"
        );
        self.get(input.id, actor).await
    }

    /// Stock is not restored
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.order_repo.delete(id).await?;
        info!(order_id = id, "Order deleted");
        Ok(())
    }
}
