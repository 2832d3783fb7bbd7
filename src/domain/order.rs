//! Order domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Order status. Transitions are not constrained: staff may set any status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    InProgress,
    Confirmed,
    Packed,
    Shipped,
    Delivered,
    Canceled,
    Returned,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Packed => "PACKED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Canceled => "CANCELED",
            OrderStatus::Returned => "RETURNED",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IN_PROGRESS" => Ok(OrderStatus::InProgress),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "PACKED" => Ok(OrderStatus::Packed),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELED" => Ok(OrderStatus::Canceled),
            "RETURNED" => Ok(OrderStatus::Returned),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for OrderStatus {
    fn decode(value: sqlx::mysql::MySqlValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = sqlx::Decode::<'r, sqlx::MySql>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl sqlx::Type<sqlx::MySql> for OrderStatus {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for OrderStatus {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        <&str as sqlx::Encode<sqlx::MySql>>::encode_by_ref(&self.as_str(), buf)
    }
}

/// Postal address, used both embedded in users and on orders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Address {
    #[validate(length(max = 255))]
    pub state: Option<String>,
    #[validate(length(max = 255))]
    pub town: Option<String>,
    #[validate(length(max = 255))]
    pub street: Option<String>,
    #[validate(length(max = 32))]
    pub street_number: Option<String>,
    #[validate(length(max = 32))]
    pub post_code: Option<String>,
}

/// Contact details attached to an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderUserInfo {
    pub id: i64,
    pub firstname: String,
    pub surname: String,
    pub phone: String,
    pub email: String,
}

/// Order contact details as submitted by the buyer
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct OrderUserInfoInput {
    #[validate(length(min = 1, max = 255))]
    pub firstname: String,
    #[validate(length(min = 1, max = 255))]
    pub surname: String,
    #[validate(length(max = 64))]
    #[serde(default)]
    pub phone: String,
    #[validate(email)]
    pub email: String,
}

/// Flat order row joined with its contact info
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub total_price: f64,
    pub registered_user_id: Option<i64>,
    pub order_user_info_id: i64,
    pub contact_firstname: String,
    pub contact_surname: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub delivery_state: Option<String>,
    pub delivery_town: Option<String>,
    pub delivery_street: Option<String>,
    pub delivery_street_number: Option<String>,
    pub delivery_post_code: Option<String>,
    pub user_state: Option<String>,
    pub user_town: Option<String>,
    pub user_street: Option<String>,
    pub user_street_number: Option<String>,
    pub user_post_code: Option<String>,
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub total_price: f64,
    pub registered_user_id: Option<i64>,
    pub order_user_info: OrderUserInfo,
    pub delivery_address: Address,
    pub user_address: Address,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            status: row.status,
            created_at: row.created_at,
            total_price: row.total_price,
            registered_user_id: row.registered_user_id,
            order_user_info: OrderUserInfo {
                id: row.order_user_info_id,
                firstname: row.contact_firstname,
                surname: row.contact_surname,
                phone: row.contact_phone,
                email: row.contact_email,
            },
            delivery_address: Address {
                state: row.delivery_state,
                town: row.delivery_town,
                street: row.delivery_street,
                street_number: row.delivery_street_number,
                post_code: row.delivery_post_code,
            },
            user_address: Address {
                state: row.user_state,
                town: row.user_town,
                street: row.user_street,
                street_number: row.user_street_number,
                post_code: row.user_post_code,
            },
        }
    }
}

/// Immutable snapshot of a catalog item at the moment it was ordered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    /// Source product; `None` once the product has been deleted
    pub product_id: Option<i64>,
    pub name: String,
    pub author: Option<String>,
    pub categories: String,
    pub unit_price: f64,
    pub quantity: i32,
}

/// Order status change performed by a staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Modification {
    pub id: i64,
    pub order_id: i64,
    pub user_id: Option<i64>,
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub surname: Option<String>,
    pub to_status: OrderStatus,
    pub modified_at: DateTime<Utc>,
}

/// Order with items and modification history
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub modifications: Vec<Modification>,
}

/// Order list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderPreview {
    pub id: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub total_price: f64,
    pub email: String,
}

impl From<&Order> for OrderPreview {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            status: order.status,
            created_at: order.created_at,
            total_price: order.total_price,
            email: order.order_user_info.email.clone(),
        }
    }
}

/// One line of an order request
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateOrderItemInput {
    /// Product id
    pub id: i64,
    pub amount: i32,
}

/// Input for placing an order
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateOrderInput {
    #[validate(length(min = 1))]
    pub items: Vec<CreateOrderItemInput>,
    #[serde(default)]
    #[validate(nested)]
    pub user_address: Address,
    #[serde(default)]
    #[validate(nested)]
    pub delivery_address: Address,
    #[validate(nested)]
    pub order_user_info: OrderUserInfoInput,
}

/// Response of a successful order placement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedOrder {
    pub id: i64,
}

/// Input for `PUT /order/update`; fields other than `status` are ignored
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateOrderStatusInput {
    pub id: i64,
    pub status: OrderStatus,
}

/// Snapshot row ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub name: String,
    pub author: Option<String>,
    pub categories: String,
    pub unit_price: f64,
    pub quantity: i32,
}

/// Fully prepared order ready to be persisted
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub status: OrderStatus,
    pub registered_user_id: Option<i64>,
    pub contact: OrderUserInfoInput,
    pub delivery_address: Address,
    pub user_address: Address,
    pub total_price: f64,
    pub items: Vec<NewOrderItem>,
}
