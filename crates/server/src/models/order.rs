//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cedar_market_core::{Email, OrderId, OrderNumber, OrderStatus, Price, ProductId, UserId};

/// A single line item on an order.
///
/// Prices are captured at checkout time; later catalog edits do not touch
/// placed orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

/// A customer order (domain type).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Database ID.
    pub id: OrderId,
    /// Customer-facing time-based order number.
    pub order_number: OrderNumber,
    /// Owning user.
    pub user_id: UserId,
    /// Snapshot of the user's name at checkout.
    pub user_name: String,
    /// Snapshot of the user's email at checkout.
    pub user_email: Email,
    /// Line items.
    pub items: Vec<OrderItem>,
    /// Free-form shipping document (address, delivery notes, ...).
    pub shipping_info: serde_json::Value,
    /// Order total as submitted at checkout.
    pub total_amount: Price,
    /// Lifecycle stage.
    pub status: OrderStatus,
    /// Free-text notes set by admin status updates.
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
