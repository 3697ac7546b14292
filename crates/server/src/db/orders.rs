//! Order repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use cedar_market_core::{Email, OrderId, OrderNumber, OrderStatus, Price, UserId};

use super::{RepositoryError, conflict_on_unique};
use crate::models::{Order, OrderItem};

/// Raw `orders` row.
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    order_number: String,
    user_id: i32,
    user_name: String,
    user_email: String,
    items: serde_json::Value,
    shipping_info: serde_json::Value,
    total_amount: Decimal,
    status: String,
    admin_notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const ORDER_COLUMNS: &str = "id, order_number, user_id, user_name, user_email, items, \
                             shipping_info, total_amount, status, admin_notes, \
                             created_at, updated_at";

impl OrderRow {
    fn into_order(self) -> Result<Order, RepositoryError> {
        let items: Vec<OrderItem> = serde_json::from_value(self.items).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order items in database: {e}"))
        })?;
        let status: OrderStatus = self.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;
        let user_email = Email::parse(&self.user_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Order {
            id: OrderId::new(self.id),
            order_number: OrderNumber::from(self.order_number),
            user_id: UserId::new(self.user_id),
            user_name: self.user_name,
            user_email,
            items,
            shipping_info: self.shipping_info,
            total_amount: Price::new(self.total_amount),
            status,
            admin_notes: self.admin_notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new order with status `pending`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on an order-number collision,
    /// `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        number: &OrderNumber,
        user_id: UserId,
        user_name: &str,
        user_email: &Email,
        items: &[OrderItem],
        shipping_info: &serde_json::Value,
        total_amount: Price,
    ) -> Result<Order, RepositoryError> {
        let items_json = serde_json::to_value(items).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize order items: {e}"))
        })?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO orders (order_number, user_id, user_name, user_email, items, \
                                 shipping_info, total_amount) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(number.as_str())
        .bind(user_id.as_i32())
        .bind(user_name)
        .bind(user_email.as_str())
        .bind(items_json)
        .bind(shipping_info)
        .bind(total_amount.amount())
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "order number"))?;

        row.into_order()
    }

    /// Get an order by its customer-facing number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_number(&self, number: &str) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE order_number = $1"
        ))
        .bind(number)
        .fetch_optional(self.pool)
        .await?;

        row.map(OrderRow::into_order).transpose()
    }

    /// List every order, newest first (admin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    /// List a user's own orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    /// Set an order's status, stamping `updated_at`. When `admin_notes` is
    /// `Some` the notes are replaced, otherwise the stored notes are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        admin_notes: Option<&str>,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders \
             SET status = $1, admin_notes = COALESCE($2, admin_notes), updated_at = now() \
             WHERE id = $3 \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(status.as_str())
        .bind(admin_notes)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.into_order()
    }
}
