//! Order placement and lifecycle service.
//!
//! Checkout posts the final item list (cart state lives on the client).
//! Admin status updates and customer cancellation both route through the
//! validators on [`OrderStatus`], so the lifecycle rules live in one place.

use serde_json::Value;
use sqlx::PgPool;
use thiserror::Error;

use cedar_market_core::{
    CancelError, OrderNumber, OrderStatus, OrderStatusError, Price, TransitionPolicy, UserId,
};

use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::models::{Order, OrderItem, User};

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Order has no line items.
    #[error("order must contain at least one item")]
    EmptyOrder,

    /// A line item is malformed.
    #[error("invalid item: {0}")]
    InvalidItem(&'static str),

    /// The order total is missing or not positive.
    #[error("order total must be positive")]
    InvalidTotal,

    /// Shipping information is missing.
    #[error("shipping information is required")]
    MissingShipping,

    /// Admin supplied an unusable status target.
    #[error(transparent)]
    Status(#[from] OrderStatusError),

    /// Customer cancellation rejected.
    #[error(transparent)]
    Cancel(#[from] CancelError),

    /// Order not found.
    #[error("order not found")]
    NotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for OrderError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}

/// Order service.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
    policy: TransitionPolicy,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, policy: TransitionPolicy) -> Self {
        Self {
            orders: OrderRepository::new(pool),
            policy,
        }
    }

    /// Place a new order for a customer. The order starts `pending` and
    /// snapshots the user's name and email at checkout time.
    ///
    /// # Errors
    ///
    /// Returns a validation variant if the item list, total, or shipping
    /// document is unusable; `OrderError::Repository` on database failure.
    pub async fn place(
        &self,
        user: &User,
        items: &[OrderItem],
        shipping_info: &Value,
        total_amount: Price,
    ) -> Result<Order, OrderError> {
        validate_items(items)?;
        if !total_amount.is_positive() {
            return Err(OrderError::InvalidTotal);
        }
        match shipping_info.as_object() {
            Some(fields) if !fields.is_empty() => {}
            _ => return Err(OrderError::MissingShipping),
        }

        let number = OrderNumber::generate();
        let order = self
            .orders
            .create(
                &number,
                user.id,
                &user.name,
                &user.email,
                items,
                shipping_info,
                total_amount,
            )
            .await?;

        Ok(order)
    }

    /// List every order (admin view), newest first.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` on database failure.
    pub async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.list_all().await?)
    }

    /// List a customer's own orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` on database failure.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.list_for_user(user_id).await?)
    }

    /// Admin status update. The target is validated against the lifecycle
    /// rules before anything is written; an invalid target leaves the order
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` for an unknown order number,
    /// `OrderError::Status` for an unusable target.
    pub async fn admin_update_status(
        &self,
        order_number: &str,
        target: &str,
        admin_notes: Option<&str>,
    ) -> Result<Order, OrderError> {
        let order = self
            .orders
            .get_by_number(order_number)
            .await?
            .ok_or(OrderError::NotFound)?;

        let next = order.status.validate_admin_target(target, self.policy)?;

        Ok(self.orders.set_status(order.id, next, admin_notes).await?)
    }

    /// Customer cancellation. Only the owner may cancel, and only while the
    /// order is still pending.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` for an unknown order number,
    /// `OrderError::Cancel` when ownership or state rules reject the cancel.
    pub async fn cancel(&self, order_number: &str, caller: UserId) -> Result<Order, OrderError> {
        let order = self
            .orders
            .get_by_number(order_number)
            .await?
            .ok_or(OrderError::NotFound)?;

        order.status.validate_cancel(order.user_id, caller)?;

        Ok(self
            .orders
            .set_status(order.id, OrderStatus::Cancelled, None)
            .await?)
    }
}

fn validate_items(items: &[OrderItem]) -> Result<(), OrderError> {
    if items.is_empty() {
        return Err(OrderError::EmptyOrder);
    }
    for item in items {
        if item.name.trim().is_empty() {
            return Err(OrderError::InvalidItem("item name is required"));
        }
        if item.quantity == 0 {
            return Err(OrderError::InvalidItem("item quantity must be at least 1"));
        }
        if !item.price.is_positive() {
            return Err(OrderError::InvalidItem("item price must be positive"));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use cedar_market_core::ProductId;

    use super::*;

    fn item(quantity: u32) -> OrderItem {
        OrderItem {
            product_id: ProductId::new(1),
            name: "Cedar planter".to_owned(),
            price: Price::new(Decimal::new(1999, 2)),
            quantity,
        }
    }

    #[test]
    fn empty_item_list_is_rejected() {
        assert!(matches!(validate_items(&[]), Err(OrderError::EmptyOrder)));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert!(matches!(
            validate_items(&[item(2), item(0)]),
            Err(OrderError::InvalidItem(_))
        ));
    }

    #[test]
    fn unnamed_item_is_rejected() {
        let mut bad = item(1);
        bad.name = "  ".to_owned();
        assert!(matches!(
            validate_items(&[bad]),
            Err(OrderError::InvalidItem(_))
        ));
    }

    #[test]
    fn well_formed_items_pass() {
        assert!(validate_items(&[item(1), item(3)]).is_ok());
    }
}
