//! Order route handlers.
//!
//! One PATCH endpoint serves two callers: admins move the order through
//! the lifecycle, customers may cancel their own pending order with
//! `action: "cancel"`. The `orderId` field carries the customer-facing
//! time-based order number.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use cedar_market_core::{Price, Role};

use crate::error::{AppError, Result};
use crate::middleware::{RequireAuth, RequireCustomer};
use crate::models::OrderItem;
use crate::services::orders::OrderService;
use crate::state::AppState;

/// Checkout request body. The item list is final; carts live on the client.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderItem>,
    pub shipping_info: serde_json::Value,
    pub total_amount: Decimal,
}

/// Order update request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    /// Customer-facing order number.
    pub order_id: String,
    /// Admin-only: lifecycle target.
    pub status: Option<String>,
    /// Admin-only: replace the stored notes.
    pub admin_notes: Option<String>,
    /// Customer: `"cancel"`.
    pub action: Option<String>,
}

/// POST /orders
pub async fn place(
    State(state): State<AppState>,
    RequireCustomer(user): RequireCustomer,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<Response> {
    let service = OrderService::new(state.pool(), state.transition_policy());
    let order = service
        .place(
            &user,
            &body.items,
            &body.shipping_info,
            Price::new(body.total_amount),
        )
        .await?;

    tracing::info!(
        order_number = order.order_number.as_str(),
        user_id = user.id.as_i32(),
        "order placed"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "order": order })),
    )
        .into_response())
}

/// GET /orders
///
/// Customers see their own orders; admins see every order.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<serde_json::Value>> {
    let service = OrderService::new(state.pool(), state.transition_policy());
    let orders = if user.role == Role::Admin {
        service.list_all().await?
    } else {
        service.list_for_user(user.id).await?
    };

    Ok(Json(json!({ "success": true, "orders": orders })))
}

/// PATCH /orders
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<UpdateOrderRequest>,
) -> Result<Json<serde_json::Value>> {
    let service = OrderService::new(state.pool(), state.transition_policy());

    let order = match (body.action.as_deref(), body.status.as_deref()) {
        (Some("cancel"), _) => service.cancel(&body.order_id, user.id).await?,
        (Some(other), _) => {
            return Err(AppError::BadRequest(format!("invalid action: {other}")));
        }
        (None, Some(status)) => {
            if user.role != Role::Admin {
                return Err(AppError::Forbidden(
                    "Only admins can update order status".to_owned(),
                ));
            }
            service
                .admin_update_status(&body.order_id, status, body.admin_notes.as_deref())
                .await?
        }
        (None, None) => {
            return Err(AppError::BadRequest(
                "either a status or an action is required".to_owned(),
            ));
        }
    };

    Ok(Json(json!({ "success": true, "order": order })))
}
