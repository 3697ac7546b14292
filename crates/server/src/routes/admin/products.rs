//! Admin catalog management route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use cedar_market_core::{Price, ProductId};

use crate::db::RepositoryError;
use crate::db::products::{ProductChanges, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Product creation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

const fn default_in_stock() -> bool {
    true
}

/// Product update request body; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

fn validate_price(price: Price) -> Result<Price> {
    if price.is_positive() {
        Ok(price)
    } else {
        Err(AppError::BadRequest("price must be positive".to_owned()))
    }
}

/// POST /admin/products
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<CreateProductRequest>,
) -> Result<Response> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_owned()));
    }
    let price = validate_price(Price::new(body.price))?;

    let product = ProductRepository::new(state.pool())
        .create(
            body.name.trim(),
            &body.description,
            price,
            body.image_url.as_deref(),
            &body.category,
            body.in_stock,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "product": product })),
    )
        .into_response())
}

/// PATCH /admin/products/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ProductId>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<serde_json::Value>> {
    let price = body
        .price
        .map(|p| validate_price(Price::new(p)))
        .transpose()?;

    let changes = ProductChanges {
        name: body.name.as_deref(),
        description: body.description.as_deref(),
        price,
        image_url: body.image_url.as_deref(),
        category: body.category.as_deref(),
        in_stock: body.in_stock,
    };

    let product = ProductRepository::new(state.pool())
        .update(id, changes)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Product".to_owned()),
            other => AppError::Database(other),
        })?;

    Ok(Json(json!({ "success": true, "product": product })))
}

/// DELETE /admin/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<Json<serde_json::Value>> {
    let deleted = ProductRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Product".to_owned()));
    }

    Ok(Json(json!({ "success": true })))
}
