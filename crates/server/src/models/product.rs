//! Product domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedar_market_core::{Price, ProductId};

/// A catalog product. Plain record with create/update/delete only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: Option<String>,
    pub category: String,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
