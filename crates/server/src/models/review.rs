//! Product review domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedar_market_core::{ProductId, ReviewId, UserId};

/// A customer review of a product. Rating is 1..=5.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    /// Snapshot of the reviewer's name.
    pub user_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
