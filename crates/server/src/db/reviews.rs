//! Review repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cedar_market_core::{ProductId, ReviewId, UserId};

use super::RepositoryError;
use crate::models::Review;

/// Raw `reviews` row.
#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: i32,
    product_id: i32,
    user_id: i32,
    user_name: String,
    rating: i32,
    comment: String,
    created_at: DateTime<Utc>,
}

const REVIEW_COLUMNS: &str = "id, product_id, user_id, user_name, rating, comment, created_at";

impl From<ReviewRow> for Review {
    fn from(r: ReviewRow) -> Self {
        Self {
            id: ReviewId::new(r.id),
            product_id: ProductId::new(r.product_id),
            user_id: UserId::new(r.user_id),
            user_name: r.user_name,
            rating: r.rating,
            comment: r.comment,
            created_at: r.created_at,
        }
    }
}

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including
    /// a foreign-key failure for an unknown product).
    pub async fn create(
        &self,
        product_id: ProductId,
        user_id: UserId,
        user_name: &str,
        rating: i32,
        comment: &str,
    ) -> Result<Review, RepositoryError> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "INSERT INTO reviews (product_id, user_id, user_name, rating, comment) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(product_id.as_i32())
        .bind(user_id.as_i32())
        .bind(user_name)
        .bind(rating)
        .bind(comment)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List reviews for a product, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Review>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE product_id = $1 ORDER BY created_at DESC"
        ))
        .bind(product_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Delete a review.
    ///
    /// # Returns
    ///
    /// Returns `true` if the review was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ReviewId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
