//! Product repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use cedar_market_core::{Price, ProductId};

use super::RepositoryError;
use crate::models::Product;

/// Raw `products` row.
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    description: String,
    price: Decimal,
    image_url: Option<String>,
    category: String,
    in_stock: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, image_url, category, in_stock, created_at, updated_at";

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Self {
            id: ProductId::new(r.id),
            name: r.name,
            description: r.description,
            price: Price::new(r.price),
            image_url: r.image_url,
            category: r.category,
            in_stock: r.in_stock,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Fields accepted by a product update; `None` leaves the column unchanged.
#[derive(Debug, Default)]
pub struct ProductChanges<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price: Option<Price>,
    pub image_url: Option<&'a str>,
    pub category: Option<&'a str>,
    pub in_stock: Option<bool>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        description: &str,
        price: Price,
        image_url: Option<&str>,
        category: &str,
        in_stock: bool,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products (name, description, price, image_url, category, in_stock) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(name)
        .bind(description)
        .bind(price.amount())
        .bind(image_url)
        .bind(category)
        .bind(in_stock)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List all products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Apply a partial update, stamping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn update(
        &self,
        id: ProductId,
        changes: ProductChanges<'_>,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products SET \
                 name = COALESCE($1, name), \
                 description = COALESCE($2, description), \
                 price = COALESCE($3, price), \
                 image_url = COALESCE($4, image_url), \
                 category = COALESCE($5, category), \
                 in_stock = COALESCE($6, in_stock), \
                 updated_at = now() \
             WHERE id = $7 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.price.map(|p| p.amount()))
        .bind(changes.image_url)
        .bind(changes.category)
        .bind(changes.in_stock)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete a product.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
