//! Database operations for the Cedar Market `PostgreSQL` store.
//!
//! # Tables
//!
//! - `users` - Accounts (customers and admins)
//! - `orders` - Placed orders with JSONB line items and shipping documents
//! - `products` - Catalog
//! - `reviews` - Product reviews
//! - `qr_codes` - Admin-generated QR records
//! - `team_members` - Public team page records
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p cedar-market-cli -- migrate
//! ```
//!
//! Every store operation is atomic at the single-record level; multi-step
//! flows are read-modify-write without a transaction, resolved last-write-wins.

pub mod orders;
pub mod products;
pub mod qr_codes;
pub mod reviews;
pub mod team;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Unique constraint violation.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The targeted row does not exist.
    #[error("not found")]
    NotFound,

    /// A stored value could not be mapped back into a domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a sqlx error to `Conflict` when it is a unique violation.
fn conflict_on_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}
