//! QR code repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cedar_market_core::QrCodeId;

use super::RepositoryError;
use crate::models::QrCode;

/// Raw `qr_codes` row.
#[derive(sqlx::FromRow)]
struct QrCodeRow {
    id: i32,
    label: String,
    data: String,
    svg: String,
    created_at: DateTime<Utc>,
}

const QR_COLUMNS: &str = "id, label, data, svg, created_at";

impl From<QrCodeRow> for QrCode {
    fn from(r: QrCodeRow) -> Self {
        Self {
            id: QrCodeId::new(r.id),
            label: r.label,
            data: r.data,
            svg: r.svg,
            created_at: r.created_at,
        }
    }
}

/// Repository for QR code database operations.
pub struct QrCodeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> QrCodeRepository<'a> {
    /// Create a new QR code repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a QR record with its rendered SVG.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        label: &str,
        data: &str,
        svg: &str,
    ) -> Result<QrCode, RepositoryError> {
        let row = sqlx::query_as::<_, QrCodeRow>(&format!(
            "INSERT INTO qr_codes (label, data, svg) VALUES ($1, $2, $3) RETURNING {QR_COLUMNS}"
        ))
        .bind(label)
        .bind(data)
        .bind(svg)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List all QR records, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<QrCode>, RepositoryError> {
        let rows = sqlx::query_as::<_, QrCodeRow>(&format!(
            "SELECT {QR_COLUMNS} FROM qr_codes ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Delete a QR record.
    ///
    /// # Returns
    ///
    /// Returns `true` if the record was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: QrCodeId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM qr_codes WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
