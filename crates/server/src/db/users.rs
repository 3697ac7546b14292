//! User repository for database operations.
//!
//! Queries use the runtime sqlx API with explicit row structs that are
//! mapped into domain types; stored role/status strings that fail to parse
//! surface as `DataCorruption` rather than panicking.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cedar_market_core::{Email, Role, UserId, UserStatus};

use super::{RepositoryError, conflict_on_unique};
use crate::models::User;

/// Raw `users` row.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
    password_hash: String,
    phone: Option<String>,
    address: Option<String>,
    role: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const USER_COLUMNS: &str = "id, name, email, password_hash, phone, address, role, status, \
                            created_at, updated_at";

impl UserRow {
    /// Map a row into the domain type, dropping the password hash.
    fn into_user(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role: Role = self
            .role
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid role in database: {e}")))?;
        let status: UserStatus = self.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(User {
            id: UserId::new(self.id),
            name: self.name,
            email,
            phone: self.phone,
            address: self.address,
            role,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (name, email, password_hash, phone, address) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(name)
        .bind(email.as_str())
        .bind(password_hash)
        .bind(phone)
        .bind(address)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "email"))?;

        row.into_user()
    }

    /// Get a user and their password hash by email.
    ///
    /// Returns `None` if no user has this email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email_with_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => {
                let hash = r.password_hash.clone();
                Ok(Some((r.into_user()?, hash)))
            }
            None => Ok(None),
        }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row =
            sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// List all users, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Set a user's account status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn set_status(
        &self,
        id: UserId,
        status: UserStatus,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET status = $1, updated_at = now() WHERE id = $2 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(status.as_str())
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.into_user()
    }

    /// Set a user's role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn set_role(&self, id: UserId, role: Role) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET role = $1, updated_at = now() WHERE id = $2 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(role.as_str())
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.into_user()
    }

    /// Replace a user's password hash (admin reset).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn set_password_hash(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $1, updated_at = now() WHERE id = $2")
                .bind(password_hash)
                .bind(id.as_i32())
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
