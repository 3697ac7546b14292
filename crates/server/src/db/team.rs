//! Team member repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cedar_market_core::TeamMemberId;

use super::RepositoryError;
use crate::models::TeamMember;

/// Raw `team_members` row.
#[derive(sqlx::FromRow)]
struct TeamMemberRow {
    id: i32,
    name: String,
    title: String,
    bio: String,
    photo_url: Option<String>,
    sort_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const TEAM_COLUMNS: &str = "id, name, title, bio, photo_url, sort_order, created_at, updated_at";

impl From<TeamMemberRow> for TeamMember {
    fn from(r: TeamMemberRow) -> Self {
        Self {
            id: TeamMemberId::new(r.id),
            name: r.name,
            title: r.title,
            bio: r.bio,
            photo_url: r.photo_url,
            sort_order: r.sort_order,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Fields accepted by a team member update; `None` leaves the column unchanged.
#[derive(Debug, Default)]
pub struct TeamMemberChanges<'a> {
    pub name: Option<&'a str>,
    pub title: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub photo_url: Option<&'a str>,
    pub sort_order: Option<i32>,
}

/// Repository for team member database operations.
pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamRepository<'a> {
    /// Create a new team repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a team member.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        title: &str,
        bio: &str,
        photo_url: Option<&str>,
        sort_order: i32,
    ) -> Result<TeamMember, RepositoryError> {
        let row = sqlx::query_as::<_, TeamMemberRow>(&format!(
            "INSERT INTO team_members (name, title, bio, photo_url, sort_order) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {TEAM_COLUMNS}"
        ))
        .bind(name)
        .bind(title)
        .bind(bio)
        .bind(photo_url)
        .bind(sort_order)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List team members in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<TeamMember>, RepositoryError> {
        let rows = sqlx::query_as::<_, TeamMemberRow>(&format!(
            "SELECT {TEAM_COLUMNS} FROM team_members ORDER BY sort_order ASC, id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Apply a partial update, stamping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the member doesn't exist.
    pub async fn update(
        &self,
        id: TeamMemberId,
        changes: TeamMemberChanges<'_>,
    ) -> Result<TeamMember, RepositoryError> {
        let row = sqlx::query_as::<_, TeamMemberRow>(&format!(
            "UPDATE team_members SET \
                 name = COALESCE($1, name), \
                 title = COALESCE($2, title), \
                 bio = COALESCE($3, bio), \
                 photo_url = COALESCE($4, photo_url), \
                 sort_order = COALESCE($5, sort_order), \
                 updated_at = now() \
             WHERE id = $6 \
             RETURNING {TEAM_COLUMNS}"
        ))
        .bind(changes.name)
        .bind(changes.title)
        .bind(changes.bio)
        .bind(changes.photo_url)
        .bind(changes.sort_order)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete a team member.
    ///
    /// # Returns
    ///
    /// Returns `true` if the member was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: TeamMemberId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
