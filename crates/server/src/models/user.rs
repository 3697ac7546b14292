//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedar_market_core::{Email, Role, UserId, UserStatus};

/// A store user (domain type).
///
/// The password hash lives only in the database and in the auth service;
/// it is never part of this type, so serializing a `User` is always safe.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address (lowercased, unique).
    pub email: Email,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional shipping address.
    pub address: Option<String>,
    /// Capability class.
    pub role: Role,
    /// Account status; blocked users cannot log in.
    pub status: UserStatus,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
