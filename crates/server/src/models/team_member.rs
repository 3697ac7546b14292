//! Team member domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedar_market_core::TeamMemberId;

/// A team member shown on the public team page. Plain record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: TeamMemberId,
    pub name: String,
    pub title: String,
    pub bio: String,
    pub photo_url: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
