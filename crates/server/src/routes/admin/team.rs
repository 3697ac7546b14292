//! Admin team management route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use cedar_market_core::TeamMemberId;

use crate::db::RepositoryError;
use crate::db::team::{TeamMemberChanges, TeamRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Team member creation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamMemberRequest {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Team member update request body; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamMemberRequest {
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub sort_order: Option<i32>,
}

/// POST /admin/team
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<CreateTeamMemberRequest>,
) -> Result<Response> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_owned()));
    }

    let member = TeamRepository::new(state.pool())
        .create(
            body.name.trim(),
            &body.title,
            &body.bio,
            body.photo_url.as_deref(),
            body.sort_order,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "teamMember": member })),
    )
        .into_response())
}

/// PATCH /admin/team/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<TeamMemberId>,
    Json(body): Json<UpdateTeamMemberRequest>,
) -> Result<Json<serde_json::Value>> {
    let changes = TeamMemberChanges {
        name: body.name.as_deref(),
        title: body.title.as_deref(),
        bio: body.bio.as_deref(),
        photo_url: body.photo_url.as_deref(),
        sort_order: body.sort_order,
    };

    let member = TeamRepository::new(state.pool())
        .update(id, changes)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Team member".to_owned()),
            other => AppError::Database(other),
        })?;

    Ok(Json(json!({ "success": true, "teamMember": member })))
}

/// DELETE /admin/team/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<TeamMemberId>,
) -> Result<Json<serde_json::Value>> {
    let deleted = TeamRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Team member".to_owned()));
    }

    Ok(Json(json!({ "success": true })))
}
