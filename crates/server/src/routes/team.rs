//! Public team page route handler.

use axum::{Json, extract::State};
use serde_json::json;

use crate::db::team::TeamRepository;
use crate::error::Result;
use crate::state::AppState;

/// GET /team
pub async fn index(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let team = TeamRepository::new(state.pool()).list().await?;
    Ok(Json(json!({ "success": true, "team": team })))
}
