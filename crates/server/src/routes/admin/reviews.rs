//! Admin review moderation route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use cedar_market_core::ReviewId;

use crate::db::reviews::ReviewRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// DELETE /admin/reviews/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ReviewId>,
) -> Result<Json<serde_json::Value>> {
    let deleted = ReviewRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Review".to_owned()));
    }

    Ok(Json(json!({ "success": true })))
}
