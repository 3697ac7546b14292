//! Admin user management route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::json;

use cedar_market_core::{Role, UserId, UserStatus};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::services::auth::hash_password;
use crate::state::AppState;

/// GET /admin/users
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<serde_json::Value>> {
    let users = UserRepository::new(state.pool()).list().await?;
    Ok(Json(json!({ "success": true, "users": users })))
}

/// Admin user update request body. Exactly one action per request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub user_id: UserId,
    /// `active` or `blocked`.
    pub status: Option<String>,
    /// `customer` or `admin`.
    pub role: Option<String>,
    /// New password to set.
    pub reset_password: Option<String>,
}

/// PATCH /admin/users
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<serde_json::Value>> {
    let users = UserRepository::new(state.pool());

    let map_not_found = |e: RepositoryError| match e {
        RepositoryError::NotFound => AppError::NotFound("User".to_owned()),
        other => AppError::Database(other),
    };

    let user = match (&body.status, &body.role, &body.reset_password) {
        (Some(status), None, None) => {
            let status: UserStatus = status
                .parse()
                .map_err(|_| AppError::BadRequest(format!("invalid status: {status}")))?;
            users
                .set_status(body.user_id, status)
                .await
                .map_err(map_not_found)?
        }
        (None, Some(role), None) => {
            let role: Role = role
                .parse()
                .map_err(|_| AppError::BadRequest(format!("invalid role: {role}")))?;
            users
                .set_role(body.user_id, role)
                .await
                .map_err(map_not_found)?
        }
        (None, None, Some(password)) => {
            if password.len() < 8 {
                return Err(AppError::BadRequest(
                    "password must be at least 8 characters".to_owned(),
                ));
            }
            let hash = hash_password(password)?;
            users
                .set_password_hash(body.user_id, &hash)
                .await
                .map_err(map_not_found)?;
            users
                .get_by_id(body.user_id)
                .await?
                .ok_or_else(|| AppError::NotFound("User".to_owned()))?
        }
        _ => {
            return Err(AppError::BadRequest(
                "exactly one of status, role, or resetPassword is required".to_owned(),
            ));
        }
    };

    tracing::info!(user_id = user.id.as_i32(), "user updated by admin");

    Ok(Json(json!({ "success": true, "user": user })))
}
