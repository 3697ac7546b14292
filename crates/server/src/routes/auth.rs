//! Authentication route handlers.
//!
//! Registration and login both issue the seven-day signed cookie, so a
//! fresh registration is immediately logged in.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAuth, RequireClaims, build_auth_cookie, clear_auth_cookie};
use crate::models::User;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issue a credential for the user and attach it as a Set-Cookie header.
fn respond_logged_in(state: &AppState, user: &User, status: StatusCode) -> Result<Response> {
    let token = state
        .tokens()
        .issue(user)
        .map_err(|_| AppError::Auth(AuthError::TokenSigning))?;
    let cookie = build_auth_cookie(token, state.config().is_secure());

    Ok((
        status,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(json!({ "success": true, "user": user })),
    )
        .into_response())
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Response> {
    let auth = AuthService::new(state.pool());
    let user = auth
        .register(
            &body.name,
            &body.email,
            &body.password,
            body.phone.as_deref(),
            body.address.as_deref(),
        )
        .await?;

    tracing::info!(user_id = user.id.as_i32(), "user registered");

    respond_logged_in(&state, &user, StatusCode::CREATED)
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Response> {
    let auth = AuthService::new(state.pool());
    let user = auth.login(&body.email, &body.password).await?;

    tracing::info!(user_id = user.id.as_i32(), "user logged in");

    respond_logged_in(&state, &user, StatusCode::OK)
}

/// POST /auth/logout
///
/// Stateless credentials cannot be revoked server-side; logout clears the
/// cookie and the browser forgets the token.
pub async fn logout(State(state): State<AppState>) -> Response {
    let cookie = clear_auth_cookie(state.config().is_secure());

    (
        [(header::SET_COOKIE, cookie.to_string())],
        Json(json!({ "success": true })),
    )
        .into_response()
}

/// Password change request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// POST /auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<serde_json::Value>> {
    AuthService::new(state.pool())
        .change_password(user.id, &user.email, &body.current_password, &body.new_password)
        .await?;

    tracing::info!(user_id = user.id.as_i32(), "password changed");

    Ok(Json(json!({ "success": true })))
}

/// GET /auth/me
///
/// A valid credential whose user row has since vanished gets 404, not 401.
pub async fn me(
    State(state): State<AppState>,
    RequireClaims(claims): RequireClaims,
) -> Result<Json<serde_json::Value>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(claims.user_id())
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_owned()))?;

    Ok(Json(json!({ "success": true, "user": user })))
}
