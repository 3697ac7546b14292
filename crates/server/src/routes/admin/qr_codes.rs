//! Admin QR code route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use cedar_market_core::QrCodeId;

use crate::db::qr_codes::QrCodeRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::services::qr;
use crate::state::AppState;

/// QR creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateQrRequest {
    pub label: String,
    pub data: String,
}

/// POST /admin/qr-codes
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<CreateQrRequest>,
) -> Result<Response> {
    if body.label.trim().is_empty() {
        return Err(AppError::BadRequest("label is required".to_owned()));
    }

    let svg = qr::render_svg(&body.data)?;

    let record = QrCodeRepository::new(state.pool())
        .create(body.label.trim(), &body.data, &svg)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "qrCode": record })),
    )
        .into_response())
}

/// GET /admin/qr-codes
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<serde_json::Value>> {
    let records = QrCodeRepository::new(state.pool()).list().await?;
    Ok(Json(json!({ "success": true, "qrCodes": records })))
}

/// DELETE /admin/qr-codes/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<QrCodeId>,
) -> Result<Json<serde_json::Value>> {
    let deleted = QrCodeRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("QR code".to_owned()));
    }

    Ok(Json(json!({ "success": true })))
}
