//! Unified error handling.
//!
//! Provides a unified `AppError` type that maps every failure onto the
//! JSON error shape clients expect. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use cedar_market_core::{CancelError, OrderStatusError};

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::orders::OrderError;
use crate::services::qr::QrError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Order operation failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// QR rendering failed.
    #[error("QR error: {0}")]
    Qr(#[from] QrError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(error = %self, "Request error");
        }

        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl AppError {
    fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::Internal(_)
                | Self::Auth(
                    AuthError::Repository(_) | AuthError::PasswordHash | AuthError::TokenSigning
                )
                | Self::Order(OrderError::Repository(_))
                | Self::Qr(QrError::Encode(_))
        )
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Database(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_owned(),
            ),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::UserNotFound => {
                    (StatusCode::UNAUTHORIZED, "Invalid credentials".to_owned())
                }
                AuthError::Blocked => (StatusCode::FORBIDDEN, "Account is blocked".to_owned()),
                AuthError::UserAlreadyExists => (
                    StatusCode::BAD_REQUEST,
                    "An account with this email already exists".to_owned(),
                ),
                AuthError::InvalidEmail(_) => {
                    (StatusCode::BAD_REQUEST, "Invalid email address".to_owned())
                }
                AuthError::WeakPassword(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                AuthError::MissingField(msg) => (StatusCode::BAD_REQUEST, (*msg).to_owned()),
                AuthError::Repository(_) | AuthError::PasswordHash | AuthError::TokenSigning => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                ),
            },
            Self::Order(err) => match err {
                OrderError::NotFound => (StatusCode::NOT_FOUND, "Order not found".to_owned()),
                OrderError::Cancel(CancelError::NotOwner) => {
                    (StatusCode::FORBIDDEN, CancelError::NotOwner.to_string())
                }
                OrderError::Cancel(e @ CancelError::NotPending) => {
                    (StatusCode::BAD_REQUEST, e.to_string())
                }
                OrderError::Status(
                    e @ (OrderStatusError::InvalidTarget(_) | OrderStatusError::Regression { .. }),
                ) => (StatusCode::BAD_REQUEST, e.to_string()),
                OrderError::Repository(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                ),
                other => (StatusCode::BAD_REQUEST, other.to_string()),
            },
            Self::Qr(err) => match err {
                QrError::Encode(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                ),
                other => (StatusCode::BAD_REQUEST, other.to_string()),
            },
            Self::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(
            status_of(AppError::BadRequest("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Unauthorized("x".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Forbidden("x".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::NotFound("Order".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duplicate_email_is_a_bad_request() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::UserAlreadyExists)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn blocked_account_is_forbidden() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::Blocked)),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn cancel_ownership_and_state_map_differently() {
        assert_eq!(
            status_of(AppError::Order(OrderError::Cancel(CancelError::NotOwner))),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::Order(OrderError::Cancel(CancelError::NotPending))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = AppError::Internal("connection pool exhausted".into());
        let (_, message) = err.status_and_message();
        assert_eq!(message, "Internal server error");
    }
}
