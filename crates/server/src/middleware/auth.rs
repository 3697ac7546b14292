//! Authentication extractors and the login cookie.
//!
//! The login credential travels in an HTTP-only cookie. Extractors verify
//! it and then re-load the user row, so role demotions and blocks take
//! effect immediately instead of at token expiry. Every verification
//! failure is treated as an anonymous request.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use cookie::{Cookie, SameSite, time::Duration};

use cedar_market_core::{Role, UserStatus};

use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::User;
use crate::services::auth::{Claims, TOKEN_TTL_SECS};
use crate::state::AppState;

/// Name of the login cookie.
pub const AUTH_COOKIE: &str = "auth_token";

/// Build the login cookie for a freshly issued credential.
#[must_use]
pub fn build_auth_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(TOKEN_TTL_SECS))
        .secure(secure)
        .build()
}

/// Build an expired login cookie, clearing it from the browser.
#[must_use]
pub fn clear_auth_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::ZERO)
        .secure(secure)
        .build()
}

/// Pull the login token out of the request's Cookie header.
fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    for part in Cookie::split_parse(raw) {
        if let Ok(cookie) = part
            && cookie.name() == AUTH_COOKIE
        {
            return Some(cookie.value().to_owned());
        }
    }
    None
}

/// Resolve the request's user, or `None` for anonymous.
///
/// A valid token whose user row has vanished, or whose account has been
/// blocked since issue, also resolves to anonymous.
async fn current_user(parts: &Parts, state: &AppState) -> Result<Option<User>, AppError> {
    let Some(token) = token_from_headers(&parts.headers) else {
        return Ok(None);
    };
    let Some(claims) = state.tokens().verify(&token) else {
        return Ok(None);
    };

    let user = UserRepository::new(state.pool())
        .get_by_id(claims.user_id())
        .await?;

    Ok(user.filter(|u| u.status == UserStatus::Active))
}

/// Extractor that verifies the credential without touching the database.
///
/// Used where the handler wants to distinguish "no valid credential" (401)
/// from "credential fine but the user row is gone" (404).
pub struct RequireClaims(pub Claims);

impl FromRequestParts<AppState> for RequireClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        token_from_headers(&parts.headers)
            .and_then(|token| state.tokens().verify(&token))
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized("Login required".to_owned()))
    }
}

/// Extractor that requires a logged-in user of any role.
///
/// # Example
///
/// ```rust,ignore
/// async fn me(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     Json(user)
/// }
/// ```
pub struct RequireAuth(pub User);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        current_user(parts, state)
            .await?
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized("Login required".to_owned()))
    }
}

/// Extractor that requires customer capability.
///
/// Admins pass this gate too; admin capability is a superset of customer
/// capability.
pub struct RequireCustomer(pub User);

impl FromRequestParts<AppState> for RequireCustomer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = current_user(parts, state)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Login required".to_owned()))?;

        if !user.role.permits(Role::Customer) {
            return Err(AppError::Forbidden("Customer account required".to_owned()));
        }

        Ok(Self(user))
    }
}

/// Extractor that requires admin capability.
///
/// A logged-in customer gets 403, not 401; the handler is never invoked.
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = current_user(parts, state)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Login required".to_owned()))?;

        if !user.role.permits(Role::Admin) {
            return Err(AppError::Forbidden("Admin access required".to_owned()));
        }

        Ok(Self(user))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn login_cookie_carries_the_token_for_a_week() {
        let cookie = build_auth_cookie("tok".to_owned(), false);
        assert_eq!(cookie.name(), AUTH_COOKIE);
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::days(7)));
        assert_eq!(cookie.secure(), Some(false));
    }

    #[test]
    fn clearing_cookie_expires_immediately() {
        let cookie = clear_auth_cookie(true);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; auth_token=abc123; lang=en".parse().unwrap(),
        );
        assert_eq!(token_from_headers(&headers), Some("abc123".to_owned()));
    }

    #[test]
    fn missing_cookie_is_anonymous() {
        assert_eq!(token_from_headers(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "theme=dark".parse().unwrap());
        assert_eq!(token_from_headers(&headers), None);
    }
}
