//! HTTP middleware and request extractors.

pub mod auth;

pub use auth::{
    AUTH_COOKIE, RequireAdmin, RequireAuth, RequireClaims, RequireCustomer, build_auth_cookie,
    clear_auth_cookie,
};
