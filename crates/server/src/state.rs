//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use cedar_market_core::TransitionPolicy;

use crate::config::ServerConfig;
use crate::services::auth::AuthTokens;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    tokens: AuthTokens,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let tokens = AuthTokens::new(&config.token_secret);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                tokens,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the credential signer/verifier.
    #[must_use]
    pub fn tokens(&self) -> &AuthTokens {
        &self.inner.tokens
    }

    /// The configured order-lifecycle transition policy.
    #[must_use]
    pub fn transition_policy(&self) -> TransitionPolicy {
        self.inner.config.transition_policy
    }
}
