//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::BistroConfig;
use crate::services::{ChargeClient, ChargeError, TokenService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to shared
/// resources: configuration, the database pool, the token service, and the
/// charge-processor client. Everything here is constructed once at startup
/// and injected; no component reaches for global connection state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BistroConfig,
    pool: PgPool,
    tokens: TokenService,
    charge: ChargeClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the charge client cannot be built.
    pub fn new(config: BistroConfig, pool: PgPool) -> Result<Self, ChargeError> {
        let tokens = TokenService::new(&config.token_secret);
        let charge = ChargeClient::new(&config.charge)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                tokens,
                charge,
            }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &BistroConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    /// Get a reference to the charge-processor client.
    #[must_use]
    pub fn charge(&self) -> &ChargeClient {
        &self.inner.charge
    }
}
