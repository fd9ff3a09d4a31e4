//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::PanelConfig;
use crate::store_api::{StoreApiClient, StoreApiError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PanelConfig,
    pool: SqlitePool,
    store_api: StoreApiClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the product API client cannot be constructed.
    pub fn new(config: PanelConfig, pool: SqlitePool) -> Result<Self, StoreApiError> {
        let store_api = StoreApiClient::new(&config.store_api)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                store_api,
            }),
        })
    }

    /// Get a reference to the panel configuration.
    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the product API client.
    #[must_use]
    pub fn store_api(&self) -> &StoreApiClient {
        &self.inner.store_api
    }
}
