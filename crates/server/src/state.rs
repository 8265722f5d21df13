//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::SqlitePool;

use crate::config::ServerConfig;
use crate::services::auth::TokenSigner;
use crate::services::catalog::CatalogCache;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and the token signer.
/// The configuration is consumed at construction time.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: SqlitePool,
    tokens: TokenSigner,
    catalog_cache: CatalogCache,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: &ServerConfig, pool: SqlitePool) -> Self {
        let tokens = TokenSigner::new(&config.jwt_secret, config.token_ttl_days);
        let catalog_cache = Cache::builder()
            .max_capacity(1024)
            .time_to_live(Duration::from_secs(config.catalog_cache_ttl_secs))
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                pool,
                tokens,
                catalog_cache,
            }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the session token signer.
    #[must_use]
    pub fn tokens(&self) -> &TokenSigner {
        &self.inner.tokens
    }

    /// Get a reference to the per-tenant catalog cache.
    #[must_use]
    pub fn catalog_cache(&self) -> &CatalogCache {
        &self.inner.catalog_cache
    }
}
