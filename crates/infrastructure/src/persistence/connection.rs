//! Async database connection using sqlx
//!
//! The catalog database is optional. [`connect`] opens a pool and applies the
//! workspace migrations; [`DatabaseHandle`] holds whichever pool is live so the
//! stores can report availability and a background task can install a pool
//! after a failed start.

use std::{str::FromStr, sync::Arc, time::Duration};

use arc_swap::ArcSwapOption;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::{debug, info, instrument};

use crate::config::DatabaseConfig;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Error type for async database operations
#[derive(Debug, thiserror::Error)]
pub enum AsyncDatabaseError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Open a pool for the configured URL and run pending migrations
#[instrument(skip_all)]
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, AsyncDatabaseError> {
    let url = config
        .url()
        .ok_or_else(|| AsyncDatabaseError::Config("database.url is not set".to_string()))?;

    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .min_connections(1)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await?;

    sqlx::migrate!("../../migrations").run(&pool).await?;

    info!(
        max_connections = config.max_connections,
        "Catalog database connected"
    );
    Ok(pool)
}

/// Shared slot for the live database pool
#[derive(Debug, Default)]
pub struct DatabaseHandle {
    pool: ArcSwapOption<SqlitePool>,
}

impl DatabaseHandle {
    /// Handle with no pool; stores report themselves unavailable
    #[must_use]
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Handle wrapping an open pool
    #[must_use]
    pub fn connected(pool: SqlitePool) -> Self {
        let handle = Self::default();
        handle.install(pool);
        handle
    }

    /// Make `pool` the live pool, replacing any previous one
    pub fn install(&self, pool: SqlitePool) {
        self.pool.store(Some(Arc::new(pool)));
        debug!("Database pool installed");
    }

    /// Live pool, if one is installed and still open
    #[must_use]
    pub fn current(&self) -> Option<Arc<SqlitePool>> {
        self.pool.load_full().filter(|pool| !pool.is_closed())
    }

    /// Whether requests can be served from the database right now
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.current().is_some()
    }

    /// Close and drop the live pool
    pub async fn close(&self) {
        if let Some(pool) = self.pool.swap(None) {
            pool.close().await;
            debug!("Database pool closed");
        }
    }
}
