//! Database reconnect task
//!
//! When the catalog database could not be reached at startup, retries the
//! connection at a fixed interval and installs the pool once it succeeds.
//! Requests switch from the fallback lists to the database on their own.

use std::{sync::Arc, time::Duration};

use infrastructure::{DatabaseConfig, DatabaseHandle, connect};
use tracing::{debug, info, warn};

/// Spawn a background task that keeps trying to connect to the database.
///
/// The task ends after the first successful connect, or immediately if the
/// handle is already connected.
///
/// Returns a `JoinHandle` that can be used to abort the task when shutting down.
pub fn spawn_database_reconnect_task(
    handle: Arc<DatabaseHandle>,
    config: DatabaseConfig,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    info!(
        interval_secs = interval.as_secs(),
        "Starting database reconnect task"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The startup attempt just failed; wait a full interval first
        ticker.tick().await;

        let mut attempt: u32 = 0;
        loop {
            ticker.tick().await;
            if handle.is_connected() {
                debug!("Database already connected, stopping reconnect task");
                return;
            }

            attempt += 1;
            match connect(&config).await {
                Ok(pool) => {
                    handle.install(pool);
                    info!(attempt, "Database reconnected, serving from database");
                    return;
                },
                Err(e) => {
                    warn!(attempt, error = %e, "Database still unreachable");
                },
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(20);

    #[tokio::test]
    async fn installs_pool_once_database_is_reachable() {
        let handle = Arc::new(DatabaseHandle::disconnected());
        let config = DatabaseConfig {
            max_connections: 1,
            ..DatabaseConfig::with_url("sqlite::memory:")
        };

        let task = spawn_database_reconnect_task(Arc::clone(&handle), config, TICK);
        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();

        assert!(handle.is_connected());
    }

    #[tokio::test]
    async fn keeps_retrying_while_unreachable() {
        let handle = Arc::new(DatabaseHandle::disconnected());
        let config = DatabaseConfig::with_url("sqlite:/nonexistent-dir/for/catalog/tests.db");

        let task = spawn_database_reconnect_task(Arc::clone(&handle), config, TICK);
        tokio::time::sleep(TICK * 5).await;

        assert!(!task.is_finished());
        assert!(!handle.is_connected());
        task.abort();
    }
}
