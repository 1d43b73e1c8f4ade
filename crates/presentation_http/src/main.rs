//! Catalog HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use infrastructure::{AppConfig, DatabaseConfig, DatabaseHandle, connect};
use presentation_http::{AppState, cors_layer, create_router, spawn_database_reconnect_task};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "catalog_server=debug,presentation_http=debug,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config decides the log format, so load it before tracing is up
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(config.server.json_logs());

    if let Some(e) = config_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!("Catalog API v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = %config.server.port,
        database_configured = config.database.url().is_some(),
        "Configuration loaded"
    );

    let database = open_database(&config.database).await;
    let reconnect_task = database.as_ref().and_then(|handle| {
        let interval = config.database.reconnect_interval_secs;
        (!handle.is_connected() && interval > 0).then(|| {
            spawn_database_reconnect_task(
                Arc::clone(handle),
                config.database.clone(),
                Duration::from_secs(interval),
            )
        })
    });

    let state = AppState::from_parts(&config.storage, database.as_ref());
    info!(backend = %state.backend(), "Catalog services ready");

    let app = create_router(
        state,
        config.security.api_key.clone(),
        cors_layer(&config.server),
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    if let Some(task) = reconnect_task {
        task.abort();
    }
    if let Some(handle) = database {
        handle.close().await;
    }

    info!("Server shutdown complete");

    Ok(())
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Connect to the configured database, if any
///
/// A failed connect is not fatal: the handle stays empty and requests are
/// served from the fallback lists until the reconnect task succeeds.
async fn open_database(config: &DatabaseConfig) -> Option<Arc<DatabaseHandle>> {
    if config.url().is_none() {
        info!("No database configured, serving from in-memory fallback");
        return None;
    }

    let handle = Arc::new(DatabaseHandle::disconnected());
    match connect(config).await {
        Ok(pool) => {
            handle.install(pool);
            info!("Connected to catalog database");
        },
        Err(e) => {
            warn!(error = %e, "Database unavailable, serving from in-memory fallback");
        },
    }
    Some(handle)
}

async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
