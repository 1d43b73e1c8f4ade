//! Health check handlers

use application::StoreBackend;
use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

/// Plain-text greeting served at `/`
pub const WELCOME_MESSAGE: &str = "Welcome to the Catalog API! Use /api/books and /api/products.";

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Backend that would serve a request made now
    pub backend: StoreBackend,
}

/// `GET /`
pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

/// Liveness check - is the server running, and on which backend?
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        backend: state.backend(),
    })
}

#[cfg(test)]
mod tests {
    use infrastructure::StorageConfig;

    use super::*;

    #[tokio::test]
    async fn health_reports_memory_backend_without_database() {
        let state = AppState::from_parts(&StorageConfig::default(), None);
        let Json(body) = health_check(State(state)).await;
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["backend"], "memory");
    }
}
