//! Catalog HTTP presentation layer
//!
//! This crate provides the HTTP API for the book and product catalog.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod tasks;

pub use error::ApiError;
pub use middleware::{ApiKeyAuthLayer, RequestIdLayer, ResourcePayload};
pub use routes::{cors_layer, create_router};
pub use state::AppState;
pub use tasks::spawn_database_reconnect_task;
