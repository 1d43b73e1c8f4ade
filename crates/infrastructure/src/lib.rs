//! Infrastructure layer - Adapters for external systems
//!
//! Implements the catalog storage port twice: SQLite through sqlx for the
//! persistent database and a locked in-process list for the fallback. Also
//! owns configuration loading.

pub mod config;
pub mod persistence;

pub use config::{AppConfig, DatabaseConfig, SecurityConfig, ServerConfig, StorageConfig};
pub use persistence::{
    AsyncDatabaseError, DatabaseHandle, FallbackStore, SqliteBookStore, SqliteProductStore,
    connect, seed_books, seed_products,
};
