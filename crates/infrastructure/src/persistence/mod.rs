//! Persistence module
//!
//! SQLite-backed catalog stores, the in-memory fallback, and the shared
//! database handle.

pub mod connection;
pub mod error;
pub mod fallback_seed;
pub mod fallback_store;
pub mod sqlite_book_store;
pub mod sqlite_product_store;

pub use connection::{AsyncDatabaseError, DatabaseHandle, connect};
pub use fallback_seed::{seed_books, seed_products};
pub use fallback_store::FallbackStore;
pub use sqlite_book_store::SqliteBookStore;
pub use sqlite_product_store::SqliteProductStore;
