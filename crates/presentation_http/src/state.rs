//! Application state shared across handlers

use std::sync::Arc;

use application::{BookService, ProductService, StoreBackend};
use infrastructure::{
    DatabaseHandle, FallbackStore, SqliteBookStore, SqliteProductStore, StorageConfig,
    seed_books, seed_products,
};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Book collection
    pub books: Arc<BookService>,
    /// Product collection
    pub products: Arc<ProductService>,
}

impl AppState {
    #[must_use]
    pub fn new(books: BookService, products: ProductService) -> Self {
        Self {
            books: Arc::new(books),
            products: Arc::new(products),
        }
    }

    /// Wire both collections to their fallback lists and, when a database
    /// handle is given, to the SQLite stores reading from it
    #[must_use]
    pub fn from_parts(storage: &StorageConfig, database: Option<&Arc<DatabaseHandle>>) -> Self {
        let (books, products) = if storage.seed_fallback {
            (seed_books(), seed_products())
        } else {
            (Vec::new(), Vec::new())
        };

        let mut books = BookService::new(Arc::new(FallbackStore::with_items(books)));
        let mut products = ProductService::new(Arc::new(FallbackStore::with_items(products)));

        if let Some(handle) = database {
            books = books.with_primary(Arc::new(SqliteBookStore::new(Arc::clone(handle))));
            products =
                products.with_primary(Arc::new(SqliteProductStore::new(Arc::clone(handle))));
        }

        Self::new(books, products)
    }

    /// Backend serving requests right now
    pub fn backend(&self) -> StoreBackend {
        self.books.backend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_database_serves_from_memory() {
        let state = AppState::from_parts(&StorageConfig::default(), None);
        assert_eq!(state.backend(), StoreBackend::Memory);
    }

    #[test]
    fn disconnected_handle_still_serves_from_memory() {
        let handle = Arc::new(DatabaseHandle::disconnected());
        let state = AppState::from_parts(&StorageConfig::default(), Some(&handle));
        assert_eq!(state.backend(), StoreBackend::Memory);
    }
}
