//! Catalog service
//!
//! Serves one resource collection from the persistent store when it is
//! reachable and from the in-memory fallback otherwise. The choice is made on
//! every call, so a database that comes up mid-run is used from the next
//! request on. Records already written to the fallback stay there.

use std::sync::Arc;

use domain::{DomainError, EntityId, ListQuery, Page, Resource};
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{ResourceStore, StoreBackend},
};

/// Catalog service for books
pub type BookService = CatalogService<domain::Book>;

/// Catalog service for products
pub type ProductService = CatalogService<domain::Product>;

/// CRUD, search and statistics over one collection
pub struct CatalogService<R: Resource> {
    primary: Option<Arc<dyn ResourceStore<R>>>,
    fallback: Arc<dyn ResourceStore<R>>,
}

impl<R: Resource> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            primary: self.primary.clone(),
            fallback: Arc::clone(&self.fallback),
        }
    }
}

impl<R: Resource> std::fmt::Debug for CatalogService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("kind", &R::KIND)
            .field("has_primary", &self.primary.is_some())
            .field("backend", &self.backend())
            .finish()
    }
}

impl<R: Resource> CatalogService<R> {
    /// Create a service backed only by the given fallback store
    #[must_use]
    pub fn new(fallback: Arc<dyn ResourceStore<R>>) -> Self {
        Self {
            primary: None,
            fallback,
        }
    }

    /// Prefer `primary` whenever it reports itself available
    #[must_use]
    pub fn with_primary(mut self, primary: Arc<dyn ResourceStore<R>>) -> Self {
        self.primary = Some(primary);
        self
    }

    /// Store that serves the current call
    fn store(&self) -> &dyn ResourceStore<R> {
        match &self.primary {
            Some(primary) if primary.is_available() => primary.as_ref(),
            _ => self.fallback.as_ref(),
        }
    }

    /// Backend that would serve a call made now
    pub fn backend(&self) -> StoreBackend {
        self.store().backend()
    }

    fn not_found(id: &EntityId) -> ApplicationError {
        DomainError::not_found(R::KIND, id.as_str()).into()
    }

    /// List entities matching the query, one page at a time
    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<R>, ApplicationError> {
        let store = self.store();
        let page = store.list(query).await?;
        debug!(
            backend = %store.backend(),
            total = page.total,
            returned = page.data.len(),
            "Listed entities"
        );
        Ok(page)
    }

    /// Unpaginated free-text search
    ///
    /// An empty term returns an empty list rather than the whole collection.
    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn search(&self, term: &str) -> Result<Vec<R>, ApplicationError> {
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let found = self.store().search(term).await?;
        debug!(count = found.len(), "Search finished");
        Ok(found)
    }

    /// Aggregate counts over the collection
    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn stats(&self) -> Result<R::Stats, ApplicationError> {
        self.store().stats().await
    }

    /// Get a single entity
    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn get(&self, id: &EntityId) -> Result<R, ApplicationError> {
        self.store()
            .get(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Create an entity with a freshly assigned ID
    #[instrument(skip(self, draft), fields(kind = R::KIND))]
    pub async fn create(&self, draft: R::Draft) -> Result<R, ApplicationError> {
        let store = self.store();
        let created = store.create(draft).await?;
        info!(id = %created.id(), backend = %store.backend(), "Entity created");
        Ok(created)
    }

    /// Replace every field of an entity except its ID
    #[instrument(skip(self, draft), fields(kind = R::KIND))]
    pub async fn update(&self, id: &EntityId, draft: R::Draft) -> Result<R, ApplicationError> {
        let updated = self
            .store()
            .update(id, draft)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        info!("Entity updated");
        Ok(updated)
    }

    /// Remove an entity and return it
    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn delete(&self, id: &EntityId) -> Result<R, ApplicationError> {
        let deleted = self
            .store()
            .delete(id)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        info!("Entity deleted");
        Ok(deleted)
    }
}
