//! In-memory fallback store
//!
//! Serves a collection from a process-local list when the database is not
//! reachable. Contents live for the lifetime of the process only. Each
//! operation holds the lock for its whole read-modify-write.

use application::{
    error::ApplicationError,
    ports::{ResourceStore, StoreBackend},
};
use async_trait::async_trait;
use domain::{EntityId, ListQuery, Page, Resource};
use parking_lot::RwLock;
use tracing::{debug, instrument};

/// Lock-guarded list of entities
#[derive(Debug)]
pub struct FallbackStore<R: Resource> {
    items: RwLock<Vec<R>>,
}

impl<R: Resource> Default for FallbackStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> FallbackStore<R> {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Create a store holding `items` in the given order
    #[must_use]
    pub fn with_items(items: Vec<R>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Number of stored entities
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

#[async_trait]
impl<R: Resource> ResourceStore<R> for FallbackStore<R> {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }

    #[instrument(skip(self), fields(kind = R::KIND))]
    async fn list(&self, query: &ListQuery) -> Result<Page<R>, ApplicationError> {
        let matches: Vec<R> = self
            .items
            .read()
            .iter()
            .filter(|item| query.matches(*item))
            .cloned()
            .collect();
        Ok(Page::paginate(matches, query.pagination))
    }

    #[instrument(skip(self), fields(kind = R::KIND))]
    async fn search(&self, term: &str) -> Result<Vec<R>, ApplicationError> {
        if term.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .items
            .read()
            .iter()
            .filter(|item| item.matches_term(term))
            .cloned()
            .collect())
    }

    async fn stats(&self) -> Result<R::Stats, ApplicationError> {
        Ok(R::summarize(&self.items.read()))
    }

    async fn get(&self, id: &EntityId) -> Result<Option<R>, ApplicationError> {
        Ok(self
            .items
            .read()
            .iter()
            .find(|item| item.id() == id)
            .cloned())
    }

    #[instrument(skip(self, draft), fields(kind = R::KIND))]
    async fn create(&self, draft: R::Draft) -> Result<R, ApplicationError> {
        let entity = R::from_draft(EntityId::generate(), draft);
        self.items.write().push(entity.clone());
        debug!(id = %entity.id(), "Stored in fallback list");
        Ok(entity)
    }

    #[instrument(skip(self, draft), fields(kind = R::KIND))]
    async fn update(
        &self,
        id: &EntityId,
        draft: R::Draft,
    ) -> Result<Option<R>, ApplicationError> {
        let mut items = self.items.write();
        let Some(slot) = items.iter_mut().find(|item| item.id() == id) else {
            return Ok(None);
        };
        *slot = R::from_draft(id.clone(), draft);
        Ok(Some(slot.clone()))
    }

    #[instrument(skip(self), fields(kind = R::KIND))]
    async fn delete(&self, id: &EntityId) -> Result<Option<R>, ApplicationError> {
        let mut items = self.items.write();
        Ok(items
            .iter()
            .position(|item| item.id() == id)
            .map(|index| items.remove(index)))
    }
}
