//! Catalog storage port
//!
//! Defines the interface every storage backend offers for a resource kind.
//! The in-memory fallback list and the database both implement it, so the
//! service above never branches on the backend.

use std::fmt;

use async_trait::async_trait;
use domain::{EntityId, ListQuery, Page, Resource};
use serde::Serialize;

use crate::error::ApplicationError;

/// Which kind of backend served a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Persistent database
    Database,
    /// In-process fallback list
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database => write!(f, "database"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Port for one catalog collection
#[async_trait]
pub trait ResourceStore<R: Resource>: Send + Sync {
    /// Backend kind, used for logging and health reporting
    fn backend(&self) -> StoreBackend;

    /// Whether the backend can serve requests right now
    ///
    /// Checked on every call; the answer may change while the process runs.
    fn is_available(&self) -> bool {
        true
    }

    /// Filtered, paginated listing
    async fn list(&self, query: &ListQuery) -> Result<Page<R>, ApplicationError>;

    /// All entities whose search fields contain `term`
    ///
    /// An empty term matches nothing.
    async fn search(&self, term: &str) -> Result<Vec<R>, ApplicationError>;

    /// Aggregate counts over the whole collection
    async fn stats(&self) -> Result<R::Stats, ApplicationError>;

    /// Get an entity by ID
    async fn get(&self, id: &EntityId) -> Result<Option<R>, ApplicationError>;

    /// Store a new entity and return it with its assigned ID
    async fn create(&self, draft: R::Draft) -> Result<R, ApplicationError>;

    /// Replace every field of an entity except its ID
    ///
    /// # Returns
    /// The updated entity, or `None` if the ID is unknown
    async fn update(&self, id: &EntityId, draft: R::Draft)
    -> Result<Option<R>, ApplicationError>;

    /// Remove an entity
    ///
    /// # Returns
    /// The removed entity, or `None` if the ID is unknown
    async fn delete(&self, id: &EntityId) -> Result<Option<R>, ApplicationError>;
}
