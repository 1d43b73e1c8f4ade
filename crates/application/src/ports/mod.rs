//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod resource_store;

pub use resource_store::{ResourceStore, StoreBackend};
