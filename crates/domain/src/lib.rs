//! Domain layer for the catalog API
//!
//! Contains the catalog entities, list queries, statistics and request
//! validation rules. This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod query;
pub mod validation;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use query::{ListQuery, Page, Pagination};
pub use validation::{FieldKind, FieldRule, validate_fields};
pub use value_objects::*;
