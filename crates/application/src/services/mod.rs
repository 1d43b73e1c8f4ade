//! Application services

mod catalog_service;

pub use catalog_service::{BookService, CatalogService, ProductService};
