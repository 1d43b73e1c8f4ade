//! Catalog entities

mod book;
pub(crate) mod price;
mod product;
mod resource;

pub use book::{Book, BookDraft, BookStats};
pub use product::{Product, ProductDraft, ProductStats};
pub use resource::{Resource, fold_case};
