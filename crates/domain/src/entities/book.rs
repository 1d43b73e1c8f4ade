//! Book entity

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::resource::Resource;
use crate::{
    validation::{FieldKind, FieldRule},
    value_objects::EntityId,
};

/// A book in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Identifier assigned at creation
    pub id: EntityId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: i64,
    #[serde(serialize_with = "super::price::serialize")]
    pub price: f64,
    pub in_stock: bool,
    pub pages: i64,
    pub publisher: String,
}

/// Book fields accepted on create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: i64,
    #[serde(serialize_with = "super::price::serialize")]
    pub price: f64,
    pub in_stock: bool,
    pub pages: i64,
    pub publisher: String,
}

/// Aggregate book counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookStats {
    pub total: u64,
    /// Count per raw genre value (case-sensitive)
    pub by_genre: BTreeMap<String, u64>,
    /// Count per publication year
    pub by_year: BTreeMap<String, u64>,
    pub in_stock: u64,
    pub out_of_stock: u64,
}

// Zero year, price and page count are treated as missing.
const BOOK_RULES: &[FieldRule] = &[
    FieldRule::required("title", FieldKind::String),
    FieldRule::required("author", FieldKind::String),
    FieldRule::required("genre", FieldKind::String),
    FieldRule::required("published_year", FieldKind::Integer),
    FieldRule::required("price", FieldKind::Number),
    FieldRule::required("in_stock", FieldKind::Boolean),
    FieldRule::required("pages", FieldKind::Integer),
    FieldRule::required("publisher", FieldKind::String),
];

impl Resource for Book {
    type Draft = BookDraft;
    type Stats = BookStats;

    const KIND: &'static str = "Book";
    const RULES: &'static [FieldRule] = BOOK_RULES;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_draft(id: EntityId, draft: BookDraft) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            genre: draft.genre,
            published_year: draft.published_year,
            price: draft.price,
            in_stock: draft.in_stock,
            pages: draft.pages,
            publisher: draft.publisher,
        }
    }

    fn category(&self) -> &str {
        &self.genre
    }

    fn in_stock(&self) -> bool {
        self.in_stock
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.author.as_str(), self.publisher.as_str()]
    }

    fn summarize(items: &[Self]) -> BookStats {
        let mut stats = BookStats::default();
        for book in items {
            stats.total += 1;
            *stats.by_genre.entry(book.genre.clone()).or_default() += 1;
            *stats
                .by_year
                .entry(book.published_year.to_string())
                .or_default() += 1;
            if book.in_stock {
                stats.in_stock += 1;
            } else {
                stats.out_of_stock += 1;
            }
        }
        stats
    }
}
