//! Behavior shared by every catalog collection

use std::fmt::Debug;

use serde::{Serialize, de::DeserializeOwned};

use crate::{validation::FieldRule, value_objects::EntityId};

/// A catalog entity kind (book, product)
///
/// Storage backends and handlers are written once against this trait. Each
/// kind names its categorical field, its free-text search fields and its
/// payload rules.
pub trait Resource: Clone + Debug + Serialize + Send + Sync + 'static {
    /// Entity fields without the identifier, as accepted on create/update
    type Draft: Clone + Debug + DeserializeOwned + Send + Sync + 'static;

    /// Aggregate counts returned by the stats endpoint
    type Stats: Clone + Debug + Serialize + Send + Sync + 'static;

    /// Display name used in messages ("Book")
    const KIND: &'static str;

    /// Rules every create/update payload must satisfy
    const RULES: &'static [FieldRule];

    /// Stable identifier
    fn id(&self) -> &EntityId;

    /// Build the stored entity from a draft and its identifier
    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;

    /// Value of the categorical field (genre, category)
    fn category(&self) -> &str;

    /// Whether the entity is in stock
    fn in_stock(&self) -> bool;

    /// Text fields matched by free-text search
    fn search_fields(&self) -> Vec<&str>;

    /// Compute aggregate counts over a full collection
    fn summarize(items: &[Self]) -> Self::Stats;

    /// Case-insensitive exact match on the categorical field
    fn matches_category(&self, category: &str) -> bool {
        fold_case(self.category()) == fold_case(category)
    }

    /// Case-insensitive substring match on any search field
    fn matches_term(&self, term: &str) -> bool {
        let needle = fold_case(term);
        self.search_fields()
            .iter()
            .any(|field| fold_case(field).contains(&needle))
    }
}

/// Case folding used by every case-insensitive comparison
///
/// Storage backends that match in SQL keep values folded with this function
/// so both backends agree on non-ASCII text.
#[must_use]
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}
