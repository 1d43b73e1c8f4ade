//! Product entity

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::resource::Resource;
use crate::{
    validation::{FieldKind, FieldRule},
    value_objects::EntityId,
};

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier assigned at creation
    pub id: EntityId,
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "super::price::serialize")]
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

/// Product fields accepted on create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "super::price::serialize")]
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

/// Aggregate product counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total: u64,
    /// Count per raw category value (case-sensitive)
    pub counts: BTreeMap<String, u64>,
    pub in_stock: u64,
    pub out_of_stock: u64,
}

// A price of zero is a valid product price.
const PRODUCT_RULES: &[FieldRule] = &[
    FieldRule::required("name", FieldKind::String),
    FieldRule::required("description", FieldKind::String),
    FieldRule::required("price", FieldKind::Number).allow_empty(),
    FieldRule::required("category", FieldKind::String),
    FieldRule::required("inStock", FieldKind::Boolean),
];

impl Resource for Product {
    type Draft = ProductDraft;
    type Stats = ProductStats;

    const KIND: &'static str = "Product";
    const RULES: &'static [FieldRule] = PRODUCT_RULES;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_draft(id: EntityId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            in_stock: draft.in_stock,
        }
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn in_stock(&self) -> bool {
        self.in_stock
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }

    fn summarize(items: &[Self]) -> ProductStats {
        let mut stats = ProductStats::default();
        for product in items {
            stats.total += 1;
            *stats.counts.entry(product.category.clone()).or_default() += 1;
            if product.in_stock {
                stats.in_stock += 1;
            } else {
                stats.out_of_stock += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validation::validate_fields;

    fn product(name: &str, category: &str) -> Product {
        Product {
            id: EntityId::generate(),
            name: name.to_string(),
            description: "Ergonomic and quiet".to_string(),
            price: 25.0,
            category: category.to_string(),
            in_stock: true,
        }
    }

    #[test]
    fn serializes_in_stock_as_camel_case() {
        let value = serde_json::to_value(product("Mouse", "electronics")).unwrap();
        assert_eq!(value["inStock"], true);
        assert!(value.get("in_stock").is_none());
    }

    #[test]
    fn draft_deserializes_from_camel_case() {
        let draft: ProductDraft = serde_json::from_value(json!({
            "name": "Kettle", "description": "Boils water", "price": 0,
            "category": "kitchen", "inStock": false
        }))
        .unwrap();
        assert!(!draft.in_stock);
        assert!(draft.price.abs() < f64::EPSILON);
    }

    #[test]
    fn whole_price_serializes_as_integer() {
        let mut laptop = product("Laptop", "electronics");
        laptop.price = 1200.0;
        let text = serde_json::to_string(&laptop).unwrap();
        assert!(text.contains(r#""price":1200,"#), "{text}");
    }

    #[test]
    fn matching_folds_non_ascii_case() {
        let tv = product("Téléviseur", "Électronique");
        assert!(tv.matches_category("électronique"));
        assert!(tv.matches_term("TÉLÉ"));
        assert!(!tv.matches_category("electronique"));
    }

    #[test]
    fn search_matches_name_and_description_only() {
        let p = product("Wireless Mouse", "electronics");
        assert!(p.matches_term("mouse"));
        assert!(p.matches_term("QUIET"));
        assert!(!p.matches_term("electronics"));
    }

    #[test]
    fn summarize_counts_by_raw_category() {
        let mut items = vec![
            product("A", "kitchen"),
            product("B", "Kitchen"),
            product("C", "kitchen"),
        ];
        items[1].in_stock = false;
        let stats = Product::summarize(&items);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.counts.get("kitchen"), Some(&2));
        assert_eq!(stats.counts.get("Kitchen"), Some(&1));
        assert_eq!(stats.in_stock, 2);
        assert_eq!(stats.out_of_stock, 1);
    }

    #[test]
    fn product_rules_accept_zero_price() {
        let payload = json!({
            "name": "Sample", "description": "Free sample", "price": 0,
            "category": "promo", "inStock": false
        });
        assert!(validate_fields(Product::RULES, &payload).is_ok());
    }

    #[test]
    fn product_rules_report_every_missing_field() {
        let err = validate_fields(Product::RULES, &json!({"price": "1"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: name is required and must be a string; \
             description is required and must be a string; \
             price is required and must be a number; \
             category is required and must be a string; \
             inStock is required and must be a boolean"
        );
    }
}
