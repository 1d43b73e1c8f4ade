//! Property-based tests for pagination and payload validation
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{Book, EntityId, ListQuery, Page, Pagination, Product, Resource, validate_fields};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// Pagination Property Tests
// ============================================================================

mod pagination_tests {
    use super::*;

    proptest! {
        #[test]
        fn coerced_values_are_never_below_one(page in ".*", limit in ".*") {
            let p = Pagination::from_raw(Some(&page), Some(&limit));
            prop_assert!(p.page >= 1);
            prop_assert!(p.limit >= 1);
        }

        #[test]
        fn non_positive_page_is_one(page in i64::MIN..=0i64) {
            let p = Pagination::from_raw(Some(&page.to_string()), None);
            prop_assert_eq!(p.page, 1);
        }

        #[test]
        fn positive_numbers_are_kept(page in 1u32..100_000, limit in 1u32..1_000) {
            let p = Pagination::from_raw(Some(&page.to_string()), Some(&limit.to_string()));
            prop_assert_eq!(p, Pagination::new(page, limit));
        }

        #[test]
        fn alphabetic_input_uses_defaults(page in "[a-zA-Z]+", limit in "[a-zA-Z]+") {
            let p = Pagination::from_raw(Some(&page), Some(&limit));
            prop_assert_eq!(p, Pagination::default());
        }

        #[test]
        fn page_never_exceeds_limit(len in 0usize..200, page in 1u32..30, limit in 1u32..30) {
            let items: Vec<usize> = (0..len).collect();
            let result = Page::paginate(items, Pagination::new(page, limit));
            prop_assert_eq!(result.total, len as u64);
            prop_assert!(result.data.len() <= limit as usize);
        }

        #[test]
        fn pages_partition_the_collection(len in 0usize..100, limit in 1u32..15) {
            let items: Vec<usize> = (0..len).collect();
            let pages = (len as u32).div_ceil(limit).max(1);
            let mut seen = Vec::new();
            for page in 1..=pages {
                seen.extend(Page::paginate(items.clone(), Pagination::new(page, limit)).data);
            }
            prop_assert_eq!(seen, items);
        }
    }
}

// ============================================================================
// Filter Property Tests
// ============================================================================

mod filter_tests {
    use super::*;

    fn product(category: &str, name: &str) -> Product {
        Product {
            id: EntityId::generate(),
            name: name.to_string(),
            description: "plain".to_string(),
            price: 1.0,
            category: category.to_string(),
            in_stock: true,
        }
    }

    proptest! {
        #[test]
        fn category_filter_ignores_case(category in "[a-zA-Z]{1,12}") {
            let item = product(&category, "thing");
            let query = ListQuery::new(Pagination::default())
                .with_category(Some(category.to_uppercase()));
            prop_assert!(query.matches(&item));
        }

        #[test]
        fn any_substring_of_name_matches(name in "[a-z]{3,20}", start in 0usize..3) {
            let item = product("misc", &name);
            let term = name[start..].to_uppercase();
            prop_assert!(item.matches_term(&term));
        }
    }
}

// ============================================================================
// Validation Property Tests
// ============================================================================

mod validation_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_books_pass(
            title in "[a-zA-Z ]{1,30}",
            year in 1i64..3000,
            price in 0.01f64..1000.0,
            pages in 1i64..5000,
            in_stock in any::<bool>()
        ) {
            let payload = json!({
                "title": title, "author": "A", "genre": "G",
                "published_year": year, "price": price, "in_stock": in_stock,
                "pages": pages, "publisher": "P"
            });
            prop_assert!(validate_fields(Book::RULES, &payload).is_ok());
        }

        #[test]
        fn string_typed_numbers_fail(price in "[0-9]{1,5}") {
            let payload = json!({
                "name": "n", "description": "d", "price": price,
                "category": "c", "inStock": true
            });
            let err = validate_fields(Product::RULES, &payload).unwrap_err();
            prop_assert!(err.to_string().contains("price is required and must be a number"));
        }
    }
}
