//! List queries, pagination and the page envelope

use serde::{Deserialize, Serialize};

use crate::entities::Resource;

/// Page size used when none (or zero) is requested
pub const DEFAULT_LIMIT: u32 = 10;

/// First page number
pub const DEFAULT_PAGE: u32 = 1;

/// Effective page number and page size, both at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Build from already-coerced values, clamping both to at least 1
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Coerce raw query-string values
    ///
    /// Each value is read as a leading integer (`"3abc"` is 3). Missing,
    /// non-numeric and zero values fall back to the defaults; negative
    /// values clamp to 1.
    #[must_use]
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: coerce(page, DEFAULT_PAGE),
            limit: coerce(limit, DEFAULT_LIMIT),
        }
    }

    /// Number of items to skip
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page as usize)
            .saturating_sub(1)
            .saturating_mul(self.limit as usize)
    }
}

fn coerce(raw: Option<&str>, default: u32) -> u32 {
    match raw.and_then(parse_leading_int) {
        None | Some(0) => default,
        Some(value) if value < 0 => 1,
        Some(value) => u32::try_from(value).unwrap_or(u32::MAX),
    }
}

/// Parse the integer prefix of a string, ignoring leading whitespace
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Filter, search term and page for a list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Exact, case-insensitive match on the categorical field
    pub category: Option<String>,
    /// Case-insensitive substring match on the search fields
    pub term: Option<String>,
    pub pagination: Pagination,
}

impl ListQuery {
    /// Create a query with no filter and no search term
    #[must_use]
    pub fn new(pagination: Pagination) -> Self {
        Self {
            category: None,
            term: None,
            pagination,
        }
    }

    /// Restrict to a category; empty values are ignored
    #[must_use]
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category.filter(|c| !c.is_empty());
        self
    }

    /// Restrict to a search term; empty values are ignored
    #[must_use]
    pub fn with_term(mut self, term: Option<String>) -> Self {
        self.term = term.filter(|t| !t.is_empty());
        self
    }

    /// Whether an entity passes both the category filter and the search term
    pub fn matches<R: Resource>(&self, item: &R) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| item.matches_category(category))
            && self.term.as_deref().is_none_or(|term| item.matches_term(term))
    }
}

/// The `{total, page, limit, data}` list envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Number of matches before pagination
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Slice an already filtered collection
    #[must_use]
    pub fn paginate(matches: Vec<T>, pagination: Pagination) -> Self {
        let total = matches.len() as u64;
        let data = matches
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.limit as usize)
            .collect();
        Self {
            total,
            page: pagination.page,
            limit: pagination.limit,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        assert_eq!(Pagination::from_raw(None, None), Pagination::new(1, 10));
    }

    #[test]
    fn non_numeric_values_use_defaults() {
        assert_eq!(
            Pagination::from_raw(Some("abc"), Some("ten")),
            Pagination::new(1, 10)
        );
    }

    #[test]
    fn zero_uses_defaults() {
        assert_eq!(
            Pagination::from_raw(Some("0"), Some("0")),
            Pagination::new(1, 10)
        );
    }

    #[test]
    fn negative_values_clamp_to_one() {
        assert_eq!(
            Pagination::from_raw(Some("-3"), Some("-5")),
            Pagination { page: 1, limit: 1 }
        );
    }

    #[test]
    fn leading_integer_prefix_is_used() {
        assert_eq!(
            Pagination::from_raw(Some(" 2abc"), Some("5.9")),
            Pagination { page: 2, limit: 5 }
        );
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        assert_eq!(Pagination::new(3, 20).offset(), 40);
        assert_eq!(Pagination::new(1, 20).offset(), 0);
    }

    #[test]
    fn paginate_reports_total_before_slicing() {
        let page = Page::paginate((1..=7).collect::<Vec<_>>(), Pagination::new(2, 3));
        assert_eq!(page.total, 7);
        assert_eq!(page.data, vec![4, 5, 6]);
    }

    #[test]
    fn paginate_past_the_end_is_empty() {
        let page = Page::paginate(vec![1, 2], Pagination::new(5, 10));
        assert_eq!(page.total, 2);
        assert!(page.data.is_empty());
    }

    #[test]
    fn empty_filters_are_dropped() {
        let query = ListQuery::new(Pagination::default())
            .with_category(Some(String::new()))
            .with_term(Some(String::new()));
        assert!(query.category.is_none());
        assert!(query.term.is_none());
    }
}
