//! Field presence and type rules for create/update payloads
//!
//! Payloads are checked as raw JSON before they are turned into typed drafts,
//! so a wrong type is reported as a validation failure instead of a parse
//! error. Every violated rule is collected into one message.

use serde_json::{Map, Value};

use crate::errors::DomainError;

/// JSON type a required field must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON string
    String,
    /// Any JSON number
    Number,
    /// JSON number without a fractional part
    Integer,
    /// JSON boolean
    Boolean,
}

impl FieldKind {
    /// Type name used in violation messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number | Self::Integer => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// Rule for a single required field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// JSON key of the field
    pub name: &'static str,
    /// Expected JSON type
    pub kind: FieldKind,
    /// Whether the type's zero value (`""`, `0`) counts as missing
    pub reject_empty: bool,
}

impl FieldRule {
    /// A required field whose zero value is treated as missing
    #[must_use]
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            reject_empty: true,
        }
    }

    /// Accept the type's zero value (`0`, `""`) as present
    #[must_use]
    pub const fn allow_empty(mut self) -> Self {
        self.reject_empty = false;
        self
    }

    /// Check the field's value in a payload
    #[must_use]
    pub fn accepts(&self, value: Option<&Value>) -> bool {
        match (self.kind, value) {
            (FieldKind::String, Some(Value::String(s))) => !(self.reject_empty && s.is_empty()),
            (FieldKind::Number, Some(Value::Number(n))) => n
                .as_f64()
                .is_some_and(|v| !(self.reject_empty && v == 0.0)),
            (FieldKind::Integer, Some(Value::Number(n))) => n
                .as_i64()
                .is_some_and(|v| !(self.reject_empty && v == 0)),
            (FieldKind::Boolean, Some(Value::Bool(_))) => true,
            _ => false,
        }
    }

    /// Violation message for this field
    #[must_use]
    pub fn violation(&self) -> String {
        format!(
            "{} is required and must be a {}",
            self.name,
            self.kind.label()
        )
    }
}

/// Validate a JSON payload against a rule set
///
/// Returns a single [`DomainError::ValidationError`] listing every violation
/// in rule order, joined with `"; "`. Anything other than a JSON object fails
/// every rule.
pub fn validate_fields(rules: &[FieldRule], payload: &Value) -> Result<(), DomainError> {
    let empty = Map::new();
    let object = payload.as_object().unwrap_or(&empty);

    let violations: Vec<String> = rules
        .iter()
        .filter(|rule| !rule.accepts(object.get(rule.name)))
        .map(FieldRule::violation)
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(DomainError::ValidationError(violations.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const RULES: &[FieldRule] = &[
        FieldRule::required("name", FieldKind::String),
        FieldRule::required("price", FieldKind::Number).allow_empty(),
        FieldRule::required("pages", FieldKind::Integer),
        FieldRule::required("in_stock", FieldKind::Boolean),
    ];

    fn message(payload: &Value) -> String {
        match validate_fields(RULES, payload) {
            Err(DomainError::ValidationError(msg)) => msg,
            other => unreachable!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_payload_passes() {
        let payload = json!({"name": "x", "price": 3.5, "pages": 10, "in_stock": true});
        assert!(validate_fields(RULES, &payload).is_ok());
    }

    #[test]
    fn false_boolean_is_present() {
        let payload = json!({"name": "x", "price": 1, "pages": 1, "in_stock": false});
        assert!(validate_fields(RULES, &payload).is_ok());
    }

    #[test]
    fn zero_allowed_when_rule_permits() {
        let payload = json!({"name": "x", "price": 0, "pages": 1, "in_stock": true});
        assert!(validate_fields(RULES, &payload).is_ok());
    }

    #[test]
    fn zero_rejected_for_strict_number() {
        let payload = json!({"name": "x", "price": 1, "pages": 0, "in_stock": true});
        assert_eq!(message(&payload), "pages is required and must be a number");
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let payload = json!({"name": "", "price": 1, "pages": 1, "in_stock": true});
        assert_eq!(message(&payload), "name is required and must be a string");
    }

    #[test]
    fn fractional_value_fails_integer_rule() {
        let payload = json!({"name": "x", "price": 1, "pages": 1.5, "in_stock": true});
        assert_eq!(message(&payload), "pages is required and must be a number");
    }

    #[test]
    fn wrong_types_are_reported() {
        let payload = json!({"name": 5, "price": "cheap", "pages": 1, "in_stock": "yes"});
        assert_eq!(
            message(&payload),
            "name is required and must be a string; \
             price is required and must be a number; \
             in_stock is required and must be a boolean"
        );
    }

    #[test]
    fn null_counts_as_missing() {
        let payload = json!({"name": null, "price": 1, "pages": 1, "in_stock": true});
        assert_eq!(message(&payload), "name is required and must be a string");
    }

    #[test]
    fn all_violations_are_collected_in_rule_order() {
        let msg = message(&json!({}));
        let parts: Vec<&str> = msg.split("; ").collect();
        assert_eq!(parts.len(), RULES.len());
        assert!(parts[0].starts_with("name"));
        assert!(parts[3].starts_with("in_stock"));
    }

    #[test]
    fn non_object_payload_fails_every_rule() {
        let msg = message(&json!([1, 2, 3]));
        assert_eq!(msg.split("; ").count(), RULES.len());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let payload =
            json!({"name": "x", "price": 1, "pages": 1, "in_stock": true, "extra": [1]});
        assert!(validate_fields(RULES, &payload).is_ok());
    }
}
