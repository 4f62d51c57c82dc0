//! Validation Rules - Declarative per-field constraints.
//!
//! Each bound field carries a list of `Rule`s, evaluated in declaration order
//! by `first_violation`. The first rule that fails supplies the field's error
//! message; later rules are not consulted. No rule ever raises - violations
//! only ever become ErrorMap entries.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use spark_forms::rules::{first_violation, Rule};
//!
//! let rules = vec![
//!     Rule::required("Email is required"),
//!     Rule::pattern(r"^[^@\s]+@[^@\s]+\.[^@\s]+$", "Invalid email").unwrap(),
//! ];
//!
//! assert_eq!(
//!     first_violation(&rules, &json!("")),
//!     Some("Email is required".to_string())
//! );
//! assert_eq!(first_violation(&rules, &json!("a@b.co")), None);
//! ```

use std::fmt;
use std::rc::Rc;

use regex::Regex;
use serde_json::Value;

// =============================================================================
// RULE
// =============================================================================

/// Custom check callback (Rc for shared ownership, matching the crate's
/// callback convention).
pub type CustomCheck = Rc<dyn Fn(&Value) -> bool>;

/// A single declarative constraint with its error message.
#[derive(Clone)]
pub enum Rule {
    /// Value must be present: not `Null`, not an empty string, not `false`,
    /// not an empty array.
    Required { message: String },
    /// Strings must have at least `min` characters. Non-strings pass.
    MinLength { min: usize, message: String },
    /// Strings must have at most `max` characters. Non-strings pass.
    MaxLength { max: usize, message: String },
    /// Strings must match the pattern. Empty strings pass, so a pattern on an
    /// optional field only fires once the user has typed something.
    Pattern { pattern: Regex, message: String },
    /// Arbitrary predicate; fails when the check returns false.
    Custom { check: CustomCheck, message: String },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Rule {
        Rule::Required {
            message: message.into(),
        }
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Rule {
        Rule::MinLength {
            min,
            message: message.into(),
        }
    }

    pub fn max_length(max: usize, message: impl Into<String>) -> Rule {
        Rule::MaxLength {
            max,
            message: message.into(),
        }
    }

    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Rule, regex::Error> {
        Ok(Rule::Pattern {
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    pub fn custom(check: impl Fn(&Value) -> bool + 'static, message: impl Into<String>) -> Rule {
        Rule::Custom {
            check: Rc::new(check),
            message: message.into(),
        }
    }

    /// The message attached to this rule.
    pub fn message(&self) -> &str {
        match self {
            Rule::Required { message }
            | Rule::MinLength { message, .. }
            | Rule::MaxLength { message, .. }
            | Rule::Pattern { message, .. }
            | Rule::Custom { message, .. } => message,
        }
    }

    /// Whether `value` satisfies this rule.
    pub fn check(&self, value: &Value) -> bool {
        match self {
            Rule::Required { .. } => match value {
                Value::Null => false,
                Value::String(text) => !text.is_empty(),
                Value::Bool(checked) => *checked,
                Value::Array(items) => !items.is_empty(),
                _ => true,
            },
            Rule::MinLength { min, .. } => match value {
                Value::String(text) => text.chars().count() >= *min,
                _ => true,
            },
            Rule::MaxLength { max, .. } => match value {
                Value::String(text) => text.chars().count() <= *max,
                _ => true,
            },
            Rule::Pattern { pattern, .. } => match value {
                Value::String(text) => text.is_empty() || pattern.is_match(text),
                _ => true,
            },
            Rule::Custom { check, .. } => check(value),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required { message } => f.debug_struct("Required").field("message", message).finish(),
            Rule::MinLength { min, message } => f
                .debug_struct("MinLength")
                .field("min", min)
                .field("message", message)
                .finish(),
            Rule::MaxLength { max, message } => f
                .debug_struct("MaxLength")
                .field("max", max)
                .field("message", message)
                .finish(),
            Rule::Pattern { pattern, message } => f
                .debug_struct("Pattern")
                .field("pattern", &pattern.as_str())
                .field("message", message)
                .finish(),
            Rule::Custom { message, .. } => f.debug_struct("Custom").field("message", message).finish(),
        }
    }
}

// =============================================================================
// VALIDATOR
// =============================================================================

/// Evaluate rules in order; return the first violated rule's message.
///
/// A missing field value is treated as `Null`, so `Required` fires for
/// fields that were never written.
pub fn first_violation(rules: &[Rule], value: &Value) -> Option<String> {
    rules
        .iter()
        .find(|rule| !rule.check(value))
        .map(|rule| rule.message().to_string())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required() {
        let rule = Rule::required("required");
        assert!(!rule.check(&Value::Null));
        assert!(!rule.check(&json!("")));
        assert!(!rule.check(&json!(false)));
        assert!(!rule.check(&json!([])));
        assert!(rule.check(&json!("x")));
        assert!(rule.check(&json!(true)));
        assert!(rule.check(&json!(["email"])));
        assert!(rule.check(&json!(0)));
    }

    #[test]
    fn test_min_length() {
        let rule = Rule::min_length(2, "too short");
        assert!(!rule.check(&json!("a")));
        assert!(rule.check(&json!("ab")));
        // Character count, not byte count.
        assert!(rule.check(&json!("éé")));
        // Non-strings pass; Required is responsible for presence.
        assert!(rule.check(&Value::Null));
    }

    #[test]
    fn test_max_length() {
        let rule = Rule::max_length(3, "too long");
        assert!(rule.check(&json!("abc")));
        assert!(!rule.check(&json!("abcd")));
    }

    #[test]
    fn test_pattern() {
        let rule = Rule::pattern(r"^https?://.+", "must be a URL").unwrap();
        assert!(rule.check(&json!("https://example.com")));
        assert!(!rule.check(&json!("example.com")));
        // Optional-field semantics: empty strings pass pattern rules.
        assert!(rule.check(&json!("")));
    }

    #[test]
    fn test_pattern_invalid_regex() {
        assert!(Rule::pattern("(", "broken").is_err());
    }

    #[test]
    fn test_custom() {
        let rule = Rule::custom(|value| value.as_i64().is_some_and(|n| n > 0), "must be positive");
        assert!(rule.check(&json!(3)));
        assert!(!rule.check(&json!(-1)));
    }

    #[test]
    fn test_first_violation_order() {
        let rules = vec![
            Rule::required("required"),
            Rule::min_length(2, "too short"),
        ];

        assert_eq!(first_violation(&rules, &json!("")), Some("required".to_string()));
        assert_eq!(first_violation(&rules, &json!("a")), Some("too short".to_string()));
        assert_eq!(first_violation(&rules, &json!("ab")), None);
    }

    #[test]
    fn test_first_violation_empty_rules() {
        assert_eq!(first_violation(&[], &Value::Null), None);
    }
}
