//! Field Binding - The adapter between one field path and an input component.
//!
//! A `FieldBinding` is the Rust rendition of a render-prop controller: it
//! exposes `{ value, on_change, on_blur, error }` for one path, and every
//! `on_change` writes through to the value tree and re-validates the path.
//! The binding itself never raises on rule violations - those are captured
//! into the ErrorMap and read back via `error()`.

use serde_json::Value;

use crate::error::FormError;
use crate::form::Form;
use crate::path::FieldPath;

// =============================================================================
// FIELD BINDING
// =============================================================================

/// Adapter connecting one form path to a presentational component.
#[derive(Clone)]
pub struct FieldBinding {
    form: Form,
    path: FieldPath,
}

impl FieldBinding {
    pub(crate) fn new(form: Form, path: FieldPath) -> FieldBinding {
        FieldBinding { form, path }
    }

    /// The bound path.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current value at the bound path (`Null` if absent).
    pub fn value(&self) -> Value {
        self.form.get(&self.path)
    }

    /// Current value as text. Non-strings render as empty.
    pub fn text(&self) -> String {
        match self.value() {
            Value::String(text) => text,
            _ => String::new(),
        }
    }

    /// Current value as a checkbox state. Non-booleans read as unchecked.
    pub fn is_checked(&self) -> bool {
        self.value().as_bool().unwrap_or(false)
    }

    /// Currently selected values for a multi-choice field.
    pub fn selected(&self) -> Vec<String> {
        match self.value() {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text),
                    _ => None,
                })
                .collect(),
            Value::String(text) => vec![text],
            _ => Vec::new(),
        }
    }

    /// The field's current error message, if any.
    pub fn error(&self) -> Option<String> {
        self.form.error(&self.path)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Write a new value through to the tree and re-validate this path.
    pub fn on_change(&self, value: Value) -> Result<(), FormError> {
        self.form.set_value(&self.path, value)
    }

    /// `on_change` for text inputs.
    pub fn on_change_text(&self, text: &str) -> Result<(), FormError> {
        self.on_change(Value::String(text.to_string()))
    }

    /// `on_change` for checkboxes.
    pub fn on_change_checked(&self, checked: bool) -> Result<(), FormError> {
        self.on_change(Value::Bool(checked))
    }

    /// Re-validate without writing (blur semantics).
    pub fn on_blur(&self) {
        self.form.trigger(Some(&self.path));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;
    use serde_json::json;

    #[test]
    fn test_text_round_trip() {
        let form = Form::new(json!({ "firstName": "" }));
        let binding = form.bind("firstName", vec![]).unwrap();

        binding.on_change_text("Grace").unwrap();
        assert_eq!(binding.text(), "Grace");
        assert_eq!(binding.value(), json!("Grace"));
    }

    #[test]
    fn test_error_set_and_cleared_on_change() {
        let form = Form::new(json!({ "email": "" }));
        let binding = form
            .bind(
                "email",
                vec![
                    Rule::required("Email is required"),
                    Rule::pattern(r"^[^@\s]+@[^@\s]+\.[^@\s]+$", "Invalid email").unwrap(),
                ],
            )
            .unwrap();

        binding.on_change_text("not-an-email").unwrap();
        assert_eq!(binding.error(), Some("Invalid email".to_string()));

        binding.on_change_text("grace@navy.mil").unwrap();
        assert_eq!(binding.error(), None);
    }

    #[test]
    fn test_on_blur_validates_untouched_field() {
        let form = Form::new(json!({ "country": "" }));
        let binding = form
            .bind("country", vec![Rule::required("Country is required")])
            .unwrap();

        assert_eq!(binding.error(), None);
        binding.on_blur();
        assert_eq!(binding.error(), Some("Country is required".to_string()));
    }

    #[test]
    fn test_checkbox_binding() {
        let form = Form::new(json!({ "terms": false }));
        let binding = form
            .bind("terms", vec![Rule::required("You must accept the terms")])
            .unwrap();

        assert!(!binding.is_checked());
        binding.on_change_checked(true).unwrap();
        assert!(binding.is_checked());
        assert_eq!(binding.error(), None);

        binding.on_change_checked(false).unwrap();
        assert_eq!(binding.error(), Some("You must accept the terms".to_string()));
    }

    #[test]
    fn test_selected_for_multi_choice() {
        let form = Form::new(json!({ "notifications": ["email", "sms"] }));
        let binding = form.bind("notifications", vec![]).unwrap();
        assert_eq!(binding.selected(), vec!["email".to_string(), "sms".to_string()]);
    }
}
