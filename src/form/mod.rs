//! Form Store - Reactive form state with declarative validation.
//!
//! A `Form` owns one value tree for the lifetime of a page instance:
//!
//! - `values` signal - the full FormValueTree (`serde_json::Value`)
//! - `errors` signal - the ErrorMap (first violated rule's message per path)
//! - rule registry - the rules declared by each `bind` call
//!
//! Every write goes through `set_value` (or a `FieldBinding`), which
//! re-validates the written path on the spot (on-change mode). Reads made
//! inside effects or deriveds are tracked by spark-signals, so the live state
//! reflector and any status badges re-render synchronously with each write.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use spark_forms::form::Form;
//! use spark_forms::rules::Rule;
//!
//! let form = Form::new(json!({ "email": "" }));
//! let email = form
//!     .bind("email", vec![Rule::required("Email is required")])
//!     .unwrap();
//!
//! email.on_change_text("a@b.co").unwrap();
//! assert_eq!(email.error(), None);
//! assert!(form.is_valid());
//! ```

pub mod address;
pub mod array;
pub mod binding;
pub mod reflector;
pub mod submit;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;
use spark_signals::{signal, Signal};

use crate::error::FormError;
use crate::path::FieldPath;
use crate::rules::{first_violation, Rule};
use crate::value::{get_path, set_path};

pub use array::{FieldArray, ItemId};
pub use binding::FieldBinding;
pub use submit::{SubmissionController, SubmissionSink, SubmissionState, TracingSink};

/// Current validation failures, keyed by field path.
pub type ErrorMap = BTreeMap<FieldPath, String>;

// =============================================================================
// FORM
// =============================================================================

struct FormInner {
    defaults: Value,
    values: Signal<Value>,
    errors: Signal<ErrorMap>,
    registry: RefCell<BTreeMap<FieldPath, Vec<Rule>>>,
}

/// Cloneable handle to one form instance's state.
#[derive(Clone)]
pub struct Form {
    inner: Rc<FormInner>,
}

impl Form {
    /// Create a form with the given default values.
    ///
    /// The defaults define the declared shape and key order of the tree;
    /// `reset` restores them exactly.
    pub fn new(defaults: Value) -> Form {
        Form {
            inner: Rc::new(FormInner {
                values: signal(defaults.clone()),
                errors: signal(ErrorMap::new()),
                registry: RefCell::new(BTreeMap::new()),
                defaults,
            }),
        }
    }

    // =========================================================================
    // Binding
    // =========================================================================

    /// Bind a field: register its rules and return the binding adapter.
    ///
    /// Re-binding the same path replaces its rules. Binding never validates
    /// by itself - errors appear on the first write or on `trigger`.
    pub fn bind(&self, path: &str, rules: Vec<Rule>) -> Result<FieldBinding, FormError> {
        let path = FieldPath::parse(path)?;
        Ok(self.bind_path(path, rules))
    }

    /// `bind` for an already-parsed path.
    pub fn bind_path(&self, path: FieldPath, rules: Vec<Rule>) -> FieldBinding {
        self.inner
            .registry
            .borrow_mut()
            .insert(path.clone(), rules);
        FieldBinding::new(self.clone(), path)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The full current value tree.
    ///
    /// Reactive when called inside an effect or derived.
    pub fn watch(&self) -> Value {
        self.inner.values.get()
    }

    /// The value at `path`, or `Null` if absent.
    pub fn get(&self, path: &FieldPath) -> Value {
        get_path(&self.inner.values.get(), path)
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// The declared defaults.
    pub fn defaults(&self) -> Value {
        self.inner.defaults.clone()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Write a value and re-validate that path (on-change mode).
    ///
    /// Rule violations land in the ErrorMap; the only `Err` cases are
    /// structural (writing through a scalar, etc.).
    pub fn set_value(&self, path: &FieldPath, value: Value) -> Result<(), FormError> {
        let mut tree = self.inner.values.get();
        set_path(&mut tree, path, value)?;
        self.inner.values.set(tree);
        tracing::debug!(field = %path, "field changed");
        self.validate_path(path);
        Ok(())
    }

    /// Restore defaults and clear the ErrorMap.
    pub fn reset(&self) {
        self.inner.values.set(self.inner.defaults.clone());
        self.inner.errors.set(ErrorMap::new());
        tracing::debug!("form reset to defaults");
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Re-validate one path, or every registered path.
    ///
    /// Returns whether the form is valid after the pass.
    pub fn trigger(&self, path: Option<&FieldPath>) -> bool {
        match path {
            Some(path) => {
                self.validate_path(path);
            }
            None => {
                let tree = self.inner.values.get();
                let mut errors = ErrorMap::new();
                for (path, rules) in self.inner.registry.borrow().iter() {
                    let value = get_path(&tree, path).cloned().unwrap_or(Value::Null);
                    if let Some(message) = first_violation(rules, &value) {
                        errors.insert(path.clone(), message);
                    }
                }
                tracing::debug!(errors = errors.len(), "validated all fields");
                self.inner.errors.set(errors);
            }
        }
        self.is_valid()
    }

    /// Validate every registered path without touching the ErrorMap.
    ///
    /// Used for validity badges and submit gating, where untouched fields
    /// should count against validity without showing inline errors yet.
    pub fn check_all(&self) -> bool {
        let tree = self.inner.values.get();
        self.inner.registry.borrow().iter().all(|(path, rules)| {
            let value = get_path(&tree, path).cloned().unwrap_or(Value::Null);
            first_violation(rules, &value).is_none()
        })
    }

    fn validate_path(&self, path: &FieldPath) {
        let value = self.get(path);
        let violation = self
            .inner
            .registry
            .borrow()
            .get(path)
            .and_then(|rules| first_violation(rules, &value));

        let mut errors = self.inner.errors.get();
        let changed = match violation {
            Some(message) => {
                let stale = errors.get(path) != Some(&message);
                if stale {
                    errors.insert(path.clone(), message);
                }
                stale
            }
            None => errors.remove(path).is_some(),
        };
        if changed {
            self.inner.errors.set(errors);
        }
    }

    // =========================================================================
    // ErrorMap access
    // =========================================================================

    /// Current ErrorMap snapshot. Reactive inside effects/deriveds.
    pub fn errors(&self) -> ErrorMap {
        self.inner.errors.get()
    }

    /// The error message for one path, if any.
    pub fn error(&self, path: &FieldPath) -> Option<String> {
        self.inner.errors.get().get(path).cloned()
    }

    /// Number of active validation failures.
    pub fn error_count(&self) -> usize {
        self.inner.errors.get().len()
    }

    /// True when the ErrorMap is empty.
    pub fn is_valid(&self) -> bool {
        self.inner.errors.get().is_empty()
    }

    // =========================================================================
    // Array bookkeeping (used by FieldArray)
    // =========================================================================

    /// Drop rules and errors for the removed element of an array and shift
    /// entries behind it down by one index, so indexed paths never
    /// desynchronize from the tree after a removal.
    pub(crate) fn prune_array_index(&self, array_path: &FieldPath, removed: usize) {
        {
            let mut registry = self.inner.registry.borrow_mut();
            let affected: Vec<(FieldPath, usize)> = registry
                .keys()
                .filter_map(|path| Some((path.clone(), path.index_after(array_path)?)))
                .collect();
            for (path, index) in affected {
                if index == removed {
                    registry.remove(&path);
                } else if index > removed {
                    if let Some(rules) = registry.remove(&path) {
                        registry.insert(path.with_index_after(array_path, index - 1), rules);
                    }
                }
            }
        }

        let mut errors = self.inner.errors.get();
        let affected: Vec<(FieldPath, usize)> = errors
            .keys()
            .filter_map(|path| Some((path.clone(), path.index_after(array_path)?)))
            .collect();
        let mut changed = false;
        for (path, index) in affected {
            if index == removed {
                errors.remove(&path);
                changed = true;
            } else if index > removed {
                if let Some(message) = errors.remove(&path) {
                    errors.insert(path.with_index_after(array_path, index - 1), message);
                    changed = true;
                }
            }
        }
        if changed {
            self.inner.errors.set(errors);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
