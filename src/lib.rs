//! # spark-forms
//!
//! Reactive form state for terminal UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A form owns one value tree (insertion-ordered JSON) held in a signal, a
//! rule registry keyed by field path, and an error map signal. Everything
//! above the store is derived:
//!
//! ```text
//! Form tree signal → bindings (value/error per path) → components → page render
//!                  → snapshot derived (live JSON reflector)
//! ```
//!
//! Field edits flow the other way: a binding writes a value at its path,
//! which validates that path and notifies every derived reader.
//!
//! ## Modules
//!
//! - [`path`] - field paths (`contactPerson.email`, `addresses[0].city`)
//! - [`value`] - get/set/remove at a path inside the value tree
//! - [`rules`] - declarative validation rules and messages
//! - [`form`] - the form store, bindings, field arrays, reflector, submission
//! - [`components`] - presentational inputs and layout pieces (props in, lines out)
//! - [`pages`] - the contact and company example pages

pub mod components;
pub mod error;
pub mod form;
pub mod pages;
pub mod path;
pub mod rules;
pub mod value;

// Re-export commonly used items
pub use error::{FormError, PathError};
pub use path::{FieldPath, Segment};
pub use rules::Rule;

pub use form::{
    // Store
    ErrorMap, Form,
    // Bindings and arrays
    FieldArray, FieldBinding, ItemId,
    // Submission
    SubmissionController, SubmissionSink, SubmissionState, TracingSink,
};

pub use form::address::{copy_billing_to_shipping, AddressKind, AddressRecord, CopyOutcome};

pub use form::reflector::{create_snapshot_derived, snapshot, subscribe};

pub use components::{
    badge, banner, block_stack, card, checkbox, choice_list, divider, form_group, inline_stack,
    page, select, text_field, CheckboxProps, ChoiceListProps, SelectOption, SelectProps,
    TextFieldProps, Tone,
};

pub use pages::{
    apply_edit, bind_specs, focus_next, focus_previous, render_field, Control, EditKey, FieldSpec,
};
