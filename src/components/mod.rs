//! Presentational Components - Prop structs and render functions.
//!
//! These components carry no business logic: they accept plain props (label,
//! value, error, options, ...) and render to lines of text. Pages wire form
//! bindings into these props; nothing here reads or writes form state.
//!
//! - [`fields`] - text field, select, checkbox, choice list
//! - [`layout`] - page, card, stacks, grouped fields, divider, badge, banner

pub mod fields;
pub mod layout;

pub use fields::{
    checkbox, choice_list, select, text_field, CheckboxProps, ChoiceListProps, SelectProps,
    TextFieldProps,
};
pub use layout::{badge, banner, block_stack, card, divider, form_group, inline_stack, page, Tone};

// =============================================================================
// SHARED TYPES
// =============================================================================

/// One option of a select or choice list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> SelectOption {
        SelectOption {
            label: label.into(),
            value: value.into(),
        }
    }
}
