//! Demo Pages - Scaffolding shared by the two example forms.
//!
//! A page is a list of `FieldSpec`s (path + label + control + rules), a
//! focus position, and a render function that composes the presentational
//! components with the live form state. Key handling routes edits into the
//! focused field's binding:
//!
//! - text fields: characters append, Backspace deletes
//! - checkboxes: Space toggles
//! - selects and single choice lists: arrows cycle the options
//! - multi choice lists: digits 1-9 toggle the corresponding choice
//!
//! # Modules
//!
//! - [`contact`] - the basic contact form
//! - [`company`] - the advanced company form with an address field array

pub mod company;
pub mod contact;

use crate::components::fields::{
    checkbox, choice_list, select, text_field, CheckboxProps, ChoiceListProps, SelectProps,
    TextFieldProps,
};
use crate::components::SelectOption;
use crate::error::FormError;
use crate::form::Form;
use crate::path::FieldPath;
use crate::rules::Rule;

use serde_json::Value;

// =============================================================================
// KEYS
// =============================================================================

/// UI-agnostic edit keys routed into the focused field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Char(char),
    Backspace,
    Space,
    Up,
    Down,
    Left,
    Right,
}

// =============================================================================
// FIELD SPECS
// =============================================================================

/// Which input control a field renders as.
#[derive(Clone)]
pub enum Control {
    Text {
        placeholder: Option<String>,
        multiline: usize,
    },
    Select {
        options: Vec<SelectOption>,
    },
    Checkbox,
    ChoiceList {
        choices: Vec<SelectOption>,
        multiple: bool,
    },
}

/// One declared field: where it lives, how it renders, what rules guard it.
#[derive(Clone)]
pub struct FieldSpec {
    pub label: String,
    pub path: FieldPath,
    pub control: Control,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn text(label: &str, path: &str, rules: Vec<Rule>) -> Result<FieldSpec, FormError> {
        Ok(FieldSpec {
            label: label.to_string(),
            path: FieldPath::parse(path)?,
            control: Control::Text {
                placeholder: None,
                multiline: 0,
            },
            rules,
        })
    }

    pub fn select(
        label: &str,
        path: &str,
        options: Vec<SelectOption>,
        rules: Vec<Rule>,
    ) -> Result<FieldSpec, FormError> {
        Ok(FieldSpec {
            label: label.to_string(),
            path: FieldPath::parse(path)?,
            control: Control::Select { options },
            rules,
        })
    }

    pub fn checkbox(label: &str, path: &str, rules: Vec<Rule>) -> Result<FieldSpec, FormError> {
        Ok(FieldSpec {
            label: label.to_string(),
            path: FieldPath::parse(path)?,
            control: Control::Checkbox,
            rules,
        })
    }

    pub fn choices(
        label: &str,
        path: &str,
        choices: Vec<SelectOption>,
        multiple: bool,
        rules: Vec<Rule>,
    ) -> Result<FieldSpec, FormError> {
        Ok(FieldSpec {
            label: label.to_string(),
            path: FieldPath::parse(path)?,
            control: Control::ChoiceList { choices, multiple },
            rules,
        })
    }

    /// Builder-style placeholder.
    pub fn placeholder(mut self, text: &str) -> FieldSpec {
        if let Control::Text { placeholder, .. } = &mut self.control {
            *placeholder = Some(text.to_string());
        }
        self
    }

    /// Builder-style multiline rows.
    pub fn multiline(mut self, rows: usize) -> FieldSpec {
        if let Control::Text { multiline, .. } = &mut self.control {
            *multiline = rows;
        }
        self
    }
}

/// Register every spec's rules with the form.
pub fn bind_specs(form: &Form, specs: &[FieldSpec]) {
    for spec in specs {
        form.bind_path(spec.path.clone(), spec.rules.clone());
    }
}

// =============================================================================
// FOCUS
// =============================================================================

/// Next focus position, wrapping at the end.
pub fn focus_next(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + 1) % len }
}

/// Previous focus position, wrapping at the start.
pub fn focus_previous(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

// =============================================================================
// EDITING
// =============================================================================

/// Route one key into the field at `spec`, writing through its binding.
pub fn apply_edit(form: &Form, spec: &FieldSpec, key: EditKey) -> Result<(), FormError> {
    let binding = form.bind_path(spec.path.clone(), spec.rules.clone());

    match &spec.control {
        Control::Text { .. } => match key {
            EditKey::Char(c) => {
                let mut text = binding.text();
                text.push(c);
                binding.on_change_text(&text)
            }
            EditKey::Space => {
                let mut text = binding.text();
                text.push(' ');
                binding.on_change_text(&text)
            }
            EditKey::Backspace => {
                let mut text = binding.text();
                text.pop();
                binding.on_change_text(&text)
            }
            _ => Ok(()),
        },
        Control::Checkbox => match key {
            EditKey::Space => binding.on_change_checked(!binding.is_checked()),
            _ => Ok(()),
        },
        Control::Select { options } => match key {
            EditKey::Down | EditKey::Right => cycle_option(&binding, options, 1),
            EditKey::Up | EditKey::Left => cycle_option(&binding, options, -1),
            _ => Ok(()),
        },
        Control::ChoiceList { choices, multiple } => {
            if *multiple {
                if let EditKey::Char(digit @ '1'..='9') = key {
                    let position = digit as usize - '1' as usize;
                    if let Some(choice) = choices.get(position) {
                        let mut selected = binding.selected();
                        match selected.iter().position(|value| value == &choice.value) {
                            Some(found) => {
                                selected.remove(found);
                            }
                            None => selected.push(choice.value.clone()),
                        }
                        let values = selected.into_iter().map(Value::String).collect();
                        return binding.on_change(Value::Array(values));
                    }
                }
                Ok(())
            } else {
                match key {
                    EditKey::Down | EditKey::Right => cycle_option(&binding, choices, 1),
                    EditKey::Up | EditKey::Left => cycle_option(&binding, choices, -1),
                    _ => Ok(()),
                }
            }
        }
    }
}

fn cycle_option(
    binding: &crate::form::FieldBinding,
    options: &[SelectOption],
    step: isize,
) -> Result<(), FormError> {
    if options.is_empty() {
        return Ok(());
    }
    let current = binding.text();
    let position = options
        .iter()
        .position(|option| option.value == current)
        .unwrap_or(0) as isize;
    let len = options.len() as isize;
    let next = (position + step).rem_euclid(len) as usize;
    binding.on_change_text(&options[next].value)
}

// =============================================================================
// RENDERING
// =============================================================================

/// Render one field spec from the live form state.
pub fn render_field(form: &Form, spec: &FieldSpec, focused: bool) -> Vec<String> {
    let value = form.get(&spec.path);
    let error = form.error(&spec.path);

    match &spec.control {
        Control::Text {
            placeholder,
            multiline,
        } => text_field(&TextFieldProps {
            label: spec.label.clone(),
            value: value.as_str().unwrap_or("").to_string(),
            placeholder: placeholder.clone(),
            error,
            multiline: *multiline,
            focused,
        }),
        Control::Select { options } => select(&SelectProps {
            label: spec.label.clone(),
            options: options.clone(),
            value: value.as_str().unwrap_or("").to_string(),
            error,
            focused,
        }),
        Control::Checkbox => checkbox(&CheckboxProps {
            label: spec.label.clone(),
            checked: value.as_bool().unwrap_or(false),
            error,
            focused,
        }),
        Control::ChoiceList { choices, multiple } => {
            let selected = match value {
                Value::Array(items) => items
                    .into_iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
                Value::String(text) => vec![text],
                _ => Vec::new(),
            };
            choice_list(&ChoiceListProps {
                title: spec.label.clone(),
                choices: choices.clone(),
                selected,
                allow_multiple: *multiple,
                error,
                focused,
            })
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> Form {
        Form::new(json!({
            "name": "",
            "country": "",
            "terms": false,
            "notifications": [],
            "language": "pt",
        }))
    }

    fn countries() -> Vec<SelectOption> {
        vec![
            SelectOption::new("Select a country", ""),
            SelectOption::new("Brazil", "BR"),
            SelectOption::new("Canada", "CA"),
        ]
    }

    #[test]
    fn test_focus_wraps() {
        assert_eq!(focus_next(0, 3), 1);
        assert_eq!(focus_next(2, 3), 0);
        assert_eq!(focus_previous(0, 3), 2);
        assert_eq!(focus_previous(2, 3), 1);
        assert_eq!(focus_next(0, 0), 0);
    }

    #[test]
    fn test_text_editing() {
        let form = form();
        let spec = FieldSpec::text("Name", "name", vec![]).unwrap();

        apply_edit(&form, &spec, EditKey::Char('A')).unwrap();
        apply_edit(&form, &spec, EditKey::Char('d')).unwrap();
        apply_edit(&form, &spec, EditKey::Char('a')).unwrap();
        assert_eq!(form.get(&spec.path), json!("Ada"));

        apply_edit(&form, &spec, EditKey::Backspace).unwrap();
        assert_eq!(form.get(&spec.path), json!("Ad"));

        apply_edit(&form, &spec, EditKey::Space).unwrap();
        assert_eq!(form.get(&spec.path), json!("Ad "));
    }

    #[test]
    fn test_checkbox_toggle() {
        let form = form();
        let spec = FieldSpec::checkbox("Terms", "terms", vec![]).unwrap();

        apply_edit(&form, &spec, EditKey::Space).unwrap();
        assert_eq!(form.get(&spec.path), json!(true));
        apply_edit(&form, &spec, EditKey::Space).unwrap();
        assert_eq!(form.get(&spec.path), json!(false));
    }

    #[test]
    fn test_select_cycling() {
        let form = form();
        let spec = FieldSpec::select("Country", "country", countries(), vec![]).unwrap();

        apply_edit(&form, &spec, EditKey::Down).unwrap();
        assert_eq!(form.get(&spec.path), json!("BR"));
        apply_edit(&form, &spec, EditKey::Down).unwrap();
        assert_eq!(form.get(&spec.path), json!("CA"));
        apply_edit(&form, &spec, EditKey::Down).unwrap();
        assert_eq!(form.get(&spec.path), json!(""));
        apply_edit(&form, &spec, EditKey::Up).unwrap();
        assert_eq!(form.get(&spec.path), json!("CA"));
    }

    #[test]
    fn test_multi_choice_digit_toggle() {
        let form = form();
        let spec = FieldSpec::choices(
            "Notifications",
            "notifications",
            vec![
                SelectOption::new("Email", "email"),
                SelectOption::new("SMS", "sms"),
            ],
            true,
            vec![],
        )
        .unwrap();

        apply_edit(&form, &spec, EditKey::Char('1')).unwrap();
        apply_edit(&form, &spec, EditKey::Char('2')).unwrap();
        assert_eq!(form.get(&spec.path), json!(["email", "sms"]));

        apply_edit(&form, &spec, EditKey::Char('1')).unwrap();
        assert_eq!(form.get(&spec.path), json!(["sms"]));

        // Digit past the choice list is ignored.
        apply_edit(&form, &spec, EditKey::Char('9')).unwrap();
        assert_eq!(form.get(&spec.path), json!(["sms"]));
    }

    #[test]
    fn test_single_choice_cycles() {
        let form = form();
        let spec = FieldSpec::choices(
            "Language",
            "language",
            vec![
                SelectOption::new("Portuguese", "pt"),
                SelectOption::new("English", "en"),
            ],
            false,
            vec![],
        )
        .unwrap();

        apply_edit(&form, &spec, EditKey::Down).unwrap();
        assert_eq!(form.get(&spec.path), json!("en"));
        apply_edit(&form, &spec, EditKey::Down).unwrap();
        assert_eq!(form.get(&spec.path), json!("pt"));
    }

    #[test]
    fn test_render_field_shows_error() {
        let form = form();
        let spec = FieldSpec::text("Name", "name", vec![Rule::required("Name is required")]).unwrap();
        bind_specs(&form, std::slice::from_ref(&spec));

        form.trigger(None);
        let lines = render_field(&form, &spec, true);
        assert!(lines[0].starts_with("> Name"));
        assert!(lines.iter().any(|line| line.contains("! Name is required")));
    }
}
