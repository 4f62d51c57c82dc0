//! Field Components - Inputs rendered from plain props.
//!
//! Every component follows the same contract: props in, lines out. The
//! focused marker, the value, and the error line are all driven by props -
//! the caller decides what is focused and what the error is.

use super::SelectOption;

const FOCUS_MARKER: char = '>';

fn label_line(label: &str, focused: bool) -> String {
    let marker = if focused { FOCUS_MARKER } else { ' ' };
    format!("{marker} {label}")
}

fn error_line(error: &Option<String>) -> Option<String> {
    error.as_ref().map(|message| format!("  ! {message}"))
}

// =============================================================================
// TEXT FIELD
// =============================================================================

/// Props for a single- or multi-line text field.
#[derive(Debug, Clone, Default)]
pub struct TextFieldProps {
    pub label: String,
    pub value: String,
    pub placeholder: Option<String>,
    pub error: Option<String>,
    /// Number of content rows; 0 renders a single line.
    pub multiline: usize,
    pub focused: bool,
}

/// Render a text field.
pub fn text_field(props: &TextFieldProps) -> Vec<String> {
    let mut lines = vec![label_line(&props.label, props.focused)];

    if props.multiline > 0 {
        let mut rows: Vec<&str> = props.value.lines().collect();
        if rows.is_empty() {
            rows.push(props.placeholder.as_deref().unwrap_or(""));
        }
        for row in 0..props.multiline.max(rows.len()) {
            lines.push(format!("  | {}", rows.get(row).unwrap_or(&"")));
        }
    } else {
        let shown = if props.value.is_empty() {
            props.placeholder.as_deref().unwrap_or("")
        } else {
            &props.value
        };
        lines.push(format!("  [{shown}]"));
    }

    if let Some(line) = error_line(&props.error) {
        lines.push(line);
    }
    lines
}

// =============================================================================
// SELECT
// =============================================================================

/// Props for a select.
#[derive(Debug, Clone, Default)]
pub struct SelectProps {
    pub label: String,
    pub options: Vec<SelectOption>,
    /// The selected option's value (not its label).
    pub value: String,
    pub error: Option<String>,
    pub focused: bool,
}

/// Render a select, showing the label of the selected option.
pub fn select(props: &SelectProps) -> Vec<String> {
    let shown = props
        .options
        .iter()
        .find(|option| option.value == props.value)
        .map(|option| option.label.as_str())
        .unwrap_or(props.value.as_str());

    let mut lines = vec![
        label_line(&props.label, props.focused),
        format!("  < {shown} >"),
    ];
    if let Some(line) = error_line(&props.error) {
        lines.push(line);
    }
    lines
}

// =============================================================================
// CHECKBOX
// =============================================================================

/// Props for a checkbox.
#[derive(Debug, Clone, Default)]
pub struct CheckboxProps {
    pub label: String,
    pub checked: bool,
    pub error: Option<String>,
    pub focused: bool,
}

/// Render a checkbox.
pub fn checkbox(props: &CheckboxProps) -> Vec<String> {
    let marker = if props.focused { FOCUS_MARKER } else { ' ' };
    let state = if props.checked { 'x' } else { ' ' };
    let mut lines = vec![format!("{marker} [{state}] {}", props.label)];
    if let Some(line) = error_line(&props.error) {
        lines.push(line);
    }
    lines
}

// =============================================================================
// CHOICE LIST
// =============================================================================

/// Props for a choice list (radio group or multi-select).
#[derive(Debug, Clone, Default)]
pub struct ChoiceListProps {
    pub title: String,
    pub choices: Vec<SelectOption>,
    /// Selected values; one entry unless `allow_multiple`.
    pub selected: Vec<String>,
    pub allow_multiple: bool,
    pub error: Option<String>,
    pub focused: bool,
}

/// Render a choice list.
pub fn choice_list(props: &ChoiceListProps) -> Vec<String> {
    let mut lines = vec![label_line(&props.title, props.focused)];
    for choice in &props.choices {
        let selected = props.selected.iter().any(|value| value == &choice.value);
        let marker = match (props.allow_multiple, selected) {
            (true, true) => "[x]",
            (true, false) => "[ ]",
            (false, true) => "(*)",
            (false, false) => "( )",
        };
        lines.push(format!("  {marker} {}", choice.label));
    }
    if let Some(line) = error_line(&props.error) {
        lines.push(line);
    }
    lines
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_shows_value_and_error() {
        let lines = text_field(&TextFieldProps {
            label: "Email".to_string(),
            value: "a@b".to_string(),
            error: Some("Invalid email".to_string()),
            ..Default::default()
        });

        assert_eq!(lines[0], "  Email");
        assert_eq!(lines[1], "  [a@b]");
        assert_eq!(lines[2], "  ! Invalid email");
    }

    #[test]
    fn test_text_field_placeholder_when_empty() {
        let lines = text_field(&TextFieldProps {
            label: "Website".to_string(),
            placeholder: Some("https://example.com".to_string()),
            ..Default::default()
        });
        assert_eq!(lines[1], "  [https://example.com]");
    }

    #[test]
    fn test_text_field_focus_marker() {
        let lines = text_field(&TextFieldProps {
            label: "Name".to_string(),
            focused: true,
            ..Default::default()
        });
        assert!(lines[0].starts_with("> "));
    }

    #[test]
    fn test_multiline_pads_rows() {
        let lines = text_field(&TextFieldProps {
            label: "Description".to_string(),
            value: "one\ntwo".to_string(),
            multiline: 3,
            ..Default::default()
        });
        assert_eq!(lines[1], "  | one");
        assert_eq!(lines[2], "  | two");
        assert_eq!(lines[3], "  | ");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_select_shows_selected_label() {
        let lines = select(&SelectProps {
            label: "Country".to_string(),
            options: vec![
                SelectOption::new("Select a country", ""),
                SelectOption::new("Brazil", "BR"),
            ],
            value: "BR".to_string(),
            ..Default::default()
        });
        assert_eq!(lines[1], "  < Brazil >");
    }

    #[test]
    fn test_select_placeholder_option() {
        let lines = select(&SelectProps {
            label: "Country".to_string(),
            options: vec![SelectOption::new("Select a country", "")],
            value: String::new(),
            ..Default::default()
        });
        assert_eq!(lines[1], "  < Select a country >");
    }

    #[test]
    fn test_checkbox_states() {
        let unchecked = checkbox(&CheckboxProps {
            label: "Newsletter".to_string(),
            ..Default::default()
        });
        assert_eq!(unchecked[0], "  [ ] Newsletter");

        let checked = checkbox(&CheckboxProps {
            label: "Newsletter".to_string(),
            checked: true,
            ..Default::default()
        });
        assert_eq!(checked[0], "  [x] Newsletter");
    }

    #[test]
    fn test_choice_list_single_and_multiple() {
        let single = choice_list(&ChoiceListProps {
            title: "Language".to_string(),
            choices: vec![
                SelectOption::new("Portuguese", "pt"),
                SelectOption::new("English", "en"),
            ],
            selected: vec!["pt".to_string()],
            ..Default::default()
        });
        assert_eq!(single[1], "  (*) Portuguese");
        assert_eq!(single[2], "  ( ) English");

        let multiple = choice_list(&ChoiceListProps {
            title: "Notifications".to_string(),
            choices: vec![
                SelectOption::new("Email", "email"),
                SelectOption::new("SMS", "sms"),
            ],
            selected: vec!["email".to_string()],
            allow_multiple: true,
            ..Default::default()
        });
        assert_eq!(multiple[1], "  [x] Email");
        assert_eq!(multiple[2], "  [ ] SMS");
    }
}
