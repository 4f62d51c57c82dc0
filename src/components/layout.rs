//! Layout Components - Composition pieces with no logic of their own.
//!
//! Cards, pages, stacks, grouped fields, badges, and banners. All of these
//! assemble lines; none of them know anything about forms.

// =============================================================================
// TONE
// =============================================================================

/// Visual tone for badges and banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Critical,
    Subdued,
}

impl Tone {
    fn glyph(&self) -> char {
        match self {
            Tone::Success => '+',
            Tone::Critical => '!',
            Tone::Subdued => '-',
        }
    }
}

// =============================================================================
// CONTAINERS
// =============================================================================

fn width_of(lines: &[String]) -> usize {
    lines.iter().map(|line| line.chars().count()).max().unwrap_or(0)
}

/// Wrap lines in a bordered card.
pub fn card(lines: &[String]) -> Vec<String> {
    let width = width_of(lines);
    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!("+{}+", "-".repeat(width + 2)));
    for line in lines {
        let padding = width - line.chars().count();
        out.push(format!("| {line}{} |", " ".repeat(padding)));
    }
    out.push(format!("+{}+", "-".repeat(width + 2)));
    out
}

/// A page: title, underline, then sections separated by blank lines.
pub fn page(title: &str, sections: &[Vec<String>]) -> Vec<String> {
    let mut out = vec![title.to_string(), "=".repeat(title.chars().count())];
    for section in sections {
        out.push(String::new());
        out.extend(section.iter().cloned());
    }
    out
}

/// Stack groups vertically with `gap` blank lines between them.
pub fn block_stack(gap: usize, groups: &[Vec<String>]) -> Vec<String> {
    let mut out = Vec::new();
    for (position, group) in groups.iter().enumerate() {
        if position > 0 {
            for _ in 0..gap {
                out.push(String::new());
            }
        }
        out.extend(group.iter().cloned());
    }
    out
}

/// Join items on one line with `gap` spaces between them.
pub fn inline_stack(gap: usize, items: &[String]) -> String {
    items.join(&" ".repeat(gap.max(1)))
}

/// Two fields side by side (FormLayout.Group): the left column is padded to
/// its widest line plus a fixed gutter.
pub fn form_group(left: &[String], right: &[String]) -> Vec<String> {
    let column = width_of(left) + 4;
    let rows = left.len().max(right.len());
    let mut out = Vec::with_capacity(rows);
    for row in 0..rows {
        let left_cell = left.get(row).map(String::as_str).unwrap_or("");
        let right_cell = right.get(row).map(String::as_str).unwrap_or("");
        let padding = column - left_cell.chars().count();
        out.push(format!("{left_cell}{}{right_cell}", " ".repeat(padding)));
    }
    out
}

/// A horizontal rule.
pub fn divider(width: usize) -> String {
    "-".repeat(width)
}

// =============================================================================
// STATUS PIECES
// =============================================================================

/// A compact status badge, e.g. `[+ Valid]` / `[! 3 error(s)]`.
pub fn badge(tone: Tone, text: &str) -> String {
    format!("[{} {text}]", tone.glyph())
}

/// A banner: a bordered block with a toned title and body lines.
pub fn banner(tone: Tone, title: &str, body: &[String]) -> Vec<String> {
    let mut lines = vec![format!("{} {title}", tone.glyph())];
    lines.extend(body.iter().cloned());
    card(&lines)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_borders_and_padding() {
        let lines = card(&["ab".to_string(), "a".to_string()]);
        assert_eq!(lines[0], "+----+");
        assert_eq!(lines[1], "| ab |");
        assert_eq!(lines[2], "| a  |");
        assert_eq!(lines[3], "+----+");
    }

    #[test]
    fn test_page_title_and_sections() {
        let lines = page("Contact", &[vec!["a".to_string()], vec!["b".to_string()]]);
        assert_eq!(lines[0], "Contact");
        assert_eq!(lines[1], "=======");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "a");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "b");
    }

    #[test]
    fn test_block_stack_gap() {
        let lines = block_stack(2, &[vec!["a".to_string()], vec!["b".to_string()]]);
        assert_eq!(lines, ["a", "", "", "b"]);
    }

    #[test]
    fn test_inline_stack() {
        let line = inline_stack(2, &["[x]".to_string(), "[y]".to_string()]);
        assert_eq!(line, "[x]  [y]");
    }

    #[test]
    fn test_form_group_aligns_columns() {
        let lines = form_group(
            &["City".to_string(), "[Berlin]".to_string()],
            &["State".to_string(), "[BE]".to_string()],
        );
        assert_eq!(lines[0], "City        State");
        assert_eq!(lines[1], "[Berlin]    [BE]");
    }

    #[test]
    fn test_form_group_uneven_rows() {
        let lines = form_group(&["a".to_string()], &["b".to_string(), "c".to_string()]);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].trim_start().starts_with('c'));
    }

    #[test]
    fn test_badge_tones() {
        assert_eq!(badge(Tone::Success, "Valid"), "[+ Valid]");
        assert_eq!(badge(Tone::Critical, "2 error(s)"), "[! 2 error(s)]");
    }

    #[test]
    fn test_banner_contains_title_and_body() {
        let lines = banner(
            Tone::Success,
            "Form submitted successfully!",
            &["The data was processed correctly.".to_string()],
        );
        assert!(lines[1].contains("+ Form submitted successfully!"));
        assert!(lines[2].contains("The data was processed correctly."));
    }
}
