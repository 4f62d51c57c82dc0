//! Contact Page - The basic form example.
//!
//! Seven fields bound to a single form: name fields with length rules, email
//! and phone with pattern rules, a country select, a newsletter checkbox, and
//! a required terms checkbox. A side panel shows the live value tree and a
//! status badge; submitting runs the simulated one-second call and shows a
//! success banner until reset.

use std::time::{Duration, Instant};

use serde_json::json;

use crate::components::layout::{badge, banner, block_stack, card, inline_stack, page, Tone};
use crate::components::SelectOption;
use crate::error::FormError;
use crate::form::{reflector, Form, SubmissionController};
use crate::pages::{
    apply_edit, bind_specs, focus_next, focus_previous, render_field, EditKey, FieldSpec,
};
use crate::rules::Rule;

// =============================================================================
// DECLARATIONS
// =============================================================================

fn default_values() -> serde_json::Value {
    json!({
        "firstName": "",
        "lastName": "",
        "email": "",
        "phone": "",
        "country": "",
        "newsletter": false,
        "terms": false,
    })
}

fn countries() -> Vec<SelectOption> {
    vec![
        SelectOption::new("Select a country", ""),
        SelectOption::new("Brazil", "BR"),
        SelectOption::new("United States", "US"),
        SelectOption::new("Canada", "CA"),
        SelectOption::new("United Kingdom", "GB"),
        SelectOption::new("Germany", "DE"),
        SelectOption::new("France", "FR"),
        SelectOption::new("Japan", "JP"),
    ]
}

fn field_specs() -> Result<Vec<FieldSpec>, FormError> {
    Ok(vec![
        FieldSpec::text(
            "First name",
            "firstName",
            vec![
                Rule::required("First name is required"),
                Rule::min_length(2, "First name must be at least 2 characters"),
            ],
        )?,
        FieldSpec::text(
            "Last name",
            "lastName",
            vec![
                Rule::required("Last name is required"),
                Rule::min_length(2, "Last name must be at least 2 characters"),
            ],
        )?,
        FieldSpec::text(
            "Email",
            "email",
            vec![
                Rule::required("Email is required"),
                Rule::pattern(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$", "Invalid email")?,
            ],
        )?,
        FieldSpec::text(
            "Phone (optional)",
            "phone",
            vec![Rule::pattern(r"^\+?[1-9]\d{0,15}$", "Invalid phone number")?],
        )?,
        FieldSpec::select(
            "Country",
            "country",
            countries(),
            vec![Rule::required("Country is required")],
        )?,
        FieldSpec::checkbox("Receive the newsletter", "newsletter", vec![])?,
        FieldSpec::checkbox(
            "I accept the terms and conditions",
            "terms",
            vec![Rule::required("You must accept the terms")],
        )?,
    ])
}

// =============================================================================
// PAGE
// =============================================================================

/// The basic contact form page.
pub struct ContactPage {
    form: Form,
    submission: SubmissionController,
    specs: Vec<FieldSpec>,
    focus: usize,
}

impl ContactPage {
    pub fn new() -> Result<ContactPage, FormError> {
        let form = Form::new(default_values());
        let specs = field_specs()?;
        bind_specs(&form, &specs);
        let submission = SubmissionController::new(form.clone(), Duration::from_secs(1));
        Ok(ContactPage {
            form,
            submission,
            specs,
            focus: 0,
        })
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn submission(&self) -> &SubmissionController {
        &self.submission
    }

    pub fn field_count(&self) -> usize {
        self.specs.len()
    }

    pub fn focused_path(&self) -> &crate::path::FieldPath {
        &self.specs[self.focus].path
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    pub fn focus_next(&mut self) {
        self.focus = focus_next(self.focus, self.specs.len());
    }

    pub fn focus_previous(&mut self) {
        self.focus = focus_previous(self.focus, self.specs.len());
    }

    /// Route an edit key into the focused field.
    pub fn handle_key(&mut self, key: EditKey) -> Result<(), FormError> {
        apply_edit(&self.form, &self.specs[self.focus], key)
    }

    /// Attempt a submit (validity-gated).
    pub fn submit(&self) -> bool {
        self.submission.submit()
    }

    /// Poll the simulated call.
    pub fn tick(&self, now: Instant) -> bool {
        self.submission.tick(now)
    }

    /// Reset the form and hide the success banner.
    pub fn reset(&mut self) {
        self.submission.reset();
        self.focus = 0;
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    pub fn render(&self) -> Vec<String> {
        let intro = card(&[
            "Contact form".to_string(),
            "Every field is bound to the form store; edits validate on change.".to_string(),
        ]);

        let mut form_lines: Vec<Vec<String>> = self
            .specs
            .iter()
            .enumerate()
            .map(|(position, spec)| render_field(&self.form, spec, position == self.focus))
            .collect();

        let submit_label = if self.submission.is_submitting() {
            "( Submitting... )"
        } else {
            "[ Submit ]"
        };
        form_lines.push(vec![inline_stack(
            3,
            &["[ Reset ]".to_string(), submit_label.to_string()],
        )]);

        let mut sections = vec![intro, card(&block_stack(1, &form_lines))];

        if self.submission.is_succeeded() {
            sections.push(banner(
                Tone::Success,
                "Form submitted successfully!",
                &["The data was processed correctly.".to_string()],
            ));
        }

        let mut live = vec!["Live values".to_string(), String::new()];
        live.extend(reflector::snapshot(&self.form).lines().map(str::to_string));
        sections.push(card(&live));

        let error_count = self.form.error_count();
        let status = if error_count > 0 {
            inline_stack(
                2,
                &[
                    badge(Tone::Critical, "Has errors"),
                    badge(Tone::Subdued, &format!("{error_count} error(s)")),
                ],
            )
        } else {
            badge(Tone::Success, "Valid")
        };
        sections.push(card(&["Form status".to_string(), status]));

        page("Contact Form", &sections)
    }
}

// =============================================================================
// TESTS
// =============================================================================
