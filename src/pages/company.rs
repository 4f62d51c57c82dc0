//! Company Page - The advanced form example.
//!
//! A company profile with a nested contact person, a dynamic list of address
//! records, and a preferences block. The address list is a field array: each
//! record keeps a stable identity, records can be appended and removed (the
//! list never drops below one), and the first billing record can be copied
//! over the first shipping record in one action. Submission simulates a
//! two-second call.

use std::time::{Duration, Instant};

use serde_json::json;

use crate::components::layout::{badge, banner, block_stack, card, inline_stack, page, Tone};
use crate::components::SelectOption;
use crate::error::FormError;
use crate::form::address::{copy_billing_to_shipping, AddressKind, AddressRecord, CopyOutcome};
use crate::form::{reflector, FieldArray, Form, SubmissionController};
use crate::pages::{
    apply_edit, bind_specs, focus_next, focus_previous, render_field, EditKey, FieldSpec,
};
use crate::rules::Rule;

// =============================================================================
// DECLARATIONS
// =============================================================================

const EMAIL_PATTERN: &str = r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";
const ZIP_PATTERN: &str = r"^\d{5}-?\d{3}$";
const MIN_ADDRESSES: usize = 1;
const SPECS_PER_ADDRESS: usize = 6;

fn default_values() -> serde_json::Value {
    json!({
        "companyName": "",
        "industry": "",
        "website": "",
        "description": "",
        "employees": "",
        "contactPerson": {
            "name": "",
            "email": "",
            "role": "",
        },
        "addresses": [
            {
                "type": "billing",
                "street": "",
                "city": "",
                "state": "",
                "zipCode": "",
                "country": "BR",
            },
        ],
        "preferences": {
            "notifications": [],
            "language": "pt",
            "timezone": "America/Sao_Paulo",
        },
        "terms": false,
    })
}

fn industries() -> Vec<SelectOption> {
    vec![
        SelectOption::new("Select an industry", ""),
        SelectOption::new("Technology", "tech"),
        SelectOption::new("Retail", "retail"),
        SelectOption::new("Healthcare", "healthcare"),
        SelectOption::new("Education", "education"),
        SelectOption::new("Finance", "finance"),
        SelectOption::new("Manufacturing", "manufacturing"),
        SelectOption::new("Services", "services"),
    ]
}

fn countries() -> Vec<SelectOption> {
    vec![
        SelectOption::new("Brazil", "BR"),
        SelectOption::new("United States", "US"),
        SelectOption::new("Canada", "CA"),
        SelectOption::new("United Kingdom", "GB"),
        SelectOption::new("Germany", "DE"),
        SelectOption::new("France", "FR"),
    ]
}

fn timezones() -> Vec<SelectOption> {
    vec![
        SelectOption::new("Sao Paulo (GMT-3)", "America/Sao_Paulo"),
        SelectOption::new("New York (GMT-5)", "America/New_York"),
        SelectOption::new("London (GMT+0)", "Europe/London"),
        SelectOption::new("Paris (GMT+1)", "Europe/Paris"),
        SelectOption::new("Tokyo (GMT+9)", "Asia/Tokyo"),
    ]
}

fn head_specs() -> Result<Vec<FieldSpec>, FormError> {
    Ok(vec![
        FieldSpec::text(
            "Company name",
            "companyName",
            vec![
                Rule::required("Company name is required"),
                Rule::min_length(3, "Company name must be at least 3 characters"),
            ],
        )?,
        FieldSpec::select(
            "Industry",
            "industry",
            industries(),
            vec![Rule::required("Industry is required")],
        )?,
        FieldSpec::text(
            "Website",
            "website",
            vec![Rule::pattern(
                r"^https?://.+",
                "Website must start with http:// or https://",
            )?],
        )?
        .placeholder("https://example.com"),
        FieldSpec::text(
            "Description",
            "description",
            vec![Rule::max_length(
                500,
                "Description must be at most 500 characters",
            )],
        )?
        .multiline(3),
        FieldSpec::text(
            "Number of employees",
            "employees",
            vec![Rule::pattern(r"^\d+$", "Employees must be a number")?],
        )?,
        FieldSpec::text(
            "Contact name",
            "contactPerson.name",
            vec![Rule::required("Contact name is required")],
        )?,
        FieldSpec::text(
            "Contact email",
            "contactPerson.email",
            vec![
                Rule::required("Contact email is required"),
                Rule::pattern(EMAIL_PATTERN, "Invalid email")?,
            ],
        )?,
        FieldSpec::text(
            "Contact role",
            "contactPerson.role",
            vec![Rule::required("Contact role is required")],
        )?,
    ])
}

fn address_specs(index: usize) -> Result<Vec<FieldSpec>, FormError> {
    let field = |name: &str| format!("addresses[{index}].{name}");
    Ok(vec![
        FieldSpec::choices(
            "Address type",
            &field("type"),
            vec![
                SelectOption::new("Billing", "billing"),
                SelectOption::new("Shipping", "shipping"),
            ],
            false,
            vec![],
        )?,
        FieldSpec::text(
            "Street",
            &field("street"),
            vec![Rule::required("Street is required")],
        )?,
        FieldSpec::text(
            "City",
            &field("city"),
            vec![Rule::required("City is required")],
        )?,
        FieldSpec::text(
            "State",
            &field("state"),
            vec![Rule::required("State is required")],
        )?,
        FieldSpec::text(
            "Zip code",
            &field("zipCode"),
            vec![
                Rule::required("Zip code is required"),
                Rule::pattern(ZIP_PATTERN, "Invalid zip code")?,
            ],
        )?,
        FieldSpec::select(
            "Country",
            &field("country"),
            countries(),
            vec![Rule::required("Country is required")],
        )?,
    ])
}

fn tail_specs() -> Result<Vec<FieldSpec>, FormError> {
    Ok(vec![
        FieldSpec::choices(
            "Notifications",
            "preferences.notifications",
            vec![
                SelectOption::new("Email", "email"),
                SelectOption::new("SMS", "sms"),
                SelectOption::new("Push", "push"),
                SelectOption::new("WhatsApp", "whatsapp"),
            ],
            true,
            vec![],
        )?,
        FieldSpec::choices(
            "Language",
            "preferences.language",
            vec![
                SelectOption::new("Portuguese", "pt"),
                SelectOption::new("English", "en"),
                SelectOption::new("Spanish", "es"),
            ],
            false,
            vec![],
        )?,
        FieldSpec::select("Timezone", "preferences.timezone", timezones(), vec![])?,
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

/// The advanced company form page.
pub struct CompanyPage {
    form: Form,
    submission: SubmissionController,
    addresses: FieldArray,
    specs: Vec<FieldSpec>,
    head_len: usize,
    focus: usize,
}

impl CompanyPage {
    pub fn new() -> Result<CompanyPage, FormError> {
        let form = Form::new(default_values());
        let addresses = form.array("addresses")?;
        let submission = SubmissionController::new(form.clone(), Duration::from_secs(2));
        let mut page = CompanyPage {
            form,
            submission,
            addresses,
            specs: Vec::new(),
            head_len: 0,
            focus: 0,
        };
        page.rebuild_specs()?;
        Ok(page)
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn submission(&self) -> &SubmissionController {
        &self.submission
    }

    pub fn addresses(&self) -> &FieldArray {
        &self.addresses
    }

    pub fn field_count(&self) -> usize {
        self.specs.len()
    }

    pub fn focused_path(&self) -> &crate::path::FieldPath {
        &self.specs[self.focus].path
    }

    /// Pure validity check for the status badge; writes no errors.
    pub fn is_valid(&self) -> bool {
        self.form.check_all()
    }

    /// Which address record the focus currently sits in, if any.
    pub fn focused_address(&self) -> Option<usize> {
        let offset = self.focus.checked_sub(self.head_len)?;
        let index = offset / SPECS_PER_ADDRESS;
        (index < self.addresses.len()).then_some(index)
    }

    /// Rebuild the flattened spec list after the address list changed shape.
    fn rebuild_specs(&mut self) -> Result<(), FormError> {
        let mut specs = head_specs()?;
        self.head_len = specs.len();
        for index in 0..self.addresses.len() {
            specs.extend(address_specs(index)?);
        }
        specs.extend(tail_specs()?);
        bind_specs(&self.form, &specs);
        self.specs = specs;
        self.focus = self.focus.min(self.specs.len().saturating_sub(1));
        Ok(())
    }

    // =========================================================================
    // Address list actions
    // =========================================================================

    /// Append a blank shipping record.
    pub fn add_address(&mut self) -> Result<(), FormError> {
        let record = AddressRecord::blank(AddressKind::Shipping, "BR");
        self.addresses.append(record.to_value()?);
        self.rebuild_specs()
    }

    /// Remove the record at `index`; the list keeps at least one record.
    pub fn remove_address(&mut self, index: usize) -> Result<bool, FormError> {
        if !self.addresses.remove_guarded(index, MIN_ADDRESSES) {
            return Ok(false);
        }
        self.rebuild_specs()?;
        Ok(true)
    }

    /// Copy the first billing record over the first shipping record.
    pub fn copy_billing_to_shipping(&mut self) -> Result<CopyOutcome, FormError> {
        let outcome = copy_billing_to_shipping(&self.addresses)?;
        // An appended clone adds a record, so the spec list changes shape.
        self.rebuild_specs()?;
        Ok(outcome)
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

    /// Reset to the defaults: one billing record, everything else blank.
    pub fn reset(&mut self) -> Result<(), FormError> {
        // Shrink the id list to match the defaults before the tree swaps back.
        while self.addresses.len() > MIN_ADDRESSES
            && self.addresses.remove(self.addresses.len() - 1)
        {}
        self.submission.reset();
        self.focus = 0;
        self.rebuild_specs()
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render_spec_range(&self, range: std::ops::Range<usize>) -> Vec<Vec<String>> {
        range
            .map(|position| render_field(&self.form, &self.specs[position], position == self.focus))
            .collect()
    }

    pub fn render(&self) -> Vec<String> {
        let intro = card(&[
            "Company registration".to_string(),
            "Nested records, a dynamic address list, and grouped preferences.".to_string(),
        ]);

        let company = card(&block_stack(1, &self.render_spec_range(0..self.head_len)));

        let mut address_sections = Vec::new();
        for (index, (_, record)) in self.addresses.items().iter().enumerate() {
            let start = self.head_len + index * SPECS_PER_ADDRESS;
            let kind = record
                .get("type")
                .and_then(serde_json::Value::as_str)
                .unwrap_or(AddressKind::Billing.as_str());
            let label = if kind == AddressKind::Shipping.as_str() {
                AddressKind::Shipping.label()
            } else {
                AddressKind::Billing.label()
            };

            let mut lines = vec![format!("{label} #{}", index + 1), String::new()];
            lines.extend(block_stack(
                1,
                &self.render_spec_range(start..start + SPECS_PER_ADDRESS),
            ));
            address_sections.push(card(&lines));
        }

        let actions = inline_stack(
            3,
            &[
                "[ Add address ]".to_string(),
                "[ Remove address ]".to_string(),
                "[ Copy billing to shipping ]".to_string(),
            ],
        );
        address_sections.push(vec![actions]);

        let tail_start = self.head_len + self.addresses.len() * SPECS_PER_ADDRESS;
        let preferences = card(&block_stack(
            1,
            &self.render_spec_range(tail_start..self.specs.len()),
        ));

        let submit_label = if self.submission.is_submitting() {
            "( Submitting... )"
        } else {
            "[ Submit ]"
        };
        let buttons = vec![inline_stack(
            3,
            &["[ Reset ]".to_string(), submit_label.to_string()],
        )];

        let mut sections = vec![intro, company];
        sections.extend(address_sections);
        sections.push(preferences);
        sections.push(buttons);

        if self.submission.is_succeeded() {
            sections.push(banner(
                Tone::Success,
                "Company registered successfully!",
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
        } else if self.is_valid() {
            badge(Tone::Success, "Ready to submit")
        } else {
            badge(Tone::Subdued, "Incomplete")
        };
        sections.push(card(&["Form status".to_string(), status]));

        page("Company Form", &sections)
    }
}

// =============================================================================
// TESTS
// =============================================================================
