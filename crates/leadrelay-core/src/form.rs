//! Contact form state machine.
//!
//! Holds the raw field values a visitor types, validates them, submits the
//! resulting [`LeadSubmission`] through a [`LeadProvider`], and tracks the
//! submission status:
//!
//! ```text
//! Idle ──submit(valid)──▶ Submitting ──ok──▶ Submitted ──start_over──▶ Idle
//!  ▲                          │
//!  │                          └──err──▶ Error (fields kept, editable)
//!  └── submit(invalid): field errors, no request
//! ```
//!
//! The form never shows provider error text. Failures surface as one
//! generic message and the detail goes to the log.

use tracing::{debug, error, info};

use crate::error::FieldErrors;
use crate::lead::{validate_contact, Field, LeadSubmission};
use crate::provider::LeadProvider;

/// Shown for every failed submission, whatever the cause.
pub const GENERIC_ERROR: &str =
    "There was an error submitting your request. Please try again.";

/// Where the form is on the site. Only the copy differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPage {
    /// Contact section at the bottom of the landing page.
    #[default]
    Contact,
    /// Standalone property evaluation form.
    Evaluation,
}

impl FormPage {
    #[must_use]
    pub fn confirmation(self) -> Confirmation {
        match self {
            Self::Contact => Confirmation {
                heading: "Thank You!",
                body: "We've received your evaluation request. A member of our team will \
                       contact you within 24 hours to schedule your free property evaluation.",
            },
            Self::Evaluation => Confirmation {
                heading: "Request Received!",
                body: "Thank you for your interest! Our team will contact you within 24 hours \
                       to schedule your free property evaluation.",
            },
        }
    }

    fn submit_label(self, submitting: bool) -> &'static str {
        match (self, submitting) {
            (Self::Contact, false) => "Get My Free Property Evaluation",
            (Self::Contact, true) => "Submitting...",
            (Self::Evaluation, false) => "Request Free Evaluation",
            (Self::Evaluation, true) => "Sending...",
        }
    }

    /// Parse `contact` / `evaluation`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "contact" => Some(Self::Contact),
            "evaluation" => Some(Self::Evaluation),
            _ => None,
        }
    }
}

/// Copy rendered once a submission has been accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub heading: &'static str,
    pub body: &'static str,
}

/// Submission status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Error,
}

/// Raw values as typed. Empty strings mean "not filled in".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub project_type: String,
    pub property_type: String,
    pub property_description: String,
    pub message: String,
}

impl FormFields {
    /// Convert to a submission, dropping blank optional fields.
    #[must_use]
    pub fn to_submission(&self) -> LeadSubmission {
        LeadSubmission {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            address: optional(&self.address),
            project_type: optional(&self.project_type),
            property_type: optional(&self.property_type),
            property_description: optional(&self.property_description),
            message: optional(&self.message),
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Result of one [`LeadForm::submit`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Accepted. The form is cleared and shows the confirmation.
    Submitted(Confirmation),
    /// Client-side validation failed. Nothing was sent.
    Invalid(FieldErrors),
    /// Sending failed. Carries only the generic user-facing message.
    Failed(&'static str),
    /// The form already shows a confirmation; call [`LeadForm::start_over`] first.
    AlreadySubmitted,
}

/// A contact / evaluation form.
#[derive(Debug, Clone, Default)]
pub struct LeadForm {
    page: FormPage,
    fields: FormFields,
    status: FormStatus,
    errors: FieldErrors,
}

impl LeadForm {
    #[must_use]
    pub fn new(page: FormPage) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Start from pre-filled values.
    #[must_use]
    pub fn with_fields(page: FormPage, fields: FormFields) -> Self {
        Self {
            page,
            fields,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn status(&self) -> FormStatus {
        self.status
    }

    #[must_use]
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Mutable access for editing. Field errors stay until the next submit.
    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    /// Error text for a field from the last validation.
    #[must_use]
    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(field)
    }

    #[must_use]
    pub fn field_errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Whether inputs accept edits (everything except in-flight and confirmed).
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self.status, FormStatus::Idle | FormStatus::Error)
    }

    /// Label for the submit button in the current state.
    #[must_use]
    pub fn button_label(&self) -> &'static str {
        self.page
            .submit_label(self.status == FormStatus::Submitting)
    }

    /// Confirmation copy, once submitted.
    #[must_use]
    pub fn confirmation(&self) -> Option<Confirmation> {
        (self.status == FormStatus::Submitted).then(|| self.page.confirmation())
    }

    /// Run client-side validation and record field errors.
    ///
    /// # Errors
    ///
    /// Returns the failing fields; the same set is kept on the form.
    pub fn validate(&mut self) -> Result<LeadSubmission, FieldErrors> {
        let f = &self.fields;
        self.errors = validate_contact(&f.name, f.email.trim(), &f.phone);
        if self.errors.is_empty() {
            Ok(self.fields.to_submission())
        } else {
            Err(self.errors.clone())
        }
    }

    /// Validate and, if valid, send exactly one request through `provider`.
    pub async fn submit(&mut self, provider: &dyn LeadProvider) -> SubmitOutcome {
        if self.status == FormStatus::Submitted {
            return SubmitOutcome::AlreadySubmitted;
        }

        let lead = match self.validate() {
            Ok(lead) => lead,
            Err(errors) => {
                debug!(fields = errors.len(), "form failed validation, not sending");
                return SubmitOutcome::Invalid(errors);
            }
        };

        self.status = FormStatus::Submitting;

        match provider.submit_lead(&lead).await {
            Ok(delivery) => {
                info!(provider = %delivery.provider, "lead submitted");
                self.status = FormStatus::Submitted;
                self.fields = FormFields::default();
                SubmitOutcome::Submitted(self.page.confirmation())
            }
            Err(e) => {
                error!(provider = provider.name(), error = %e, "form submission failed");
                self.status = FormStatus::Error;
                SubmitOutcome::Failed(GENERIC_ERROR)
            }
        }
    }

    /// "Submit another request": leave the confirmation and show an empty form.
    pub fn start_over(&mut self) {
        self.status = FormStatus::Idle;
        self.fields = FormFields::default();
        self.errors = FieldErrors::default();
    }
}
