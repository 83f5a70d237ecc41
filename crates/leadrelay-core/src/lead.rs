//! The Lead Submission model and its validation rules.
//!
//! A [`LeadSubmission`] only lives for the duration of one request: it is
//! built from form fields (or decoded from the relay's JSON body), validated,
//! handed to a provider, and dropped. Nothing here is ever persisted.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;

/// Accepts `local@domain.tld` with a TLD of two or more letters.
///
/// ASCII only: `-u` keeps case folding from matching letters such as
/// U+212A (Kelvin sign) or U+017F (long s).
const EMAIL_PATTERN: &str = r"(?i-u)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";

#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email address";
pub const PHONE_REQUIRED: &str = "Phone is required";

/// The validated form fields, in the order the form renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
}

impl Field {
    /// Wire / input name of the field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A visitor's request for a property evaluation.
///
/// Required fields default to empty strings when absent from a JSON body so
/// that a missing field surfaces as a field error from [`Self::validate`]
/// instead of an opaque decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LeadSubmission {
    /// A submission carrying only the required contact fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    /// Check the required fields and the email pattern.
    ///
    /// # Errors
    ///
    /// Returns every failing field with its user-facing message.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        validate_contact(&self.name, &self.email, &self.phone).into_result()
    }

    /// Address if one was given.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        non_blank(self.address.as_deref())
    }

    /// Project type, falling back to property type.
    #[must_use]
    pub fn project_or_property_type(&self) -> Option<&str> {
        non_blank(self.project_type.as_deref()).or_else(|| non_blank(self.property_type.as_deref()))
    }

    /// Property description, falling back to the free-form message.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        non_blank(self.property_description.as_deref()).or_else(|| non_blank(self.message.as_deref()))
    }
}

/// Validate the three required contact fields.
///
/// Whitespace-only values count as missing. The email pattern is only
/// checked once the field is non-empty, so a blank email reports
/// "required" rather than "invalid".
#[must_use]
pub fn validate_contact(name: &str, email: &str, phone: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if name.trim().is_empty() {
        errors.insert(Field::Name, NAME_REQUIRED);
    }

    if email.trim().is_empty() {
        errors.insert(Field::Email, EMAIL_REQUIRED);
    } else if !is_valid_email(email) {
        errors.insert(Field::Email, EMAIL_INVALID);
    }

    if phone.trim().is_empty() {
        errors.insert(Field::Phone, PHONE_REQUIRED);
    }

    errors
}

/// Whether `email` matches the `local@domain.tld` pattern (case-insensitive).
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Treat empty and whitespace-only optional values as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// ── Select options ───────────────────────────────────────────────────

/// Project types offered by the contact section's select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    Roofing,
    StormDamage,
    Restoration,
    Construction,
    Other,
}

impl ProjectType {
    pub const ALL: [Self; 5] = [
        Self::Roofing,
        Self::StormDamage,
        Self::Restoration,
        Self::Construction,
        Self::Other,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Roofing => "roofing",
            Self::StormDamage => "storm-damage",
            Self::Restoration => "restoration",
            Self::Construction => "construction",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Roofing => "Roofing",
            Self::StormDamage => "Storm Damage Repair",
            Self::Restoration => "Restoration",
            Self::Construction => "Construction",
            Self::Other => "Other / Not Sure",
        }
    }

    /// Look up an option by slug. Anything else is free text.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.slug() == slug)
    }
}

/// Property types offered by the evaluation form's select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    SingleFamily,
    Townhouse,
    Condo,
    MultiFamily,
    Commercial,
}

impl PropertyType {
    pub const ALL: [Self; 5] = [
        Self::SingleFamily,
        Self::Townhouse,
        Self::Condo,
        Self::MultiFamily,
        Self::Commercial,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::SingleFamily => "single-family",
            Self::Townhouse => "townhouse",
            Self::Condo => "condo",
            Self::MultiFamily => "multi-family",
            Self::Commercial => "commercial",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SingleFamily => "Single Family Home",
            Self::Townhouse => "Townhouse",
            Self::Condo => "Condo",
            Self::MultiFamily => "Multi-Family",
            Self::Commercial => "Commercial",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.slug() == slug)
    }
}
