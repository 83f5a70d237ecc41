//! Mapping from a [`LeadSubmission`] to the content a provider delivers.
//!
//! Every provider gets the same synthesized subject, sender label, and
//! fallback-filled fields; only the envelope around them differs.

use serde::Serialize;

use crate::lead::LeadSubmission;

/// Sender label used when none is configured.
pub const DEFAULT_SITE_NAME: &str = "Zena Construction Website";

pub const ADDRESS_FALLBACK: &str = "Not provided";
pub const PROJECT_TYPE_FALLBACK: &str = "Not specified";
pub const DETAILS_FALLBACK: &str = "No additional details provided";

/// Provider-neutral content of one lead notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderPayload {
    pub subject: String,
    pub from_name: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub project_type: String,
    pub message: String,
}

impl ProviderPayload {
    /// Build the payload, substituting fallback literals for absent fields.
    #[must_use]
    pub fn from_lead(lead: &LeadSubmission, site_name: &str) -> Self {
        Self {
            subject: subject_for(&lead.name),
            from_name: site_name.to_owned(),
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            address: lead.address().unwrap_or(ADDRESS_FALLBACK).to_owned(),
            project_type: lead
                .project_or_property_type()
                .unwrap_or(PROJECT_TYPE_FALLBACK)
                .to_owned(),
            message: lead.details().unwrap_or(DETAILS_FALLBACK).to_owned(),
        }
    }

    /// Plain-text body for email providers.
    #[must_use]
    pub fn text_body(&self) -> String {
        format!(
            "New lead from {from}\n\n\
             Name:         {name}\n\
             Email:        {email}\n\
             Phone:        {phone}\n\
             Address:      {address}\n\
             Project type: {project_type}\n\n\
             Details:\n{message}",
            from = self.from_name,
            name = self.name,
            email = self.email,
            phone = self.phone,
            address = self.address,
            project_type = self.project_type,
            message = self.message,
        )
    }
}

/// `"New Property Evaluation Request from {name}"`.
#[must_use]
pub fn subject_for(name: &str) -> String {
    format!("New Property Evaluation Request from {name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> LeadSubmission {
        LeadSubmission::new("John Smith", "john@example.com", "7135550123")
    }

    #[test]
    fn bare_submission_gets_all_fallbacks() {
        let payload = ProviderPayload::from_lead(&john(), DEFAULT_SITE_NAME);
        assert_eq!(payload.subject, "New Property Evaluation Request from John Smith");
        assert_eq!(payload.from_name, "Zena Construction Website");
        assert_eq!(payload.address, "Not provided");
        assert_eq!(payload.project_type, "Not specified");
        assert_eq!(payload.message, "No additional details provided");
    }

    #[test]
    fn property_type_and_message_fill_in_when_primary_fields_absent() {
        let mut lead = john();
        lead.property_type = Some("single-family".to_owned());
        lead.message = Some("Shingles missing on the north side".to_owned());

        let payload = ProviderPayload::from_lead(&lead, DEFAULT_SITE_NAME);
        assert_eq!(payload.project_type, "single-family");
        assert_eq!(payload.message, "Shingles missing on the north side");
    }

    #[test]
    fn primary_fields_take_precedence() {
        let mut lead = john();
        lead.address = Some("123 Main St, Houston, TX".to_owned());
        lead.project_type = Some("roofing".to_owned());
        lead.property_type = Some("condo".to_owned());
        lead.property_description = Some("Two-story, 20 year old roof".to_owned());
        lead.message = Some("ignored".to_owned());

        let payload = ProviderPayload::from_lead(&lead, "Other Site");
        assert_eq!(payload.from_name, "Other Site");
        assert_eq!(payload.address, "123 Main St, Houston, TX");
        assert_eq!(payload.project_type, "roofing");
        assert_eq!(payload.message, "Two-story, 20 year old roof");
    }

    #[test]
    fn text_body_contains_every_field() {
        let body = ProviderPayload::from_lead(&john(), DEFAULT_SITE_NAME).text_body();
        for needle in [
            "John Smith",
            "john@example.com",
            "7135550123",
            "Not provided",
            "Not specified",
            "No additional details provided",
        ] {
            assert!(body.contains(needle), "missing {needle:?} in:\n{body}");
        }
        assert!(body.starts_with("New lead from Zena Construction Website\n\nName:         John Smith\n"));
        assert!(body.ends_with("Details:\nNo additional details provided"));
    }
}
