//! Error types for `leadrelay-core`.
//!
//! Provider errors carry enough context for an operator to diagnose a failed
//! delivery. They never include credential material, and their text is
//! never meant to be shown to the person who filled in the form.

use std::collections::BTreeMap;

use crate::lead::Field;

/// Per-field validation failures for a Lead Submission.
///
/// Each failing field maps to the message the form renders next to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("invalid submission: {}", self.summary())]
pub struct FieldErrors {
    errors: BTreeMap<Field, &'static str>,
}

impl FieldErrors {
    /// An empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the message for a field, replacing any earlier one.
    pub fn insert(&mut self, field: Field, message: &'static str) {
        self.errors.insert(field, message);
    }

    /// The message for a field, if it failed validation.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate failing fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().map(|(field, msg)| (*field, *msg))
    }

    /// Messages joined into one line, e.g. `"Name is required; Invalid email address"`.
    #[must_use]
    pub fn summary(&self) -> String {
        self.errors
            .values()
            .copied()
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// `Ok(())` when nothing failed, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the error set itself when it is non-empty.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Errors from delivering a Lead Submission to a provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider could not be constructed (bad base URL, TLS setup, ...).
    #[error("provider '{provider}' misconfigured: {reason}")]
    Config { provider: String, reason: String },

    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("transport error talking to '{provider}': {reason}")]
    Transport { provider: String, reason: String },

    /// The provider answered and reported that it did not accept the lead.
    #[error("provider '{provider}' rejected the submission: {message}")]
    Rejected { provider: String, message: String },

    /// The provider answered with a body we could not interpret.
    #[error("unreadable response from '{provider}' (HTTP {status}): {reason}")]
    InvalidResponse {
        provider: String,
        status: u16,
        reason: String,
    },
}

impl ProviderError {
    /// Build a [`ProviderError::Transport`] from a `reqwest` failure.
    ///
    /// `reqwest` errors can embed the request URL; provider URLs carry no
    /// credentials so this is safe to log.
    pub(crate) fn transport(provider: &str, err: &reqwest::Error) -> Self {
        Self::Transport {
            provider: provider.to_owned(),
            reason: err.to_string(),
        }
    }

    /// Whether the provider itself reported the failure, as opposed to the
    /// call never completing or returning garbage.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
