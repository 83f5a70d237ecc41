//! Provider interface for delivering Lead Submissions.
//!
//! Exactly one [`LeadProvider`] is active per deployment. The relay endpoint
//! and the contact form both talk to it through the same narrow method,
//! [`LeadProvider::submit_lead`], so a forms relay, an email API, the relay
//! endpoint itself, and test doubles are interchangeable.
//!
//! # Credentials
//!
//! A provider authenticates with a [`Credential`]. The server-held variant
//! is a [`SecretKey`] that is zeroized on drop and redacted from `Debug`
//! output. The public-embedded variant models the alternate architecture in
//! which the forms-relay access key ships to the browser; only providers
//! whose keys are designed to be public accept it.

pub mod resend;
pub mod web3forms;

use std::fmt;
use std::time::Duration;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::ProviderError;
use crate::lead::LeadSubmission;

pub use resend::ResendProvider;
pub use web3forms::Web3FormsProvider;

/// User agent sent on every outbound call.
pub const USER_AGENT: &str = concat!("leadrelay/", env!("CARGO_PKG_VERSION"));

/// A delivered submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Name of the provider that accepted the lead.
    pub provider: String,
    /// Provider-side identifier, when the provider returns one.
    pub reference: Option<String>,
}

/// Something that accepts a Lead Submission and reports success or failure.
///
/// Implementations must be safe to share across async tasks. A call makes at
/// most one outbound request and never retries.
#[async_trait::async_trait]
pub trait LeadProvider: Send + Sync {
    /// The provider's name (for logs and health output).
    fn name(&self) -> &str;

    /// Deliver one submission.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Rejected`] when the provider answers with a
    /// failure, and a transport or response error when no usable answer
    /// arrives.
    async fn submit_lead(&self, lead: &LeadSubmission) -> Result<Delivery, ProviderError>;
}

/// A provider API key held only by the server. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(String);

impl SecretKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the raw key.
    ///
    /// The caller must not log or return this value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretKey").field(&"[REDACTED]").finish()
    }
}

/// Where a provider's key comes from.
#[derive(Clone)]
pub enum Credential {
    /// Secret read from the server environment. Never leaves the server.
    ServerHeld(SecretKey),
    /// Public access key embedded in a client bundle.
    PublicEmbedded(String),
}

impl Credential {
    /// Borrow the key for placing it in an outbound request.
    #[must_use]
    pub fn expose(&self) -> &str {
        match self {
            Self::ServerHeld(key) => key.expose(),
            Self::PublicEmbedded(key) => key,
        }
    }

    #[must_use]
    pub fn is_public(&self) -> bool {
        matches!(self, Self::PublicEmbedded(_))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServerHeld(key) => f.debug_tuple("ServerHeld").field(key).finish(),
            Self::PublicEmbedded(key) => f.debug_tuple("PublicEmbedded").field(key).finish(),
        }
    }
}

/// Build the shared outbound HTTP client.
///
/// No timeout is applied unless one is given; the call then waits for the
/// transport to resolve.
///
/// # Errors
///
/// Returns [`ProviderError::Config`] if the TLS backend cannot be initialized.
pub fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client, ProviderError> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|e| ProviderError::Config {
        provider: "http".to_owned(),
        reason: e.to_string(),
    })
}

/// Strip trailing slashes so paths can be appended with `format!`.
pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_owned()
}
