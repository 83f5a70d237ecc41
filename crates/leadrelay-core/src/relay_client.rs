//! HTTP client for the relay endpoint.
//!
//! This is what the contact form submits through in the default
//! architecture: the browser (or CLI) only ever sees the relay, and the
//! provider key stays on the server.

use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;
use crate::lead::LeadSubmission;
use crate::provider::{normalize_base_url, Delivery, LeadProvider};

/// Path of the relay endpoint, relative to the site origin.
pub const CONTACT_PATH: &str = "/api/contact";

const NAME: &str = "relay";

/// Client for `POST /api/contact`.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct RelayResponse {
    #[serde(default)]
    success: bool,
    error: Option<String>,
    details: Option<String>,
}

impl RelayClient {
    /// `base_url` is the site origin, e.g. `https://zenaconstruction.com`.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{CONTACT_PATH}", self.base_url)
    }
}

#[async_trait::async_trait]
impl LeadProvider for RelayClient {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        NAME
    }

    async fn submit_lead(&self, lead: &LeadSubmission) -> Result<Delivery, ProviderError> {
        let resp = self
            .client
            .post(self.endpoint())
            .json(lead)
            .send()
            .await
            .map_err(|e| ProviderError::transport(NAME, &e))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ProviderError::transport(NAME, &e))?;

        debug!(status = status.as_u16(), "relay answered");

        let parsed: RelayResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::InvalidResponse {
                provider: NAME.to_owned(),
                status: status.as_u16(),
                reason: e.to_string(),
            })?;

        if parsed.success {
            return Ok(Delivery {
                provider: NAME.to_owned(),
                reference: None,
            });
        }

        let message = match (parsed.error, parsed.details) {
            (Some(error), Some(details)) => format!("{error}: {details}"),
            (Some(error), None) => error,
            (None, _) => format!("HTTP {}", status.as_u16()),
        };

        Err(ProviderError::Rejected {
            provider: NAME.to_owned(),
            message,
        })
    }
}
