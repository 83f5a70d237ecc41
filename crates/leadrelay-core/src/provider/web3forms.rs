//! Web3Forms forms-relay provider.
//!
//! `POST {base}/submit` with a JSON body carrying the access key and the
//! mapped lead fields. Web3Forms answers `{ "success": bool, "message": "..." }`
//! and may use a non-2xx status for failures, so the body decides the outcome.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{normalize_base_url, Credential, Delivery, LeadProvider};
use crate::error::ProviderError;
use crate::lead::LeadSubmission;
use crate::payload::ProviderPayload;

pub const DEFAULT_BASE_URL: &str = "https://api.web3forms.com";

const NAME: &str = "web3forms";

/// Forms-relay provider.
pub struct Web3FormsProvider {
    client: reqwest::Client,
    credential: Credential,
    site_name: String,
    base_url: String,
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    access_key: &'a str,
    #[serde(flatten)]
    payload: &'a ProviderPayload,
}

#[derive(Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
}

impl Web3FormsProvider {
    /// Create a provider that posts to the public Web3Forms endpoint.
    ///
    /// Accepts either credential variant; Web3Forms access keys are designed
    /// to be usable from a browser.
    #[must_use]
    pub fn new(client: reqwest::Client, credential: Credential, site_name: impl Into<String>) -> Self {
        Self {
            client,
            credential,
            site_name: site_name.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    /// Point the provider at a different base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}

#[async_trait::async_trait]
impl LeadProvider for Web3FormsProvider {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        NAME
    }

    async fn submit_lead(&self, lead: &LeadSubmission) -> Result<Delivery, ProviderError> {
        let payload = ProviderPayload::from_lead(lead, &self.site_name);
        let body = SubmitRequest {
            access_key: self.credential.expose(),
            payload: &payload,
        };

        let resp = self
            .client
            .post(format!("{}/submit", self.base_url))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::transport(NAME, &e))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ProviderError::transport(NAME, &e))?;

        let parsed: SubmitResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::InvalidResponse {
                provider: NAME.to_owned(),
                status: status.as_u16(),
                reason: e.to_string(),
            })?;

        debug!(status = status.as_u16(), success = parsed.success, "web3forms answered");

        if parsed.success {
            Ok(Delivery {
                provider: NAME.to_owned(),
                reference: None,
            })
        } else {
            Err(ProviderError::Rejected {
                provider: NAME.to_owned(),
                message: parsed
                    .message
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            })
        }
    }
}

impl std::fmt::Debug for Web3FormsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Web3FormsProvider")
            .field("credential", &self.credential)
            .field("site_name", &self.site_name)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
