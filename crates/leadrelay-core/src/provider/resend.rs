//! Resend transactional email provider.
//!
//! `POST {base}/emails` with `Authorization: Bearer <key>`. A 2xx answer
//! carries `{ "id": "..." }`; failures carry `{ "name": "...", "message": "..." }`.
//! The visitor's address goes into `reply_to` so the business can answer
//! the lead directly from the notification.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{normalize_base_url, Delivery, LeadProvider, SecretKey};
use crate::error::ProviderError;
use crate::lead::LeadSubmission;
use crate::payload::ProviderPayload;

pub const DEFAULT_BASE_URL: &str = "https://api.resend.com";

const NAME: &str = "resend";

/// Transactional email provider. Only accepts a server-held key.
pub struct ResendProvider {
    client: reqwest::Client,
    api_key: SecretKey,
    site_name: String,
    /// Verified sender address, e.g. `leads@zenaconstruction.com`.
    from_address: String,
    /// Inbox that receives lead notifications.
    to: Vec<String>,
    base_url: String,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: &'a [String],
    reply_to: &'a str,
    subject: &'a str,
    text: String,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

#[derive(Deserialize)]
struct ResendErrorBody {
    message: Option<String>,
    name: Option<String>,
}

impl ResendProvider {
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        api_key: SecretKey,
        site_name: impl Into<String>,
        from_address: impl Into<String>,
        to: Vec<String>,
    ) -> Self {
        Self {
            client,
            api_key,
            site_name: site_name.into(),
            from_address: from_address.into(),
            to,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }
}

#[async_trait::async_trait]
impl LeadProvider for ResendProvider {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        NAME
    }

    async fn submit_lead(&self, lead: &LeadSubmission) -> Result<Delivery, ProviderError> {
        let payload = ProviderPayload::from_lead(lead, &self.site_name);
        let body = SendEmailRequest {
            from: format!("{} <{}>", self.site_name, self.from_address),
            to: &self.to,
            reply_to: &payload.email,
            subject: &payload.subject,
            text: payload.text_body(),
        };

        let resp = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::transport(NAME, &e))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ProviderError::transport(NAME, &e))?;

        debug!(status = status.as_u16(), "resend answered");

        if status.is_success() {
            let parsed: SendEmailResponse =
                serde_json::from_str(&text).map_err(|e| ProviderError::InvalidResponse {
                    provider: NAME.to_owned(),
                    status: status.as_u16(),
                    reason: e.to_string(),
                })?;
            return Ok(Delivery {
                provider: NAME.to_owned(),
                reference: parsed.id,
            });
        }

        let message = serde_json::from_str::<ResendErrorBody>(&text)
            .ok()
            .and_then(|b| match (b.name, b.message) {
                (Some(name), Some(msg)) => Some(format!("{name}: {msg}")),
                (None, Some(msg)) => Some(msg),
                (Some(name), None) => Some(name),
                (None, None) => None,
            })
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        Err(ProviderError::Rejected {
            provider: NAME.to_owned(),
            message,
        })
    }
}

impl std::fmt::Debug for ResendProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendProvider")
            .field("api_key", &self.api_key)
            .field("site_name", &self.site_name)
            .field("from_address", &self.from_address)
            .field("to", &self.to)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
