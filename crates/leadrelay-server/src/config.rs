//! Server configuration for the lead relay.
//!
//! Loads configuration from environment variables with sensible defaults.
//! The provider credential is required: a relay without one would accept
//! every submission and fail every delivery, so it refuses to start instead.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use leadrelay_core::payload::DEFAULT_SITE_NAME;
use leadrelay_core::provider::{http_client, ResendProvider, Web3FormsProvider};
use leadrelay_core::{Credential, LeadProvider, ProviderError, SecretKey};

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required environment variable {var}")]
    Missing { var: &'static str },

    /// A variable is set but unusable.
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Sender label on every notification.
    pub site_name: String,
    /// Origin allowed to call the relay cross-site (`None` allows any).
    pub allowed_origin: Option<HeaderValue>,
    /// Timeout for the outbound provider call (`None` waits indefinitely).
    pub provider_timeout: Option<Duration>,
    /// Which provider delivers leads.
    pub provider: ProviderConfig,
}

/// The active provider and its credentials.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    /// Web3Forms forms relay.
    Web3Forms {
        access_key: SecretKey,
        base_url: Option<String>,
    },
    /// Resend transactional email.
    Resend {
        api_key: SecretKey,
        from_address: String,
        to: Vec<String>,
        base_url: Option<String>,
    },
}

impl ProviderConfig {
    /// Provider name as used in `LEADRELAY_PROVIDER`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Web3Forms { .. } => "web3forms",
            Self::Resend { .. } => "resend",
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (platform convention, binds to `0.0.0.0`)
    /// - `LEADRELAY_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:3000`)
    /// - `LEADRELAY_LOG_LEVEL` — log filter (default: `info`)
    /// - `LEADRELAY_SITE_NAME` — sender label (default: `Zena Construction Website`)
    /// - `LEADRELAY_ALLOWED_ORIGIN` — CORS origin (default: any)
    /// - `LEADRELAY_PROVIDER_TIMEOUT_SECS` — outbound timeout (default: none)
    /// - `LEADRELAY_PROVIDER` — `web3forms` or `resend` (default: `web3forms`)
    /// - `LEADRELAY_PROVIDER_URL` — provider base URL override (optional)
    /// - `WEB3FORMS_ACCESS_KEY` — Web3Forms access key (required for `web3forms`)
    /// - `RESEND_API_KEY` — Resend API key (required for `resend`)
    /// - `LEADRELAY_NOTIFY_FROM` — verified sender address (required for `resend`)
    /// - `LEADRELAY_NOTIFY_TO` — comma-separated recipients (required for `resend`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required credential is missing or a
    /// value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Priority: LEADRELAY_BIND_ADDR > PORT > default 127.0.0.1:3000
        let bind_addr = if let Some(addr) = var("LEADRELAY_BIND_ADDR") {
            addr.parse().map_err(|e| ConfigError::Invalid {
                var: "LEADRELAY_BIND_ADDR",
                reason: format!("{e}"),
            })?
        } else if let Some(port) = var("PORT") {
            let port: u16 = port.parse().map_err(|e| ConfigError::Invalid {
                var: "PORT",
                reason: format!("{e}"),
            })?;
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 3000))
        };

        let log_level = var("LEADRELAY_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let site_name = var("LEADRELAY_SITE_NAME").unwrap_or_else(|| DEFAULT_SITE_NAME.to_owned());

        let allowed_origin = var("LEADRELAY_ALLOWED_ORIGIN")
            .map(|origin| {
                HeaderValue::from_str(&origin).map_err(|e| ConfigError::Invalid {
                    var: "LEADRELAY_ALLOWED_ORIGIN",
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let provider_timeout = var("LEADRELAY_PROVIDER_TIMEOUT_SECS")
            .map(|secs| {
                secs.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| ConfigError::Invalid {
                        var: "LEADRELAY_PROVIDER_TIMEOUT_SECS",
                        reason: e.to_string(),
                    })
            })
            .transpose()?;

        let base_url = var("LEADRELAY_PROVIDER_URL");

        let provider = match var("LEADRELAY_PROVIDER")
            .unwrap_or_else(|| "web3forms".to_owned())
            .to_lowercase()
            .as_str()
        {
            "web3forms" => ProviderConfig::Web3Forms {
                access_key: var("WEB3FORMS_ACCESS_KEY")
                    .map(SecretKey::new)
                    .ok_or(ConfigError::Missing {
                        var: "WEB3FORMS_ACCESS_KEY",
                    })?,
                base_url,
            },
            "resend" => ProviderConfig::Resend {
                api_key: var("RESEND_API_KEY")
                    .map(SecretKey::new)
                    .ok_or(ConfigError::Missing {
                        var: "RESEND_API_KEY",
                    })?,
                from_address: var("LEADRELAY_NOTIFY_FROM").ok_or(ConfigError::Missing {
                    var: "LEADRELAY_NOTIFY_FROM",
                })?,
                to: var("LEADRELAY_NOTIFY_TO")
                    .map(|list| {
                        list.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(str::to_owned)
                            .collect::<Vec<_>>()
                    })
                    .filter(|to| !to.is_empty())
                    .ok_or(ConfigError::Missing {
                        var: "LEADRELAY_NOTIFY_TO",
                    })?,
                base_url,
            },
            other => {
                return Err(ConfigError::Invalid {
                    var: "LEADRELAY_PROVIDER",
                    reason: format!("unknown provider '{other}' (expected web3forms or resend)"),
                });
            }
        };

        Ok(Self {
            bind_addr,
            log_level,
            site_name,
            allowed_origin,
            provider_timeout,
            provider,
        })
    }

    /// Construct the single provider instance shared by all requests.
    ///
    /// The server only ever builds providers with a server-held credential.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Config`] if the HTTP client cannot be built.
    pub fn build_provider(&self) -> Result<Arc<dyn LeadProvider>, ProviderError> {
        let client = http_client(self.provider_timeout)?;

        let provider: Arc<dyn LeadProvider> = match &self.provider {
            ProviderConfig::Web3Forms {
                access_key,
                base_url,
            } => {
                let provider = Web3FormsProvider::new(
                    client,
                    Credential::ServerHeld(access_key.clone()),
                    self.site_name.clone(),
                );
                Arc::new(match base_url {
                    Some(url) => provider.with_base_url(url),
                    None => provider,
                })
            }
            ProviderConfig::Resend {
                api_key,
                from_address,
                to,
                base_url,
            } => {
                let provider = ResendProvider::new(
                    client,
                    api_key.clone(),
                    self.site_name.clone(),
                    from_address.clone(),
                    to.clone(),
                );
                Arc::new(match base_url {
                    Some(url) => provider.with_base_url(url),
                    None => provider,
                })
            }
        };

        Ok(provider)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_to_web3forms_on_localhost() {
        let cfg = load(&[("WEB3FORMS_ACCESS_KEY", "abc")]).unwrap();
        assert_eq!(cfg.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.site_name, "Zena Construction Website");
        assert_eq!(cfg.provider.kind(), "web3forms");
        assert!(cfg.allowed_origin.is_none());
        assert!(cfg.provider_timeout.is_none());
    }

    #[test]
    fn missing_access_key_is_an_error() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var: "WEB3FORMS_ACCESS_KEY" }));
    }

    #[test]
    fn blank_access_key_counts_as_missing() {
        let err = load(&[("WEB3FORMS_ACCESS_KEY", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { .. }));
    }

    #[test]
    fn port_binds_all_interfaces() {
        let cfg = load(&[("PORT", "8080"), ("WEB3FORMS_ACCESS_KEY", "abc")]).unwrap();
        assert_eq!(cfg.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    }

    #[test]
    fn bind_addr_overrides_port() {
        let cfg = load(&[
            ("PORT", "8080"),
            ("LEADRELAY_BIND_ADDR", "127.0.0.1:9000"),
            ("WEB3FORMS_ACCESS_KEY", "abc"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 9000);
    }

    #[test]
    fn resend_requires_sender_and_recipients() {
        let err = load(&[("LEADRELAY_PROVIDER", "resend"), ("RESEND_API_KEY", "re_x")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var: "LEADRELAY_NOTIFY_FROM" }));

        let cfg = load(&[
            ("LEADRELAY_PROVIDER", "Resend"),
            ("RESEND_API_KEY", "re_x"),
            ("LEADRELAY_NOTIFY_FROM", "leads@zenaconstruction.com"),
            ("LEADRELAY_NOTIFY_TO", "office@zenaconstruction.com, owner@zenaconstruction.com"),
        ])
        .unwrap();
        let ProviderConfig::Resend { to, .. } = &cfg.provider else {
            panic!("expected resend config");
        };
        assert_eq!(to.len(), 2);
        assert_eq!(to[1], "owner@zenaconstruction.com");
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = load(&[("LEADRELAY_PROVIDER", "sendgrid")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "LEADRELAY_PROVIDER", .. }));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = load(&[
            ("WEB3FORMS_ACCESS_KEY", "abc"),
            ("LEADRELAY_PROVIDER_TIMEOUT_SECS", "soon"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn secrets_do_not_appear_in_debug_output() {
        let cfg = load(&[("WEB3FORMS_ACCESS_KEY", "very-secret-key")]).unwrap();
        assert!(!format!("{cfg:?}").contains("very-secret-key"));
    }

    #[test]
    fn builds_configured_provider() {
        let cfg = load(&[("WEB3FORMS_ACCESS_KEY", "abc")]).unwrap();
        assert_eq!(cfg.build_provider().unwrap().name(), "web3forms");
    }
}
