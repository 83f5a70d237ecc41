//! Shared application state for the relay server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It only holds the provider, which is itself
//! stateless apart from its pooled HTTP client.

use std::sync::Arc;

use leadrelay_core::LeadProvider;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// The one provider every submission is forwarded to.
    pub provider: Arc<dyn LeadProvider>,
}

impl AppState {
    #[must_use]
    pub fn new(provider: Arc<dyn LeadProvider>) -> Self {
        Self { provider }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("provider", &self.provider.name())
            .finish()
    }
}
