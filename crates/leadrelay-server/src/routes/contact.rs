//! Contact relay route: `POST /api/contact`
//!
//! `received → validated → forwarded → {succeeded | failed}` within a single
//! request. Each call makes at most one outbound provider request and never
//! retries; the visitor resubmits to try again.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{info, warn};

use leadrelay_core::relay_client::CONTACT_PATH;
use leadrelay_core::LeadSubmission;

use crate::error::AppError;
use crate::state::AppState;

/// Build the contact router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(CONTACT_PATH, post(submit_contact))
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
}

/// `POST /api/contact` — Validate a Lead Submission and forward it.
#[tracing::instrument(
    name = "contact_submission",
    skip_all,
    fields(submission_id = %uuid::Uuid::new_v4())
)]
async fn submit_contact(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LeadSubmission>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Json(lead) = body.map_err(|rejection| {
        let reason = rejection.body_text();
        warn!(%reason, "malformed contact payload");
        AppError::BadRequest(reason)
    })?;

    if let Err(errors) = lead.validate() {
        warn!(fields = errors.len(), "contact payload failed validation");
        return Err(errors.into());
    }

    let delivery = state.provider.submit_lead(&lead).await?;

    info!(
        provider = %delivery.provider,
        reference = ?delivery.reference,
        "lead forwarded"
    );

    Ok(Json(SubmitResponse { success: true }))
}
