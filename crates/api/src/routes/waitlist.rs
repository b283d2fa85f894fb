//! Waitlist sign-up endpoint.

use axum::{extract::State, Json};
use tracker_core::LeadSubmission;

use crate::extractors::JsonOrForm;
use crate::response::{ApiError, WaitlistResponse};
use crate::state::AppState;

/// POST /api/waitlist - Store a lead.
///
/// 400 when name or email is missing, 500 with the storage message when the
/// insert fails.
pub async fn waitlist_handler(
    State(state): State<AppState>,
    JsonOrForm(submission): JsonOrForm<LeadSubmission>,
) -> Result<Json<WaitlistResponse>, ApiError> {
    let lead_id = state.ingestion.submit_lead(submission).await?;
    Ok(Json(WaitlistResponse::joined(lead_id)))
}
