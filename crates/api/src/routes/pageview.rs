//! Tracking beacon endpoint.

use axum::{extract::State, Json};
use tracker_core::{ClientContext, PageViewSubmission};

use crate::extractors::{ClientIp, JsonOrForm, UserAgent};
use crate::response::{ApiError, PageViewResponse};
use crate::state::AppState;

/// POST /api/pageview - Record one page load.
///
/// IP and user agent come from the request, attribution fields from the
/// body. Every field is optional.
pub async fn pageview_handler(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    UserAgent(user_agent): UserAgent,
    JsonOrForm(submission): JsonOrForm<PageViewSubmission>,
) -> Result<Json<PageViewResponse>, ApiError> {
    let view_id = state
        .ingestion
        .submit_page_view(submission, ClientContext::new(ip, user_agent))
        .await?;
    Ok(Json(PageViewResponse::recorded(view_id)))
}
