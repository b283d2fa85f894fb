//! Dashboard aggregate endpoint.

use axum::{extract::State, Json};
use tracker_core::Summary;

use crate::response::ApiError;
use crate::state::AppState;

/// GET /api/stats - Totals, variant breakdown and the 50 newest records of
/// each kind.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<Summary>, ApiError> {
    Ok(Json(state.aggregation.get_stats().await?))
}
