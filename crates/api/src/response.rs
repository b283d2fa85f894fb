//! Standardized API responses.
//!
//! Failures are always `{ "success": false, "message": ... }`; the browser
//! only ever looks at the flag and the free-text message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use telemetry::{HealthReport, MetricsSnapshot};

/// Message returned with a successful waitlist sign-up.
pub const WAITLIST_JOINED_MESSAGE: &str = "Successfully joined the waitlist";

/// Success response for `/api/waitlist`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistResponse {
    pub success: bool,
    pub message: String,
    pub lead_id: i64,
}

impl WaitlistResponse {
    pub fn joined(lead_id: i64) -> Self {
        Self {
            success: true,
            message: WAITLIST_JOINED_MESSAGE.to_string(),
            lead_id,
        }
    }
}

/// Success response for `/api/pageview`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageViewResponse {
    pub success: bool,
    pub view_id: i64,
}

impl PageViewResponse {
    pub fn recorded(view_id: i64) -> Self {
        Self {
            success: true,
            view_id,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub store_connected: bool,
    pub report: HealthReport,
    pub metrics: MetricsSnapshot,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            response: ErrorResponse::new(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<tracker_core::Error> for ApiError {
    fn from(err: tracker_core::Error) -> Self {
        let status =
            StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        ApiError::new(status, err.to_string())
    }
}
