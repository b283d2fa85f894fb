//! API routes.

pub mod health;
pub mod pageview;
pub mod stats;
pub mod waitlist;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracker_core::limits::MAX_BODY_BYTES;

use crate::state::AppState;

/// Creates the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.static_dir.clone();

    Router::new()
        .route("/api/waitlist", post(waitlist::waitlist_handler))
        .route("/api/pageview", post(pageview::pageview_handler))
        .route("/api/stats", get(stats::stats_handler))
        .route("/health", get(health::health_handler))
        .route("/health/ready", get(health::ready_handler))
        .route("/health/live", get(health::live_handler))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route_service("/dashboard", ServeFile::new(static_dir.join("dashboard.html")))
        .fallback_service(ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
