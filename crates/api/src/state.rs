//! Application state shared across handlers.

use std::path::PathBuf;
use std::sync::Arc;

use service::{AggregationService, IngestionService, StatsFailurePolicy};
use store::RecordStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Record store (SQLite in production, mocks in tests)
    pub store: Arc<dyn RecordStore>,
    /// Write path for `/api/waitlist` and `/api/pageview`
    pub ingestion: IngestionService,
    /// Read path for `/api/stats`
    pub aggregation: AggregationService,
    /// Whether `X-Forwarded-For` / `X-Real-IP` are trusted for the client IP
    pub trust_proxy: bool,
    /// Directory holding the landing page, dashboard and their assets
    pub static_dir: PathBuf,
}

impl AppState {
    /// Creates state with proxy headers trusted, the `Fail` stats policy and
    /// `public/` as the static directory.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            ingestion: IngestionService::new(store.clone()),
            aggregation: AggregationService::new(store.clone(), StatsFailurePolicy::default()),
            store,
            trust_proxy: true,
            static_dir: PathBuf::from("public"),
        }
    }

    pub fn with_trust_proxy(mut self, trust_proxy: bool) -> Self {
        self.trust_proxy = trust_proxy;
        self
    }

    pub fn with_stats_policy(mut self, policy: StatsFailurePolicy) -> Self {
        self.aggregation = AggregationService::new(self.store.clone(), policy);
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }
}
