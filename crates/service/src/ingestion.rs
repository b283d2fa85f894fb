//! Write path: validate one inbound event and append it to the store.

use std::sync::Arc;
use std::time::Instant;

use store::RecordStore;
use telemetry::metrics;
use tracing::{info, warn};
use tracker_core::{
    limits::UNKNOWN_LABEL, ClientContext, LeadSubmission, PageViewSubmission, Result,
};

/// Validates and persists leads and page views.
///
/// Each call performs at most one insert and never retries; repeated
/// identical submissions produce repeated rows.
#[derive(Clone)]
pub struct IngestionService {
    store: Arc<dyn RecordStore>,
}

impl IngestionService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Store a waitlist sign-up and return its id.
    ///
    /// Fails with a validation error, before touching the store, when name
    /// or email is missing or blank.
    pub async fn submit_lead(&self, submission: LeadSubmission) -> Result<i64> {
        let start = Instant::now();
        metrics().leads_received.inc();

        let lead = submission.into_new_lead().inspect_err(|e| {
            metrics().leads_failed_validation.inc();
            warn!(error = %e, "Rejected waitlist submission");
        })?;

        let variant = lead
            .ab_variant
            .clone()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string());

        let lead_id = self.store.insert_lead(lead).await?;

        metrics().leads_stored.inc();
        let latency_ms = start.elapsed().as_millis() as u64;
        metrics().ingest_latency_ms.observe(latency_ms);

        info!(
            lead_id = lead_id,
            ab_variant = %variant,
            latency_ms = latency_ms,
            "Lead stored"
        );

        Ok(lead_id)
    }

    /// Store a page view and return its id. No field is required.
    pub async fn submit_page_view(
        &self,
        submission: PageViewSubmission,
        client: ClientContext,
    ) -> Result<i64> {
        let start = Instant::now();
        metrics().pageviews_received.inc();

        let view = submission.into_new_page_view(client).inspect_err(|e| {
            warn!(error = %e, "Rejected page view");
        })?;

        let view_id = self.store.insert_page_view(view).await?;

        metrics().pageviews_stored.inc();
        let latency_ms = start.elapsed().as_millis() as u64;
        metrics().ingest_latency_ms.observe(latency_ms);

        info!(view_id = view_id, latency_ms = latency_ms, "Page view stored");

        Ok(view_id)
    }
}
