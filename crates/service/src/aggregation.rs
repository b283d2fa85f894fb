//! Read path: fan out the five dashboard queries and join them into one
//! [`Summary`].

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use store::RecordStore;
use telemetry::metrics;
use tracing::{debug, warn};
use tracker_core::{limits::RECENT_LIMIT, Error, GroupField, RecordKind, Result, Summary};

/// What `/api/stats` does when one of its queries fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsFailurePolicy {
    /// Fail the whole request with the storage error.
    #[default]
    Fail,
    /// Serve the failed slice as its zero value and log the failure.
    Degrade,
}

/// Builds dashboard summaries straight from the store. Nothing is cached.
#[derive(Clone)]
pub struct AggregationService {
    store: Arc<dyn RecordStore>,
    policy: StatsFailurePolicy,
}

impl AggregationService {
    pub fn new(store: Arc<dyn RecordStore>, policy: StatsFailurePolicy) -> Self {
        Self { store, policy }
    }

    /// Run the five independent queries concurrently and combine them once
    /// all have returned.
    pub async fn get_stats(&self) -> Result<Summary> {
        let start = Instant::now();
        metrics().stats_requests.inc();

        let store = &self.store;
        let (total_leads, total_page_views, variants, recent_leads, recent_page_views) = tokio::join!(
            store.count(RecordKind::Lead),
            store.count(RecordKind::PageView),
            store.group_count(GroupField::AbVariant),
            store.recent_leads(RECENT_LIMIT),
            store.recent_page_views(RECENT_LIMIT),
        );

        let summary = Summary {
            total_leads: self.resolve("total_leads", total_leads)?,
            total_page_views: self.resolve("total_page_views", total_page_views)?,
            variants: self.resolve("variants", variants)?,
            recent_leads: self.resolve("recent_leads", recent_leads)?,
            recent_page_views: self.resolve("recent_page_views", recent_page_views)?,
        };

        let latency_ms = start.elapsed().as_millis() as u64;
        metrics().stats_latency_ms.observe(latency_ms);
        debug!(
            total_leads = summary.total_leads,
            total_page_views = summary.total_page_views,
            latency_ms = latency_ms,
            "Stats computed"
        );

        Ok(summary)
    }

    fn resolve<T: Default>(&self, slice: &'static str, result: Result<T>) -> Result<T> {
        match (result, self.policy) {
            (Ok(value), _) => Ok(value),
            (Err(e), StatsFailurePolicy::Fail) => Err(e),
            (Err(e), StatsFailurePolicy::Degrade) => {
                metrics().stats_partial_failures.inc();
                warn!(error = %Error::partial(slice, &e), "Serving stats with an empty slice");
                Ok(T::default())
            }
        }
    }
}
