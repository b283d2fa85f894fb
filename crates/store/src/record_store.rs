//! The record store seam.
//!
//! Services hold an `Arc<dyn RecordStore>`; production wires in
//! [`SqliteStore`](crate::SqliteStore), tests can swap in a mock that fails
//! on demand.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracker_core::{GroupField, Lead, NewLead, NewPageView, PageView, RecordKind, Result};

/// Append-only storage for leads and page views.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a lead, returning its assigned id.
    async fn insert_lead(&self, lead: NewLead) -> Result<i64>;

    /// Persist a page view, returning its assigned id.
    async fn insert_page_view(&self, view: NewPageView) -> Result<i64>;

    /// Total number of records of `kind`.
    async fn count(&self, kind: RecordKind) -> Result<u64>;

    /// Record counts per distinct value of `field`. NULL and empty values
    /// are counted together under [`UNKNOWN_LABEL`](tracker_core::limits::UNKNOWN_LABEL).
    async fn group_count(&self, field: GroupField) -> Result<BTreeMap<String, u64>>;

    /// Up to `limit` leads, newest first (ties broken by id, descending).
    async fn recent_leads(&self, limit: u32) -> Result<Vec<Lead>>;

    /// Up to `limit` page views, newest first (ties broken by id, descending).
    async fn recent_page_views(&self, limit: u32) -> Result<Vec<PageView>>;

    /// Flush and release the underlying storage. Later calls fail.
    async fn close(&self) -> Result<()>;

    /// Check if the store is open and its last operation succeeded.
    fn is_healthy(&self) -> bool;
}
