//! Mock implementations for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use store::{RecordStore, SqliteStore};
use tracker_core::{
    Error, GroupField, Lead, NewLead, NewPageView, PageView, RecordKind, Result,
};

/// Record store that wraps a real in-memory SQLite store and can be
/// switched into failure mode.
///
/// Implements the same `RecordStore` trait as `SqliteStore`, so the router
/// and services run their production code paths against it.
#[derive(Clone)]
pub struct MockStore {
    inner: SqliteStore,
    /// Fail writes if set.
    fail_writes: Arc<Mutex<bool>>,
    /// Fail reads whose names are listed.
    fail_reads: Arc<Mutex<Vec<&'static str>>>,
}

/// Message carried by injected failures.
pub const MOCK_FAILURE: &str = "disk I/O error";

impl MockStore {
    pub fn new() -> Self {
        Self {
            inner: SqliteStore::in_memory().expect("Failed to open in-memory store"),
            fail_writes: Arc::new(Mutex::new(false)),
            fail_reads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Underlying store, for verifying persisted rows.
    pub fn inner(&self) -> &SqliteStore {
        &self.inner
    }

    /// Set failure mode for both insert operations.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock() = fail;
    }

    /// Fail one read: "count", "group_count", "recent_leads" or "recent_page_views".
    pub fn fail_read(&self, op: &'static str) {
        self.fail_reads.lock().push(op);
    }

    fn check_write(&self) -> Result<()> {
        if *self.fail_writes.lock() {
            return Err(Error::storage(MOCK_FAILURE));
        }
        Ok(())
    }

    fn check_read(&self, op: &'static str) -> Result<()> {
        if self.fail_reads.lock().contains(&op) {
            return Err(Error::storage(MOCK_FAILURE));
        }
        Ok(())
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MockStore {
    async fn insert_lead(&self, lead: NewLead) -> Result<i64> {
        self.check_write()?;
        self.inner.insert_lead(lead).await
    }

    async fn insert_page_view(&self, view: NewPageView) -> Result<i64> {
        self.check_write()?;
        self.inner.insert_page_view(view).await
    }

    async fn count(&self, kind: RecordKind) -> Result<u64> {
        self.check_read("count")?;
        self.inner.count(kind).await
    }

    async fn group_count(&self, field: GroupField) -> Result<BTreeMap<String, u64>> {
        self.check_read("group_count")?;
        self.inner.group_count(field).await
    }

    async fn recent_leads(&self, limit: u32) -> Result<Vec<Lead>> {
        self.check_read("recent_leads")?;
        self.inner.recent_leads(limit).await
    }

    async fn recent_page_views(&self, limit: u32) -> Result<Vec<PageView>> {
        self.check_read("recent_page_views")?;
        self.inner.recent_page_views(limit).await
    }

    async fn close(&self) -> Result<()> {
        self.inner.close().await
    }

    fn is_healthy(&self) -> bool {
        !*self.fail_writes.lock() && self.inner.is_healthy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_persists_when_healthy() {
        let mock = MockStore::new();
        let id = mock
            .insert_page_view(NewPageView::default())
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(mock.inner().count(RecordKind::PageView).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mock_store_failure_mode() {
        let mock = MockStore::new();
        mock.set_fail_writes(true);

        let result = mock.insert_page_view(NewPageView::default()).await;
        assert_eq!(result, Err(Error::storage(MOCK_FAILURE)));
        assert!(!mock.is_healthy());
        assert_eq!(mock.inner().count(RecordKind::PageView).await.unwrap(), 0);
    }
}
