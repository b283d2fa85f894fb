//! Store double for service tests: a real in-memory SQLite store with
//! per-operation failure injection and call counting.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use store::{RecordStore, SqliteStore};
use tracker_core::{
    Error, GroupField, Lead, NewLead, NewPageView, PageView, RecordKind, Result,
};

#[derive(Clone)]
pub struct FlakyStore {
    inner: SqliteStore,
    failing: Arc<Mutex<HashSet<&'static str>>>,
    calls: Arc<Mutex<HashMap<&'static str, usize>>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: SqliteStore::in_memory().unwrap(),
            failing: Arc::default(),
            calls: Arc::default(),
        }
    }

    pub fn shared(&self) -> Arc<dyn RecordStore> {
        Arc::new(self.clone())
    }

    pub fn inner(&self) -> &SqliteStore {
        &self.inner
    }

    pub fn fail_on(&self, op: &'static str) {
        self.failing.lock().insert(op);
    }

    pub fn calls(&self, op: &'static str) -> usize {
        self.calls.lock().get(op).copied().unwrap_or(0)
    }

    fn enter(&self, op: &'static str) -> Result<()> {
        *self.calls.lock().entry(op).or_insert(0) += 1;
        if self.failing.lock().contains(op) {
            return Err(Error::storage(format!("injected {} failure", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn insert_lead(&self, lead: NewLead) -> Result<i64> {
        self.enter("insert_lead")?;
        self.inner.insert_lead(lead).await
    }

    async fn insert_page_view(&self, view: NewPageView) -> Result<i64> {
        self.enter("insert_page_view")?;
        self.inner.insert_page_view(view).await
    }

    async fn count(&self, kind: RecordKind) -> Result<u64> {
        self.enter(match kind {
            RecordKind::Lead => "count_leads",
            RecordKind::PageView => "count_page_views",
        })?;
        self.inner.count(kind).await
    }

    async fn group_count(&self, field: GroupField) -> Result<BTreeMap<String, u64>> {
        self.enter("group_count")?;
        self.inner.group_count(field).await
    }

    async fn recent_leads(&self, limit: u32) -> Result<Vec<Lead>> {
        self.enter("recent_leads")?;
        self.inner.recent_leads(limit).await
    }

    async fn recent_page_views(&self, limit: u32) -> Result<Vec<PageView>> {
        self.enter("recent_page_views")?;
        self.inner.recent_page_views(limit).await
    }

    async fn close(&self) -> Result<()> {
        self.inner.close().await
    }

    fn is_healthy(&self) -> bool {
        self.inner.is_healthy()
    }
}
