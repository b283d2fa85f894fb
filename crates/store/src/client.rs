//! SQLite-backed record store.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::Connection;
use telemetry::{health, metrics};
use tracing::{error, info};
use tracker_core::{
    Error, GroupField, Lead, NewLead, NewPageView, PageView, RecordKind, Result,
};

use crate::config::StoreConfig;
use crate::record_store::RecordStore;
use crate::{insert, query, schema};

const CLOSED_MESSAGE: &str = "database connection is closed";

/// Record store over a single SQLite connection.
///
/// The connection sits behind a mutex and every statement runs on the
/// blocking pool, so async callers never hold up the runtime on disk I/O.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Option<Connection>>>,
    config: StoreConfig,
}

impl SqliteStore {
    /// Opens (or creates) the database and ensures the schema exists.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()
        } else {
            Connection::open(&config.path)
        }
        .map_err(storage_error)?;

        init_connection(&conn, &config).map_err(storage_error)?;

        info!(path = %config.path, "Opened SQLite record store");

        Ok(Self {
            conn: Arc::new(Mutex::new(Some(conn))),
            config,
        })
    }

    /// Opens a private in-memory store.
    pub fn in_memory() -> Result<Self> {
        Self::open(StoreConfig::in_memory())
    }

    /// Runs `op` against the connection on the blocking pool.
    ///
    /// Failures are converted to [`Error::Storage`] with the SQLite message
    /// intact and mark the store unhealthy until the next success.
    pub async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let result = tokio::task::spawn_blocking(move || {
            let guard = conn.lock();
            match guard.as_ref() {
                Some(conn) => op(conn).map_err(storage_error),
                None => Err(Error::storage(CLOSED_MESSAGE)),
            }
        })
        .await
        .unwrap_or_else(|e| Err(task_failed(e)));

        match &result {
            Ok(_) => health().store.set_healthy(),
            Err(e) => {
                error!(error = %e, "Record store operation failed");
                metrics().storage_errors.inc();
                health().store.set_unhealthy(e.to_string());
            }
        }

        result
    }
}

fn init_connection(conn: &Connection, config: &StoreConfig) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
    if !config.is_in_memory() {
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })?;
    }
    for ddl in schema::all_tables() {
        conn.execute(ddl, [])?;
    }
    Ok(())
}

fn storage_error(err: rusqlite::Error) -> Error {
    Error::storage(err.to_string())
}

fn task_failed(err: tokio::task::JoinError) -> Error {
    Error::internal(format!("storage task failed: {}", err))
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn insert_lead(&self, lead: NewLead) -> Result<i64> {
        self.run(move |conn| insert::insert_lead(conn, &lead)).await
    }

    async fn insert_page_view(&self, view: NewPageView) -> Result<i64> {
        self.run(move |conn| insert::insert_page_view(conn, &view))
            .await
    }

    async fn count(&self, kind: RecordKind) -> Result<u64> {
        self.run(move |conn| query::count(conn, kind)).await
    }

    async fn group_count(&self, field: GroupField) -> Result<BTreeMap<String, u64>> {
        self.run(move |conn| query::group_count(conn, field)).await
    }

    async fn recent_leads(&self, limit: u32) -> Result<Vec<Lead>> {
        self.run(move |conn| query::recent_leads(conn, limit)).await
    }

    async fn recent_page_views(&self, limit: u32) -> Result<Vec<PageView>> {
        self.run(move |conn| query::recent_page_views(conn, limit))
            .await
    }

    async fn close(&self) -> Result<()> {
        let conn = Arc::clone(&self.conn);
        let closed = tokio::task::spawn_blocking(move || match conn.lock().take() {
            Some(conn) => conn.close().map_err(|(_, e)| storage_error(e)),
            None => Ok(()),
        })
        .await
        .map_err(task_failed)?;

        health().store.set_unhealthy(CLOSED_MESSAGE);
        info!(path = %self.config.path, "Closed the database connection");
        closed
    }

    fn is_healthy(&self) -> bool {
        self.conn.lock().is_some()
    }
}
