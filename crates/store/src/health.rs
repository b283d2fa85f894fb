//! Store health checks.

use crate::client::SqliteStore;
use tracing::{debug, error};

/// Check the SQLite connection with a trivial query.
pub async fn check_connection(store: &SqliteStore) -> bool {
    match store
        .run(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)))
        .await
    {
        Ok(_) => {
            debug!("Record store connection healthy");
            true
        }
        Err(e) => {
            error!("Record store health check failed: {}", e);
            false
        }
    }
}
