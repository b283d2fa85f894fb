//! SQLite table schemas.
//!
//! Both tables are append-only logs:
//! - `AUTOINCREMENT` so ids are never reused, even after a crash mid-insert
//! - `created_at` as fixed-width UTC text (`YYYY-MM-DD HH:MM:SS.mmm`),
//!   so lexical order is chronological order

/// SQL for creating the leads table.
pub const CREATE_LEADS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS leads (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    email TEXT NOT NULL CHECK (length(trim(email)) > 0),
    ab_variant TEXT,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
)
"#;

/// SQL for creating the page views table.
pub const CREATE_PAGE_VIEWS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS page_views (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ip_address TEXT,
    user_agent TEXT,
    referrer TEXT,
    utm_source TEXT,
    utm_medium TEXT,
    utm_campaign TEXT,
    page_url TEXT,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
)
"#;

/// Index backing the newest-first listings of `/api/stats`.
pub const CREATE_LEADS_RECENT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_leads_recent ON leads (created_at DESC, id DESC)";

pub const CREATE_PAGE_VIEWS_RECENT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_page_views_recent ON page_views (created_at DESC, id DESC)";

/// Get all DDL statements in order.
pub fn all_tables() -> Vec<&'static str> {
    vec![
        CREATE_LEADS_TABLE,
        CREATE_PAGE_VIEWS_TABLE,
        CREATE_LEADS_RECENT_INDEX,
        CREATE_PAGE_VIEWS_RECENT_INDEX,
    ]
}

/// Format used for `created_at` columns. `%.f` also accepts rows written
/// with second precision (`CURRENT_TIMESTAMP`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
