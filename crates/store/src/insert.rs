//! Single-row insert helpers.

use rusqlite::{params, Connection};
use tracker_core::{NewLead, NewPageView};

/// Insert one lead and return its rowid.
pub fn insert_lead(conn: &Connection, lead: &NewLead) -> rusqlite::Result<i64> {
    conn.prepare_cached("INSERT INTO leads (name, email, ab_variant) VALUES (?1, ?2, ?3)")?
        .execute(params![lead.name, lead.email, lead.ab_variant])?;
    Ok(conn.last_insert_rowid())
}

/// Insert one page view and return its rowid.
pub fn insert_page_view(conn: &Connection, view: &NewPageView) -> rusqlite::Result<i64> {
    conn.prepare_cached(
        "INSERT INTO page_views
            (ip_address, user_agent, referrer, utm_source, utm_medium, utm_campaign, page_url)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?
    .execute(params![
        view.ip_address,
        view.user_agent,
        view.referrer,
        view.utm_source,
        view.utm_medium,
        view.utm_campaign,
        view.page_url,
    ])?;
    Ok(conn.last_insert_rowid())
}
