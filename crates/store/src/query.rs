//! Read queries backing the dashboard aggregates.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, types::Type, Connection, Row};
use tracker_core::{limits::UNKNOWN_LABEL, GroupField, Lead, PageView, RecordKind};

use crate::schema::TIMESTAMP_FORMAT;

/// Count all records of a kind.
pub fn count(conn: &Connection, kind: RecordKind) -> rusqlite::Result<u64> {
    let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
    let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(count as u64)
}

/// Count records per distinct value of `field`.
pub fn group_count(conn: &Connection, field: GroupField) -> rusqlite::Result<BTreeMap<String, u64>> {
    // Column and table names come from closed enums, never from input.
    let sql = format!(
        "SELECT COALESCE(NULLIF({col}, ''), ?1) AS label, COUNT(*)
         FROM {table}
         GROUP BY label",
        col = field.column(),
        table = field.kind().table(),
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![UNKNOWN_LABEL], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut groups = BTreeMap::new();
    for row in rows {
        let (label, count) = row?;
        // A literal "Unknown" variant lands in the same bucket as NULL.
        *groups.entry(label).or_insert(0) += count as u64;
    }
    Ok(groups)
}

/// Fetch the newest leads.
pub fn recent_leads(conn: &Connection, limit: u32) -> rusqlite::Result<Vec<Lead>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, email, ab_variant, created_at
         FROM leads
         ORDER BY created_at DESC, id DESC
         LIMIT ?1",
    )?;
    let rows = stmt
        .query_map(params![limit], lead_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Fetch the newest page views.
pub fn recent_page_views(conn: &Connection, limit: u32) -> rusqlite::Result<Vec<PageView>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, ip_address, user_agent, referrer, utm_source, utm_medium,
                utm_campaign, page_url, created_at
         FROM page_views
         ORDER BY created_at DESC, id DESC
         LIMIT ?1",
    )?;
    let rows = stmt
        .query_map(params![limit], page_view_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn lead_from_row(row: &Row<'_>) -> rusqlite::Result<Lead> {
    Ok(Lead {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        ab_variant: row.get(3)?,
        created_at: timestamp(row, 4)?,
    })
}

fn page_view_from_row(row: &Row<'_>) -> rusqlite::Result<PageView> {
    Ok(PageView {
        id: row.get(0)?,
        ip_address: row.get(1)?,
        user_agent: row.get(2)?,
        referrer: row.get(3)?,
        utm_source: row.get(4)?,
        utm_medium: row.get(5)?,
        utm_campaign: row.get(6)?,
        page_url: row.get(7)?,
        created_at: timestamp(row, 8)?,
    })
}

fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
