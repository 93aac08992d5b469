//! SQL for `card_logs`. Every value is a bound parameter.

use crate::models::ScanEvent;
use crate::utils::time::{format_timestamp, parse_timestamp};
use chrono::NaiveDateTime;
use rusqlite::{Connection, Result, Row, TransactionBehavior, params};
use thiserror::Error;

const SELECT_COLUMNS: &str = "SELECT id, uid, user, timestamp FROM card_logs";
const NEWEST_FIRST: &str = "ORDER BY timestamp DESC, id DESC";

#[derive(Debug, Error)]
#[error("unparseable timestamp '{0}'")]
struct BadTimestamp(String);

pub fn map_row(row: &Row) -> Result<ScanEvent> {
    let ts_str: String = row.get("timestamp")?;
    let timestamp = parse_timestamp(&ts_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            Box::new(BadTimestamp(ts_str.clone())),
        )
    })?;

    Ok(ScanEvent {
        id: row.get("id")?,
        uid: row.get("uid")?,
        user: row.get("user")?,
        timestamp,
    })
}

/// Insert one scan and return its id. Runs in an immediate transaction so
/// the write lock is taken up front and the id is committed before return.
pub fn insert_scan(conn: &mut Connection, uid: &str, user: &str, ts: &NaiveDateTime) -> Result<i64> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute(
        "INSERT INTO card_logs (uid, user, timestamp) VALUES (?1, ?2, ?3)",
        params![uid, user, format_timestamp(ts)],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(id)
}

fn collect(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> Result<Vec<ScanEvent>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_recent(conn: &Connection, limit: i64) -> Result<Vec<ScanEvent>> {
    collect(
        conn,
        &format!("{SELECT_COLUMNS} {NEWEST_FIRST} LIMIT ?1"),
        params![limit],
    )
}

/// Escape LIKE wildcards so the term matches literally.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

pub fn search(conn: &Connection, term: &str, limit: i64) -> Result<Vec<ScanEvent>> {
    collect(
        conn,
        &format!(
            "{SELECT_COLUMNS}
             WHERE uid LIKE ?1 ESCAPE '\\' OR user LIKE ?1 ESCAPE '\\'
             {NEWEST_FIRST} LIMIT ?2"
        ),
        params![like_pattern(term), limit],
    )
}

/// Events with `start <= timestamp < end`.
pub fn load_between(
    conn: &Connection,
    start: &NaiveDateTime,
    end: &NaiveDateTime,
    limit: i64,
) -> Result<Vec<ScanEvent>> {
    collect(
        conn,
        &format!(
            "{SELECT_COLUMNS}
             WHERE timestamp >= ?1 AND timestamp < ?2
             {NEWEST_FIRST} LIMIT ?3"
        ),
        params![format_timestamp(start), format_timestamp(end), limit],
    )
}

pub fn count_all(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM card_logs", [], |row| row.get(0))
}

pub fn count_distinct_users(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(DISTINCT user) FROM card_logs", [], |row| {
        row.get(0)
    })
}

pub fn count_between(conn: &Connection, start: &NaiveDateTime, end: &NaiveDateTime) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM card_logs WHERE timestamp >= ?1 AND timestamp < ?2",
        params![format_timestamp(start), format_timestamp(end)],
        |row| row.get(0),
    )
}

/// Delete every row strictly older than `cutoff`, atomically.
pub fn delete_older_than(conn: &mut Connection, cutoff: &NaiveDateTime) -> Result<usize> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let deleted = tx.execute(
        "DELETE FROM card_logs WHERE timestamp < ?1",
        params![format_timestamp(cutoff)],
    )?;
    tx.commit()?;
    Ok(deleted)
}
