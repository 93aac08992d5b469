//! Store introspection: table names, row count, timestamp range.

use crate::utils::time::parse_timestamp;
use chrono::NaiveDateTime;
use rusqlite::{Connection, Result};

pub fn table_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn has_log_table(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'card_logs'")?;
    stmt.exists([])
}

/// Oldest and newest stored timestamps; `None` for an empty log.
pub fn timestamp_range(conn: &Connection) -> Result<(Option<NaiveDateTime>, Option<NaiveDateTime>)> {
    let (min, max): (Option<String>, Option<String>) = conn.query_row(
        "SELECT MIN(timestamp), MAX(timestamp) FROM card_logs",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok((
        min.as_deref().and_then(parse_timestamp),
        max.as_deref().and_then(parse_timestamp),
    ))
}

/// `PRAGMA integrity_check` output lines; a single `ok` means healthy.
pub fn integrity_check(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA integrity_check")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    #[test]
    fn empty_log_has_no_range() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        assert_eq!(timestamp_range(&conn).unwrap(), (None, None));
        assert!(has_log_table(&conn).unwrap());
        assert!(table_names(&conn).unwrap().contains(&"card_logs".to_string()));
        assert_eq!(integrity_check(&conn).unwrap(), vec!["ok"]);
    }

    #[test]
    fn range_spans_rows() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO card_logs (uid, user, timestamp) VALUES ('A', 'a', '2024-03-01 10:00:00');
             INSERT INTO card_logs (uid, user, timestamp) VALUES ('B', 'b', '2023-12-31 23:59:59');",
        )
        .unwrap();
        let (oldest, newest) = timestamp_range(&conn).unwrap();
        assert_eq!(oldest.unwrap().to_string(), "2023-12-31 23:59:59");
        assert_eq!(newest.unwrap().to_string(), "2024-03-01 10:00:00");
    }

    #[test]
    fn foreign_file_has_no_log_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE other (x INTEGER);").unwrap();
        assert!(!has_log_table(&conn).unwrap());
    }
}
