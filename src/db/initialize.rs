use crate::errors::{AppResult, StorageContext};
use rusqlite::Connection;

/// Schema of the event log. Identical to the layout written by earlier
/// deployments so their files open unchanged.
const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS card_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        uid TEXT NOT NULL,
        user TEXT NOT NULL,
        timestamp DATETIME NOT NULL,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    );

    CREATE INDEX IF NOT EXISTS idx_timestamp ON card_logs(timestamp);
    CREATE INDEX IF NOT EXISTS idx_user ON card_logs(user);
"#;

/// Create the table and indexes if missing. Never drops or rewrites data.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(SCHEMA).during("initialize")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent_and_keeps_rows() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        conn.execute(
            "INSERT INTO card_logs (uid, user, timestamp) VALUES ('A1', 'Alice', '2024-01-15 08:00:00')",
            [],
        )
        .unwrap();

        init_db(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM card_logs", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);

        let indexes: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'card_logs' AND name LIKE 'idx_%' ORDER BY name")
            .unwrap()
            .query_map([], |r| r.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(indexes, vec!["idx_timestamp", "idx_user"]);
    }

    #[test]
    fn created_at_defaults() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        conn.execute(
            "INSERT INTO card_logs (uid, user, timestamp) VALUES ('A1', 'Alice', '2024-01-15 08:00:00')",
            [],
        )
        .unwrap();
        let created: Option<String> = conn
            .query_row("SELECT created_at FROM card_logs", [], |r| r.get(0))
            .unwrap();
        assert!(created.is_some());
    }
}
