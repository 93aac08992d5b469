#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Duration, Local, NaiveDateTime, Timelike};
use rfidlog::LogStore;
use rfidlog::config::Config;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// CLI command isolated from the user's config file and deployment env.
pub fn rfid(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("rfidlog");
    cmd.env("RFIDLOG_CONFIG", dir.join("no-such-config.conf"))
        .env_remove("DATABASE_PATH")
        .env_remove("DATABASE_BACKUP_ENABLED")
        .env_remove("DATABASE_BACKUP_INTERVAL")
        .env_remove("DATABASE_CLEANUP_DAYS")
        .env_remove("RUST_LOG");
    cmd
}

pub fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("rfid_logs.db")
}

/// Fresh, initialized store inside `dir`.
pub fn open_store(dir: &TempDir) -> LogStore {
    LogStore::open(Config::for_database(db_path(dir))).expect("open store")
}

pub fn open_store_with(cfg: Config) -> LogStore {
    LogStore::open(cfg).expect("open store")
}

/// Insert a row with an explicit timestamp, bypassing the store clock.
pub fn insert_at(store: &LogStore, uid: &str, user: &str, ts: &str) -> i64 {
    let conn = rusqlite::Connection::open(store.path()).expect("open db");
    conn.execute(
        "INSERT INTO card_logs (uid, user, timestamp) VALUES (?1, ?2, ?3)",
        rusqlite::params![uid, user, ts],
    )
    .expect("insert");
    conn.last_insert_rowid()
}

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("timestamp")
}

/// `now - days` formatted the way the store writes timestamps.
pub fn days_ago(days: i64) -> String {
    let now = Local::now().naive_local();
    let now = now.with_nanosecond(0).unwrap_or(now);
    (now - Duration::days(days))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
