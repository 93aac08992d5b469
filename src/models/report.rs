//! Plain result types returned by query and maintenance operations.

use super::BackupRecord;
use crate::utils::time::{serialize_opt_timestamp, serialize_timestamp};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_count: i64,
    pub unique_user_count: i64,
    pub today_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub database: &'static str,
    pub stats: Stats,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseInfo {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub size_mb: f64,
    pub tables: Vec<String>,
    pub row_count: i64,
    #[serde(serialize_with = "serialize_opt_timestamp")]
    pub oldest_timestamp: Option<NaiveDateTime>,
    #[serde(serialize_with = "serialize_opt_timestamp")]
    pub newest_timestamp: Option<NaiveDateTime>,
    pub backup_count: usize,
    pub backups: Vec<BackupRecord>,
    #[serde(serialize_with = "serialize_opt_timestamp")]
    pub last_backup_time: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompactionReport {
    pub bytes_before: u64,
    pub bytes_after: u64,
    /// Negative when the rebuilt indexes take more room than was reclaimed.
    pub bytes_saved: i64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub compacted_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntegrityReport {
    pub ok: bool,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RestoreReport {
    pub restored_from: PathBuf,
    pub safety_backup: BackupRecord,
}

/// Bytes to MiB rounded to two decimals.
pub fn to_mb(bytes: u64) -> f64 {
    (bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0
}
