use crate::utils::time::{self, serialize_timestamp};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A snapshot file in the backup directory. Metadata comes from the
/// filesystem, not from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupRecord {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    #[serde(rename = "modified", serialize_with = "serialize_timestamp")]
    pub modified_at: NaiveDateTime,
}

impl BackupRecord {
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let meta = fs::metadata(path)?;
        Ok(Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            size_bytes: meta.len(),
            modified_at: time::system_time_to_local(meta.modified()?),
        })
    }

    pub fn is_safety_snapshot(&self) -> bool {
        self.name.starts_with("pre_restore_")
    }
}
