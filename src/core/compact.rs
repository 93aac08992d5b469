use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::{AppError, AppResult, StorageContext};
use crate::models::{CompactionReport, IntegrityReport};
use crate::utils::time::now_seconds;
use std::fs;
use std::path::Path;
use tracing::info;

/// Rewrites the store file in place without changing its logical content.
pub struct Compactor<'a> {
    pool: &'a DbPool,
}

impl<'a> Compactor<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// ANALYZE, VACUUM, REINDEX, in that order, with the whole-file gate
    /// held exclusively. `bytes_saved` is negative when the file grew.
    pub fn compact(&self) -> AppResult<CompactionReport> {
        let _guard = self.pool.exclusive();
        let path = self.pool.path();

        let bytes_before = file_size(path)?;

        let conn = self.pool.open()?;
        conn.execute_batch("ANALYZE;").during("analyze")?;
        conn.execute_batch("VACUUM;").during("vacuum")?;
        conn.execute_batch("REINDEX;").during("reindex")?;
        drop(conn);

        let bytes_after = file_size(path)?;
        let bytes_saved = bytes_before as i64 - bytes_after as i64;

        info!(bytes_before, bytes_after, bytes_saved, "store compacted");

        Ok(CompactionReport {
            bytes_before,
            bytes_after,
            bytes_saved,
            compacted_at: now_seconds(),
        })
    }

    pub fn integrity_check(&self) -> AppResult<IntegrityReport> {
        let messages = self
            .pool
            .with_conn(|conn| stats::integrity_check(conn).during("integrity_check"))?;
        let ok = messages.len() == 1 && messages[0] == "ok";
        Ok(IntegrityReport { ok, messages })
    }
}

fn file_size(path: &Path) -> AppResult<u64> {
    fs::metadata(path).map(|m| m.len()).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AppError::NotFound(path.to_path_buf()),
        _ => AppError::Io(e),
    })
}
