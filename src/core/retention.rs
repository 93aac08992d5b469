use crate::db::pool::DbPool;
use crate::db::queries::delete_older_than;
use crate::errors::{AppError, AppResult, StorageContext};
use crate::utils::time::now_seconds;
use chrono::Duration;
use tracing::info;

/// Age-based deletion of event rows. Never touches backups.
pub struct RetentionManager<'a> {
    pool: &'a DbPool,
    default_days: i64,
}

impl<'a> RetentionManager<'a> {
    pub fn new(pool: &'a DbPool, default_days: i64) -> Self {
        Self { pool, default_days }
    }

    /// Delete rows strictly older than `now - days_to_keep` in one
    /// transaction and return how many went.
    pub fn prune_older_than(&self, days_to_keep: i64) -> AppResult<usize> {
        if days_to_keep < 1 {
            return Err(AppError::invalid(format!(
                "days to keep must be at least 1 (got {days_to_keep})"
            )));
        }
        // Nothing can predate a cutoff below the calendar's minimum.
        let Some(cutoff) =
            Duration::try_days(days_to_keep).and_then(|w| now_seconds().checked_sub_signed(w))
        else {
            return Ok(0);
        };

        let deleted = self
            .pool
            .with_conn(|conn| delete_older_than(conn, &cutoff).during("prune_older_than"))?;

        info!(days_to_keep, %cutoff, deleted, "old scans pruned");
        Ok(deleted)
    }

    pub fn prune_default(&self) -> AppResult<usize> {
        self.prune_older_than(self.default_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::time::Duration as StdDuration;
    use tempfile::TempDir;

    #[test]
    fn zero_days_is_invalid() {
        let dir = TempDir::new().unwrap();
        let pool = DbPool::new(dir.path().join("x.db"), StdDuration::from_secs(1));
        let r = RetentionManager::new(&pool, 90);
        assert_eq!(r.prune_older_than(0).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(r.prune_older_than(-3).unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn huge_window_deletes_nothing() {
        let dir = TempDir::new().unwrap();
        let pool = DbPool::new(dir.path().join("x.db"), StdDuration::from_secs(1));
        crate::db::initialize::init_db(&pool.create().unwrap()).unwrap();
        let r = RetentionManager::new(&pool, 90);
        assert_eq!(r.prune_older_than(1_000_000_000).unwrap(), 0);
    }

    #[test]
    fn window_beyond_duration_range_deletes_nothing() {
        let dir = TempDir::new().unwrap();
        // No store file: the answer comes before any storage access.
        let pool = DbPool::new(dir.path().join("x.db"), StdDuration::from_secs(1));
        let r = RetentionManager::new(&pool, 90);
        assert_eq!(r.prune_older_than(i64::MAX).unwrap(), 0);
        assert_eq!(r.prune_older_than(i64::MAX / 86_400 + 1).unwrap(), 0);
    }
}
