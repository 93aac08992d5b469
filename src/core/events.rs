use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries::insert_scan;
use crate::errors::{AppError, AppResult, StorageContext};
use crate::models::ScanEvent;
use crate::models::scan_event::user_or_default;
use crate::utils::time::now_seconds;
use tracing::{debug, info};

/// The only write path into `card_logs`.
pub struct EventStore<'a> {
    pool: &'a DbPool,
}

impl<'a> EventStore<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Ensure table and indexes exist. Safe on every start.
    pub fn initialize(&self) -> AppResult<()> {
        let _guard = self.pool.shared();
        let conn = self.pool.create()?;
        init_db(&conn)?;
        debug!(path = %self.pool.path().display(), "store initialized");
        Ok(())
    }

    /// Record a scan. The store assigns `id` and `timestamp`; the row is
    /// committed before this returns.
    pub fn append(&self, uid: &str, user: Option<&str>) -> AppResult<ScanEvent> {
        let uid = uid.trim();
        if uid.is_empty() {
            return Err(AppError::invalid("uid must not be empty"));
        }
        let user = user_or_default(user);
        let timestamp = now_seconds();

        let id = self
            .pool
            .with_conn(|conn| insert_scan(conn, uid, &user, &timestamp).during("append"))?;

        info!(id, uid, user = %user, "scan recorded");

        Ok(ScanEvent {
            id,
            uid: uid.to_string(),
            user,
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::time::Duration;
    use tempfile::TempDir;

    fn pool(dir: &TempDir) -> DbPool {
        DbPool::new(dir.path().join("rfid_logs.db"), Duration::from_secs(5))
    }

    #[test]
    fn empty_uid_is_rejected_before_storage() {
        let dir = TempDir::new().unwrap();
        let pool = pool(&dir);
        // No initialize: a storage access would report NotFound instead.
        let err = EventStore::new(&pool).append("   ", Some("Alice")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(!pool.exists());
    }

    #[test]
    fn append_assigns_increasing_ids() {
        let dir = TempDir::new().unwrap();
        let pool = pool(&dir);
        let store = EventStore::new(&pool);
        store.initialize().unwrap();

        let a = store.append("A1", Some("Alice")).unwrap();
        let b = store.append("B2", None).unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(b.user, "Unknown");
        assert!(b.timestamp >= a.timestamp);
    }

    #[test]
    fn append_without_store_is_not_found() {
        let dir = TempDir::new().unwrap();
        let pool = pool(&dir);
        let err = EventStore::new(&pool).append("A1", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
