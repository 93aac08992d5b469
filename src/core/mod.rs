//! The log storage and retention engine.
//!
//! `LogStore` is built once at process start and handed to whatever serves
//! requests. It owns the connection factory and lends out the five
//! components, each a thin borrow of the same store.

pub mod backup;
pub mod compact;
pub mod events;
pub mod query;
pub mod retention;

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use std::path::Path;
use std::time::Duration;

pub use backup::BackupManager;
pub use compact::Compactor;
pub use events::EventStore;
pub use query::QueryEngine;
pub use retention::RetentionManager;

pub struct LogStore {
    pool: DbPool,
    cfg: Config,
}

impl LogStore {
    /// Build the handle without touching the filesystem.
    pub fn new(cfg: Config) -> Self {
        let pool = DbPool::new(
            cfg.store_path(),
            Duration::from_millis(cfg.busy_timeout_ms),
        );
        Self { pool, cfg }
    }

    /// Build the handle and make sure the schema exists.
    pub fn open(cfg: Config) -> AppResult<Self> {
        let store = Self::new(cfg);
        store.events().initialize()?;
        Ok(store)
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn path(&self) -> &Path {
        self.pool.path()
    }

    pub fn events(&self) -> EventStore<'_> {
        EventStore::new(&self.pool)
    }

    pub fn queries(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.pool, self.cfg.max_query_limit)
    }

    pub fn retention(&self) -> RetentionManager<'_> {
        RetentionManager::new(&self.pool, self.cfg.log_retention_days)
    }

    pub fn backups(&self) -> BackupManager<'_> {
        BackupManager::new(&self.pool, &self.cfg)
    }

    pub fn compactor(&self) -> Compactor<'_> {
        Compactor::new(&self.pool)
    }
}
