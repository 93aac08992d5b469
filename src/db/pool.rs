//! SQLite connection factory plus the whole-file gate.
//!
//! Every operation opens its own connection, so threads never share a
//! `Connection`. The gate is a read/write lock: ordinary reads and writes
//! hold it shared (SQLite does its own locking between them), while
//! operations that replace or rewrite the whole file hold it exclusively.

use crate::errors::{AppError, AppResult, StorageContext};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct DbPool {
    path: PathBuf,
    busy_timeout: Duration,
    gate: RwLock<()>,
}

impl DbPool {
    pub fn new<P: Into<PathBuf>>(path: P, busy_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            busy_timeout,
            gate: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Open the store, creating the file (and its directory) if missing.
    pub fn create(&self) -> AppResult<Connection> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&self.path).during("open")?;
        conn.busy_timeout(self.busy_timeout).during("open")?;
        Ok(conn)
    }

    /// Open an existing store. A missing file is `NotFound`, never created.
    pub fn open(&self) -> AppResult<Connection> {
        if !self.exists() {
            return Err(AppError::NotFound(self.path.clone()));
        }
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&self.path, flags).during("open")?;
        conn.busy_timeout(self.busy_timeout).during("open")?;
        Ok(conn)
    }

    /// Helper to execute a closure with a fresh connection while holding the
    /// gate shared.
    pub fn with_conn<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        let _guard = self.shared();
        let mut conn = self.open()?;
        func(&mut conn)
    }

    pub fn shared(&self) -> RwLockReadGuard<'_, ()> {
        self.gate.read()
    }

    pub fn exclusive(&self) -> RwLockWriteGuard<'_, ()> {
        self.gate.write()
    }
}
