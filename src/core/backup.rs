//! File-level snapshots of the store: create, restore, list, inspect, prune.

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::{AppError, AppResult, StorageContext};
use crate::models::report::to_mb;
use crate::models::{BackupRecord, DatabaseInfo, RestoreReport};
use crate::utils::path::{has_db_extension, sibling_temp};
use crate::utils::time::{file_stamp, now_seconds};
use rusqlite::{Connection, OpenFlags};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

pub struct BackupManager<'a> {
    pool: &'a DbPool,
    dir: PathBuf,
    retention_days: i64,
    enabled: bool,
    interval_hours: i64,
}

impl<'a> BackupManager<'a> {
    pub fn new(pool: &'a DbPool, cfg: &Config) -> Self {
        Self {
            pool,
            dir: cfg.backup_path(),
            retention_days: cfg.backup_retention_days,
            enabled: cfg.backup_enabled,
            interval_hours: cfg.backup_interval_hours,
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.dir
    }

    /// Snapshot the live store into the backup directory.
    ///
    /// `name` defaults to `rfid_logs_backup_<YYYYMMDD_HHMMSS>.db`, with a
    /// `_N` suffix when that name is already taken. A caller-supplied name
    /// that already exists is a `BackupFailure`; existing backups are never
    /// replaced.
    pub fn create_backup(&self, name: Option<&str>) -> AppResult<BackupRecord> {
        let (file_name, naming) = match name {
            Some(n) => (validate_name(n)?, Naming::Exact),
            None => (format!("rfid_logs_backup_{}.db", file_stamp()), Naming::Unique),
        };
        let _guard = self.pool.shared();
        self.snapshot(&file_name, naming)
    }

    /// Copy the store into the backup directory. Callers hold the gate.
    ///
    /// A read transaction keeps a SHARED lock on the store for the whole
    /// copy, so no writer can modify pages mid-copy. The bytes land in a
    /// hidden temp file that is synced and then hard-linked under its final
    /// name; the link fails rather than replace an existing file.
    fn snapshot(&self, file_name: &str, naming: Naming) -> AppResult<BackupRecord> {
        let store = self.pool.path();
        if !self.pool.exists() {
            return Err(AppError::NotFound(store.to_path_buf()));
        }

        fs::create_dir_all(&self.dir).map_err(|e| AppError::backup("create_dir", &self.dir, e))?;

        let tmp = sibling_temp(
            &self.dir.join(file_name),
            &format!("{}.{}.tmp", process::id(), TEMP_SEQ.fetch_add(1, Ordering::Relaxed)),
        );

        let mut conn = self.pool.open()?;
        let tx = conn.transaction().during("backup")?;
        tx.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))
            .during("backup")?;

        copy_synced(store, &tmp)?;
        drop(tx);

        let published = self.publish(&tmp, file_name, naming);
        if let Err(e) = fs::remove_file(&tmp) {
            warn!(path = %tmp.display(), error = %e, "temp file left behind");
        }
        let dest = published?;

        let record = BackupRecord::from_path(&dest).map_err(|e| AppError::backup("stat", &dest, e))?;
        info!(path = %record.path.display(), size = record.size_bytes, "backup created");
        Ok(record)
    }

    /// Replace the live store with `path`.
    ///
    /// A `pre_restore_<ts>.db` snapshot of the current store is taken first;
    /// if that fails nothing else happens. Restore is a full replace: rows
    /// written after the backup was taken are gone afterwards.
    pub fn restore_backup(&self, path: &Path) -> AppResult<RestoreReport> {
        let source = self.resolve(path)?;
        check_is_log_store(&source)?;

        let _guard = self.pool.exclusive();

        let safety_name = format!("pre_restore_{}.db", file_stamp());
        let safety_backup = self.snapshot(&safety_name, Naming::Unique).map_err(|e| {
            warn!(error = %e, source = %source.display(), "restore aborted: safety snapshot failed");
            e
        })?;

        let store = self.pool.path();
        let tmp = sibling_temp(store, "restore.tmp");
        copy_synced(&source, &tmp)?;
        fs::rename(&tmp, store).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            AppError::backup("replace", store, e)
        })?;

        info!(
            source = %source.display(),
            safety = %safety_backup.path.display(),
            "store restored"
        );

        Ok(RestoreReport {
            restored_from: source,
            safety_backup,
        })
    }

    /// Give `tmp` a name in the backup directory that nothing holds yet.
    fn publish(&self, tmp: &Path, file_name: &str, naming: Naming) -> AppResult<PathBuf> {
        let stem = file_name.strip_suffix(".db").unwrap_or(file_name);
        for n in 0..MAX_NAME_SUFFIX {
            let candidate = match n {
                0 => file_name.to_string(),
                _ => format!("{stem}_{n}.db"),
            };
            let dest = self.dir.join(&candidate);
            match fs::hard_link(tmp, &dest) {
                Ok(()) => return Ok(dest),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists && naming == Naming::Unique => {
                    debug!(name = %candidate, "backup name taken");
                }
                Err(e) => return Err(AppError::backup("link", &dest, e)),
            }
        }
        Err(AppError::backup(
            "link",
            &self.dir.join(file_name),
            io::Error::new(io::ErrorKind::AlreadyExists, "no free backup name"),
        ))
    }

    /// A path as given, or a bare name inside the backup directory.
    fn resolve(&self, path: &Path) -> AppResult<PathBuf> {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        if path.is_relative() {
            let in_dir = self.dir.join(path);
            if in_dir.is_file() {
                return Ok(in_dir);
            }
        }
        Err(AppError::NotFound(path.to_path_buf()))
    }

    /// `*.db` files in the backup directory, newest first. The live store
    /// is left out when it sits in the same directory.
    pub fn list_backups(&self) -> AppResult<Vec<BackupRecord>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let live = canonical(self.pool.path());
        let entries = fs::read_dir(&self.dir).map_err(|e| AppError::backup("list", &self.dir, e))?;
        let mut out = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AppError::backup("list", &self.dir, e))?;
            let path = entry.path();
            if !path.is_file() || !has_db_extension(&path) || canonical(&path) == live {
                continue;
            }
            match BackupRecord::from_path(&path) {
                Ok(record) => out.push(record),
                // Removed between listing and stat.
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(AppError::backup("stat", &path, e)),
            }
        }

        out.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| b.name.cmp(&a.name))
        });
        Ok(out)
    }

    /// Store file facts plus the backup catalog.
    pub fn info(&self) -> AppResult<DatabaseInfo> {
        let store = self.pool.path();
        let (tables, row_count, (oldest, newest)) = self.pool.with_conn(|conn| {
            Ok((
                stats::table_names(conn).during("info")?,
                crate::db::queries::count_all(conn).during("info")?,
                stats::timestamp_range(conn).during("info")?,
            ))
        })?;
        let size_bytes = fs::metadata(store)
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => AppError::NotFound(store.to_path_buf()),
                _ => AppError::Io(e),
            })?
            .len();

        let backups = self.list_backups()?;
        let last_backup_time = backups.iter().map(|b| b.modified_at).max();

        Ok(DatabaseInfo {
            path: store.to_path_buf(),
            size_bytes,
            size_mb: to_mb(size_bytes),
            tables,
            row_count,
            oldest_timestamp: oldest,
            newest_timestamp: newest,
            backup_count: backups.len(),
            backups,
            last_backup_time,
        })
    }

    /// Delete backup files last modified more than `days_to_keep` days ago.
    /// The live store is never removed, even if it sits in the directory.
    pub fn prune(&self, days_to_keep: i64) -> AppResult<usize> {
        if days_to_keep < 1 {
            return Err(AppError::invalid(format!(
                "days to keep must be at least 1 (got {days_to_keep})"
            )));
        }
        let window = Duration::from_secs((days_to_keep as u64).saturating_mul(86_400));
        let Some(cutoff) = SystemTime::now().checked_sub(window) else {
            return Ok(0);
        };

        let _guard = self.pool.shared();
        let mut deleted = 0;

        for record in self.list_backups()? {
            let modified = match fs::metadata(&record.path).and_then(|m| m.modified()) {
                Ok(t) => t,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(AppError::backup("stat", &record.path, e)),
            };
            if modified >= cutoff {
                continue;
            }
            match fs::remove_file(&record.path) {
                Ok(()) => {
                    deleted += 1;
                    debug!(name = %record.name, "old backup deleted");
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(AppError::backup("remove", &record.path, e)),
            }
        }

        info!(days_to_keep, deleted, "old backups pruned");
        Ok(deleted)
    }

    pub fn prune_default(&self) -> AppResult<usize> {
        self.prune(self.retention_days)
    }

    /// Whether an automatic backup should run now: enabled, and no backup
    /// younger than the configured interval exists.
    pub fn is_backup_due(&self) -> AppResult<bool> {
        if !self.enabled {
            return Ok(false);
        }
        let interval =
            chrono::Duration::try_hours(self.interval_hours).unwrap_or(chrono::Duration::MAX);
        let newest = self.list_backups()?.into_iter().next();
        Ok(match newest {
            None => true,
            Some(b) => now_seconds() - b.modified_at >= interval,
        })
    }
}

const MAX_NAME_SUFFIX: u32 = 1000;

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// How a snapshot reacts to its file name being taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Naming {
    /// Fail with `BackupFailure`.
    Exact,
    /// Try `<stem>_1.db`, `<stem>_2.db`, ...
    Unique,
}

/// Plain file name ending in `.db`; no directories, no hidden names.
fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::invalid("backup name must not be empty"));
    }
    if name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(AppError::invalid(format!(
            "backup name must be a plain file name (got '{name}')"
        )));
    }
    if name.ends_with(".db") {
        Ok(name.to_string())
    } else {
        Ok(format!("{name}.db"))
    }
}

/// Copy `src` to `dest` and fsync it. On failure `dest` is removed.
fn copy_synced(src: &Path, dest: &Path) -> AppResult<()> {
    let result = fs::copy(src, dest).and_then(|_| fs::File::open(dest)?.sync_all());
    result.map_err(|e| {
        let _ = fs::remove_file(dest);
        AppError::backup("copy", src, e)
    })
}

/// Refuse to restore from anything that is not a readable log store.
fn check_is_log_store(path: &Path) -> AppResult<()> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|e| AppError::BackupRejected(format!("{}: {}", path.display(), e)))?;
    match stats::has_log_table(&conn) {
        Ok(true) => Ok(()),
        Ok(false) => Err(AppError::BackupRejected(format!(
            "{} has no card_logs table",
            path.display()
        ))),
        Err(e) => Err(AppError::BackupRejected(format!("{}: {}", path.display(), e))),
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
