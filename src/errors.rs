//! Unified application error type.
//! Every layer (db, core, cli) returns AppError so callers can tell the
//! failure kinds apart and map them to exit codes or status codes.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coarse classification used by transports to map errors to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    StorageFailure,
    BackupFailure,
    Config,
    Io,
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Validation
    // ---------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Storage failure during {op}: {source}")]
    Storage {
        op: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    // ---------------------------
    // Backup / restore
    // ---------------------------
    #[error("Backup failure during {step} ({}): {source}", .path.display())]
    Backup {
        step: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Backup failure: {0}")]
    BackupRejected(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidInput(_) => ErrorKind::InvalidInput,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Storage { .. } => ErrorKind::StorageFailure,
            AppError::Backup { .. } | AppError::BackupRejected(_) => ErrorKind::BackupFailure,
            AppError::Config(_) | AppError::ConfigLoad(_) => ErrorKind::Config,
            AppError::Io(_) => ErrorKind::Io,
        }
    }

    pub fn invalid<T: Into<String>>(msg: T) -> Self {
        AppError::InvalidInput(msg.into())
    }

    pub fn backup(step: &'static str, path: &Path, source: io::Error) -> Self {
        AppError::Backup {
            step,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Attach the name of the failing operation to a rusqlite error.
pub trait StorageContext<T> {
    fn during(self, op: &'static str) -> AppResult<T>;
}

impl<T> StorageContext<T> for Result<T, rusqlite::Error> {
    fn during(self, op: &'static str) -> AppResult<T> {
        self.map_err(|source| AppError::Storage { op, source })
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinguishable() {
        assert_eq!(AppError::invalid("x").kind(), ErrorKind::InvalidInput);
        assert_eq!(
            AppError::NotFound(PathBuf::from("a.db")).kind(),
            ErrorKind::NotFound
        );
        let storage: AppResult<()> = Err(rusqlite::Error::InvalidQuery).during("append");
        assert_eq!(storage.unwrap_err().kind(), ErrorKind::StorageFailure);
        let backup = AppError::backup("copy", Path::new("b.db"), io::Error::other("disk full"));
        assert_eq!(backup.kind(), ErrorKind::BackupFailure);
    }

    #[test]
    fn storage_error_names_the_operation() {
        let err = Err::<(), _>(rusqlite::Error::InvalidQuery)
            .during("prune_older_than")
            .unwrap_err();
        assert!(err.to_string().contains("prune_older_than"));
    }
}
