use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Name of the backup directory created next to the store file.
pub const BACKUP_DIR_NAME: &str = "database_backups";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Explicit backup directory; `None` means `<store dir>/database_backups`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<String>,
    #[serde(default = "default_log_retention")]
    pub log_retention_days: i64,
    #[serde(default = "default_backup_retention")]
    pub backup_retention_days: i64,
    #[serde(default = "default_max_limit")]
    pub max_query_limit: i64,
    #[serde(default = "default_limit")]
    pub default_query_limit: i64,
    #[serde(default = "default_true")]
    pub backup_enabled: bool,
    #[serde(default = "default_backup_interval")]
    pub backup_interval_hours: i64,
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_log_retention() -> i64 {
    90
}
fn default_backup_retention() -> i64 {
    30
}
fn default_max_limit() -> i64 {
    1000
}
fn default_limit() -> i64 {
    50
}
fn default_true() -> bool {
    true
}
fn default_backup_interval() -> i64 {
    24
}
fn default_busy_timeout() -> u64 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            backup_dir: None,
            log_retention_days: default_log_retention(),
            backup_retention_days: default_backup_retention(),
            max_query_limit: default_max_limit(),
            default_query_limit: default_limit(),
            backup_enabled: default_true(),
            backup_interval_hours: default_backup_interval(),
            busy_timeout_ms: default_busy_timeout(),
        }
    }
}

impl Config {
    /// Configuration for a store at `path` with every other field defaulted.
    pub fn for_database<P: AsRef<Path>>(path: P) -> Self {
        Self {
            database: path.as_ref().to_string_lossy().to_string(),
            ..Self::default()
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rfidlog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rfidlog")
        }
    }

    /// Full path of the config file. `RFIDLOG_CONFIG` overrides it.
    pub fn config_file() -> PathBuf {
        match env::var("RFIDLOG_CONFIG") {
            Ok(p) if !p.trim().is_empty() => expand_tilde(&p),
            _ => Self::config_dir().join("rfidlog.conf"),
        }
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rfid_logs.db")
    }

    /// Load the config file (defaults when missing), then apply environment
    /// overrides and validate.
    pub fn load() -> AppResult<Self> {
        let mut cfg = Self::load_from(&Self::config_file())?;
        cfg.apply_overrides(|key| env::var(key).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {}", path.display(), e)))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {}", path.display(), e)))
    }

    /// Apply the deployment environment variables on top of the file values.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(db) = lookup("DATABASE_PATH").filter(|v| !v.trim().is_empty()) {
            self.database = db;
        }
        if let Some(v) = lookup("DATABASE_BACKUP_ENABLED") {
            self.backup_enabled = v.trim().eq_ignore_ascii_case("true");
        }
        if let Some(v) = lookup("DATABASE_BACKUP_INTERVAL") {
            self.backup_interval_hours = parse_override("DATABASE_BACKUP_INTERVAL", &v)?;
        }
        if let Some(v) = lookup("DATABASE_CLEANUP_DAYS") {
            self.log_retention_days = parse_override("DATABASE_CLEANUP_DAYS", &v)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.database.trim().is_empty() {
            return Err(AppError::Config("database path is empty".into()));
        }
        let positive = [
            ("log_retention_days", self.log_retention_days),
            ("backup_retention_days", self.backup_retention_days),
            ("max_query_limit", self.max_query_limit),
            ("default_query_limit", self.default_query_limit),
            ("backup_interval_hours", self.backup_interval_hours),
        ];
        for (name, value) in positive {
            if value < 1 {
                return Err(AppError::Config(format!(
                    "{name} must be at least 1 (got {value})"
                )));
            }
        }
        Ok(())
    }

    /// Resolved store file path.
    pub fn store_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    /// Resolved backup directory path.
    pub fn backup_path(&self) -> PathBuf {
        match &self.backup_dir {
            Some(dir) => expand_tilde(dir),
            None => self
                .store_path()
                .parent()
                .map(|p| p.join(BACKUP_DIR_NAME))
                .unwrap_or_else(|| PathBuf::from(BACKUP_DIR_NAME)),
        }
    }

    /// Write the config file unless it already exists.
    pub fn init_file(&self, is_test: bool) -> AppResult<Option<PathBuf>> {
        if is_test {
            return Ok(None);
        }
        let path = Self::config_file();
        if path.exists() {
            return Ok(None);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))?;
        let mut file = fs::File::create(&path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(Some(path))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }
}

fn parse_override(key: &str, value: &str) -> AppResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::Config(format!("{key} must be an integer (got '{value}')")))
}

/// Check a config file for fields that fall back to defaults.
pub fn missing_fields(path: &Path) -> io::Result<Vec<&'static str>> {
    const FIELDS: [&str; 8] = [
        "database",
        "log_retention_days",
        "backup_retention_days",
        "max_query_limit",
        "default_query_limit",
        "backup_enabled",
        "backup_interval_hours",
        "busy_timeout_ms",
    ];

    let content = fs::read_to_string(path)?;
    let value: serde_yaml::Value = serde_yaml::from_str(&content).map_err(io::Error::other)?;
    let Some(map) = value.as_mapping() else {
        return Ok(FIELDS.to_vec());
    };

    Ok(FIELDS
        .into_iter()
        .filter(|f| !map.contains_key(serde_yaml::Value::String((*f).to_string())))
        .collect())
}
