//! Path utilities: expand `~`, build sibling temp paths.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Hidden temp path next to `target`: `.<file_name>.<suffix>`.
/// Never ends in `.db`, so catalog listings skip it.
pub fn sibling_temp(target: &Path, suffix: &str) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "rfidlog".to_string());
    target.with_file_name(format!(".{name}.{suffix}"))
}

/// True when `name` ends with `.db`.
pub fn has_db_extension(path: &Path) -> bool {
    path.extension().map(|e| e == "db").unwrap_or(false)
}
