//! Terminal output helpers shared by the CLI commands.

use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use serde::Serialize;
use std::fmt;

const BOLD: &str = "\x1b[1m";

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", CYAN, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", YELLOW, BOLD, ICON_WARN, RESET, msg);
}

/// Labelled value line: `• Label: value`.
pub fn field<T: fmt::Display>(label: &str, value: T) {
    println!("{}• {}:{} {}", CYAN, label, RESET, value);
}

/// Pretty-printed JSON on stdout.
pub fn json<T: Serialize>(value: &T) -> AppResult<()> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Io(std::io::Error::other(e)))?;
    println!("{out}");
    Ok(())
}
