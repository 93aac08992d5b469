/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Grey for missing values, plain text otherwise.
pub fn colorize_optional(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => format!("{GREY}--{RESET}"),
    }
}

/// Green for reclaimed space, red when the file grew.
pub fn color_for_delta(value: i64) -> &'static str {
    if value > 0 {
        GREEN
    } else if value < 0 {
        RED
    } else {
        RESET
    }
}
