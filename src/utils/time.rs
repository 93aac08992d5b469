//! Timestamp utilities: the `YYYY-MM-DD HH:MM:SS` wire format, backup name
//! stamps, and parsing of rows written by older deployments.

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use serde::Serializer;
use std::time::SystemTime;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Current local time truncated to whole seconds.
pub fn now_seconds() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp. Accepts optional fractional seconds and either
/// a space or `T` separator; the result is truncated to seconds.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|ts| ts.with_nanosecond(0).unwrap_or(ts))
}

/// `YYYYMMDD_HHMMSS` stamp used in backup file names.
pub fn file_stamp() -> String {
    Local::now().format(FILE_STAMP_FORMAT).to_string()
}

/// Filesystem modification time as local naive time, seconds precision.
pub fn system_time_to_local(t: SystemTime) -> NaiveDateTime {
    let dt: DateTime<Local> = t.into();
    let naive = dt.naive_local();
    naive.with_nanosecond(0).unwrap_or(naive)
}

pub fn serialize_timestamp<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_timestamp(ts))
}

pub fn serialize_opt_timestamp<S: Serializer>(
    ts: &Option<NaiveDateTime>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match ts {
        Some(t) => s.serialize_str(&format_timestamp(t)),
        None => s.serialize_none(),
    }
}
