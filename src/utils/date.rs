//! Calendar-day helpers used by date-bucketed queries.

use chrono::{Duration, NaiveDate, NaiveDateTime};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a strict `YYYY-MM-DD` string naming a real calendar day.
///
/// Shorter forms such as `2024-1-5` are rejected: they would never match the
/// zero-padded timestamps stored in `card_logs`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Half-open `[start, end)` timestamp bounds covering one calendar day.
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    (start, start + Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_canonical_dates() {
        assert_eq!(
            parse_date("2024-01-15"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert!(parse_date("2024-02-29").is_some());
    }

    #[test]
    fn rejects_malformed_dates() {
        for bad in ["2024-13-40", "2023-02-29", "2024-1-5", "20240115", "", "2024/01/15", "abcd-ef-gh"] {
            assert!(parse_date(bad).is_none(), "{bad} should be rejected");
        }
    }

    #[test]
    fn day_bounds_span_one_day() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let (start, end) = day_bounds(d);
        assert_eq!(start.to_string(), "2024-12-31 00:00:00");
        assert_eq!(end.to_string(), "2025-01-01 00:00:00");
    }
}
