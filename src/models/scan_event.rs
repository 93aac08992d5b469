use crate::utils::time::{self, serialize_timestamp};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Display name stored when the caller does not provide one.
pub const DEFAULT_USER: &str = "Unknown";

/// One committed card presentation. Rows are never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEvent {
    pub id: i64,                  // ⇔ card_logs.id (AUTOINCREMENT)
    #[serde(rename = "time", serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime, // ⇔ card_logs.timestamp ("YYYY-MM-DD HH:MM:SS")
    pub uid: String,              // ⇔ card_logs.uid
    pub user: String,             // ⇔ card_logs.user
}

impl ScanEvent {
    pub fn time_str(&self) -> String {
        time::format_timestamp(&self.timestamp)
    }
}

/// Resolve the display name for a new scan.
pub fn user_or_default(user: Option<&str>) -> String {
    match user.map(str::trim) {
        Some(u) if !u.is_empty() => u.to_string(),
        _ => DEFAULT_USER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn serializes_with_wire_field_names() {
        let ev = ScanEvent {
            id: 7,
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(9, 5, 3)
                .unwrap(),
            uid: "A1".into(),
            user: "Alice".into(),
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["time"], "2024-01-15 09:05:03");
        assert_eq!(json["uid"], "A1");
        assert_eq!(json["user"], "Alice");
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn blank_user_becomes_unknown() {
        assert_eq!(user_or_default(None), "Unknown");
        assert_eq!(user_or_default(Some("  ")), "Unknown");
        assert_eq!(user_or_default(Some("Bob")), "Bob");
    }
}
