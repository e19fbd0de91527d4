//! Raw `/app/usage` rows as read from knowledgeC.db.

use serde::{Deserialize, Serialize};

/// Day of the week, decoded from `ZSTARTDAYOFWEEK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Decode the Core Data day-of-week code (1 = Sunday .. 7 = Saturday).
    ///
    /// Any code outside 1..=7 yields `None`.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Sunday),
            2 => Some(Self::Monday),
            3 => Some(Self::Tuesday),
            4 => Some(Self::Wednesday),
            5 => Some(Self::Thursday),
            6 => Some(Self::Friday),
            7 => Some(Self::Saturday),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One usage interval, before normalization.
///
/// Timestamps are already shifted from the Core Data epoch and formatted by
/// SQLite as `YYYY-MM-DD HH:MM:SS`. The timezone offset is informational and
/// is not applied to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRow {
    /// Bundle identifier of the application
    pub app: Option<String>,

    /// `ZENDDATE - ZSTARTDATE` in seconds
    pub usage: Option<f64>,

    pub day_of_week: Option<Weekday>,

    /// `ZSECONDSFROMGMT / 3600`
    pub tz_offset_hours: Option<i64>,

    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub created_at: Option<String>,

    /// Peer model name, or `"Other"`
    pub source: String,

    /// Resolved source device id, `None` for local rows
    pub device: Option<String>,
}

impl UsageRow {
    /// Category label attached to the normalized event.
    ///
    /// This is the row's last column, the device id. Local rows have none and
    /// fall back to the source label.
    #[must_use]
    pub fn category(&self) -> &str {
        self.device.as_deref().unwrap_or(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_total_over_valid_codes() {
        let names: Vec<&str> = (1..=7)
            .map(|code| Weekday::from_code(code).unwrap().as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]
        );
    }

    #[test]
    fn test_weekday_out_of_range_is_none() {
        for code in [0, 8, -1, 42, i64::MAX, i64::MIN] {
            assert_eq!(Weekday::from_code(code), None, "code {code}");
        }
    }

    #[test]
    fn test_category_prefers_device() {
        let mut row = UsageRow {
            app: Some("com.apple.Safari".into()),
            usage: Some(300.0),
            day_of_week: Some(Weekday::Monday),
            tz_offset_hours: Some(0),
            start_time: Some("2024-01-01 10:00:00".into()),
            end_time: Some("2024-01-01 10:05:00".into()),
            created_at: None,
            source: "iPhone14,2".into(),
            device: Some("ABC123".into()),
        };
        assert_eq!(row.category(), "ABC123");

        row.device = None;
        assert_eq!(row.category(), "iPhone14,2");
    }
}
