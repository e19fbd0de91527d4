//! Normalized ActivityWatch events.
//!
//! An [`Event`] serializes to the ActivityWatch wire format:
//! `{"timestamp": "<RFC 3339>", "duration": <seconds>, "data": {...}}`.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::model::UsageRow;

/// Formats SQLite's `DATETIME()` may produce, plus the ISO `T` separator.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A usage interval ready to be sent to ActivityWatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub timestamp: DateTime<Utc>,

    #[serde(serialize_with = "serialize_seconds")]
    pub duration: Duration,

    pub data: BTreeMap<String, String>,
}

impl Event {
    /// Normalize a raw usage row.
    ///
    /// The duration is the difference of the parsed timestamps, not the
    /// row's raw `usage` column.
    ///
    /// # Errors
    ///
    /// Returns `MalformedTimestamp` if the start or end time is missing or
    /// not a well-formed timestamp.
    pub fn from_row(row: &UsageRow) -> Result<Self> {
        let start = parse_timestamp("start_time", row.start_time.as_deref())?;
        let end = parse_timestamp("end_time", row.end_time.as_deref())?;

        let mut data = BTreeMap::new();
        data.insert("app".to_string(), row.app.clone().unwrap_or_default());
        data.insert("category".to_string(), row.category().to_string());

        Ok(Self {
            timestamp: start,
            duration: end - start,
            data,
        })
    }

    #[must_use]
    pub fn app(&self) -> &str {
        self.data.get("app").map_or("", String::as_str)
    }

    #[must_use]
    pub fn category(&self) -> &str {
        self.data.get("category").map_or("", String::as_str)
    }
}

/// Parse a naive timestamp as UTC.
///
/// Accepts `YYYY-MM-DD HH:MM:SS` (with a space or `T`) and full RFC 3339.
///
/// # Errors
///
/// Returns `MalformedTimestamp` naming `field` on failure.
pub fn parse_timestamp(field: &'static str, value: Option<&str>) -> Result<DateTime<Utc>> {
    let malformed = || Error::MalformedTimestamp {
        field,
        value: value.map(str::to_string),
    };
    let raw = value.map(str::trim).ok_or_else(malformed)?;

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| malformed())
}

#[allow(clippy::cast_precision_loss)]
fn serialize_seconds<S: Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.num_milliseconds() as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Weekday;
    use chrono::TimeZone;

    fn row(start: Option<&str>, end: Option<&str>) -> UsageRow {
        UsageRow {
            app: Some("Safari".into()),
            usage: Some(300.0),
            day_of_week: Some(Weekday::Monday),
            tz_offset_hours: Some(1),
            start_time: start.map(String::from),
            end_time: end.map(String::from),
            created_at: start.map(String::from),
            source: "iPhone14,2".into(),
            device: Some("ABC123".into()),
        }
    }

    #[test]
    fn test_safari_row_maps_to_five_minutes() {
        let event = Event::from_row(&row(Some("2024-01-01T10:00:00"), Some("2024-01-01T10:05:00"))).unwrap();

        assert_eq!(event.timestamp, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
        assert_eq!(event.duration, Duration::seconds(300));
        assert_eq!(event.app(), "Safari");
        assert_eq!(event.category(), "ABC123");
    }

    #[test]
    fn test_sqlite_datetime_format() {
        let event = Event::from_row(&row(Some("2024-03-10 23:59:30"), Some("2024-03-11 00:00:45"))).unwrap();
        assert_eq!(event.duration, Duration::seconds(75));
        assert!(event.duration >= Duration::zero());
    }

    #[test]
    fn test_duration_ignores_raw_usage_column() {
        let mut r = row(Some("2024-01-01 10:00:00"), Some("2024-01-01 10:01:00"));
        r.usage = Some(9999.0);
        let event = Event::from_row(&r).unwrap();
        assert_eq!(event.duration, Duration::seconds(60));
    }

    #[test]
    fn test_timezone_offset_not_applied() {
        let mut r = row(Some("2024-01-01 10:00:00"), Some("2024-01-01 10:01:00"));
        r.tz_offset_hours = Some(-8);
        let event = Event::from_row(&r).unwrap();
        assert_eq!(event.timestamp, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_missing_start_fails() {
        let err = Event::from_row(&row(None, Some("2024-01-01 10:05:00"))).unwrap_err();
        assert!(matches!(err, Error::MalformedTimestamp { field: "start_time", value: None }));
    }

    #[test]
    fn test_garbage_end_fails() {
        let err = Event::from_row(&row(Some("2024-01-01 10:00:00"), Some("not a date"))).unwrap_err();
        match err {
            Error::MalformedTimestamp { field, value } => {
                assert_eq!(field, "end_time");
                assert_eq!(value.as_deref(), Some("not a date"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_app_is_empty_string() {
        let mut r = row(Some("2024-01-01 10:00:00"), Some("2024-01-01 10:00:10"));
        r.app = None;
        let event = Event::from_row(&r).unwrap();
        assert_eq!(event.app(), "");
    }

    #[test]
    fn test_wire_format() {
        let event = Event::from_row(&row(Some("2024-01-01 10:00:00"), Some("2024-01-01 10:00:01"))).unwrap();
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["timestamp"], "2024-01-01T10:00:00Z");
        assert_eq!(json["duration"], 1.0);
        assert_eq!(json["data"]["app"], "Safari");
        assert_eq!(json["data"]["category"], "ABC123");
    }
}
