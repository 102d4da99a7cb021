use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::Timestamp;

/// Describes how a raw observation source lays out its records
///
/// Feeds look up the timestamp in `index_field` and the observed value in
/// `value_field`, parsing the timestamp with `timestamp_format`
/// (a `chrono` strftime pattern).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesFormat {
    /// strftime pattern, either date-time (`%Y-%m-%d %H:%M:%S`) or date-only (`%Y-%m-%d`)
    pub timestamp_format: String,
    /// Column holding the timestamp
    pub index_field: String,
    /// Column holding the observed value
    pub value_field: String,
}

impl SeriesFormat {
    pub fn new(
        timestamp_format: impl Into<String>,
        index_field: impl Into<String>,
        value_field: impl Into<String>,
    ) -> Self {
        Self {
            timestamp_format: timestamp_format.into(),
            index_field: index_field.into(),
            value_field: value_field.into(),
        }
    }

    /// Parse a timestamp string with this format
    ///
    /// Date-only patterns resolve to midnight UTC.
    pub fn parse_timestamp(&self, raw: &str) -> Option<Timestamp> {
        let raw = raw.trim();
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, &self.timestamp_format) {
            return Some(dt.and_utc());
        }
        NaiveDate::parse_from_str(raw, &self.timestamp_format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    /// Render a timestamp with this format
    pub fn format_timestamp(&self, ts: &Timestamp) -> String {
        ts.format(&self.timestamp_format).to_string()
    }
}

impl Default for SeriesFormat {
    fn default() -> Self {
        Self::new("%Y-%m-%d", "Index", "Open")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_date_only() {
        let format = SeriesFormat::default();
        let ts = format.parse_timestamp("2018-04-04").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2018, 4, 4));
        assert_eq!(ts.hour(), 0);
    }

    #[test]
    fn test_parse_date_time() {
        let format = SeriesFormat::new("%Y-%m-%d %H:%M:%S", "Index", "Close");
        let ts = format.parse_timestamp("2018-04-04 15:24:00").unwrap();
        assert_eq!((ts.hour(), ts.minute()), (15, 24));
        assert_eq!(format.format_timestamp(&ts), "2018-04-04 15:24:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let format = SeriesFormat::default();
        assert!(format.parse_timestamp("not a date").is_none());
        assert!(format.parse_timestamp("04/04/2018").is_none());
    }

    #[test]
    fn test_deserialize_from_json() {
        let format: SeriesFormat = serde_json::from_str(
            r#"{"timestamp_format":"%Y-%m-%d","index_field":"Date","value_field":"Close"}"#,
        )
        .unwrap();
        assert_eq!(format.index_field, "Date");
        assert_eq!(format.value_field, "Close");
    }
}
