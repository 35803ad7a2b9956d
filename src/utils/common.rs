//! Time helpers
//!
//! Exam windows are stored as unix seconds; the text form is only used in
//! log messages.

use chrono::{DateTime, Utc};

/// Date format for timestamps shown as text
pub const DB_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format unix seconds as `YYYY-MM-DD HH:MM:SS` (UTC)
///
/// Returns `None` for timestamps chrono cannot represent.
pub fn format_unix(ts: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(ts, 0).map(|dt| dt.format(DB_DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_unix() {
        assert_eq!(format_unix(0).unwrap(), "1970-01-01 00:00:00");
        assert_eq!(format_unix(1481822634).unwrap(), "2016-12-15 17:23:54");
        assert!(format_unix(i64::MAX).is_none());
    }
}
