//! # Utility Functions
//!
//! This module provides small helpers shared across the client: upload
//! timestamp normalization and parsing, and the short date format used for
//! filter chip labels.
//!
//! ## Timestamp Handling
//!
//! The backend historically emitted bare `YYYYMMDD` dates for upload times;
//! newer deployments emit full ISO-8601 datetimes. Everything downstream
//! (sorting, date filtering, chip labels) works on the normalized form, and
//! unparseable values degrade to the epoch rather than failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Normalizes an upload time to ISO-8601.
///
/// Bare `YYYYMMDD` values become midnight UTC of that day; anything else is
/// passed through untouched.
pub fn normalize_upload_time(upload_time: &str) -> String {
    if upload_time.len() == 8 && upload_time.bytes().all(|b| b.is_ascii_digit()) {
        let (year, rest) = upload_time.split_at(4);
        let (month, day) = rest.split_at(2);
        return format!("{year}-{month}-{day}T00:00:00Z");
    }
    upload_time.to_string()
}

/// Parses an upload time into a UTC instant.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS`, or a bare date. Returns
/// `None` when nothing matches.
pub fn parse_upload_time(upload_time: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(upload_time) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(upload_time, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(upload_time, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

/// Millisecond timestamp for sorting; unparseable values sort as the epoch.
pub fn upload_time_sort_key(upload_time: &str) -> i64 {
    parse_upload_time(upload_time)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// Formats a `YYYY-MM-DD` date for chip labels, e.g. `1 Mar 2024`.
///
/// Values that fail to parse are returned verbatim so a malformed input is
/// still visible to the user.
pub fn format_date_short(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%-d %b %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_dates_normalize_to_midnight_utc() {
        assert_eq!(normalize_upload_time("20240301"), "2024-03-01T00:00:00Z");
        assert_eq!(
            normalize_upload_time("2024-03-01T10:30:00Z"),
            "2024-03-01T10:30:00Z"
        );
        // Not a bare date: wrong length or non-digits pass through.
        assert_eq!(normalize_upload_time("2024030"), "2024030");
        assert_eq!(normalize_upload_time("2024O301"), "2024O301");
    }

    #[test]
    fn parse_accepts_rfc3339_naive_and_bare_forms() {
        assert!(parse_upload_time("2024-03-01T10:30:00Z").is_some());
        assert!(parse_upload_time("2024-03-01T10:30:00+02:00").is_some());
        assert!(parse_upload_time("2024-03-01T10:30:00").is_some());
        assert!(parse_upload_time("2024-03-01").is_some());
        assert!(parse_upload_time("not a date").is_none());
    }

    #[test]
    fn unparseable_sort_key_is_epoch() {
        assert_eq!(upload_time_sort_key("garbage"), 0);
        assert!(upload_time_sort_key("2024-03-01T00:00:00Z") > 0);
    }

    #[test]
    fn short_date_format() {
        assert_eq!(format_date_short("2024-03-01"), "1 Mar 2024");
        assert_eq!(format_date_short("2024-12-25"), "25 Dec 2024");
        assert_eq!(format_date_short("soon"), "soon");
    }
}
