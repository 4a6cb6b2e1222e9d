//! Date helper functions

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

/// Naive date-time layouts accepted in front-matter
const DATETIME_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a front-matter date string.
///
/// Values without an explicit offset are read as UTC, so the result never
/// depends on the machine that runs the build.
///
/// # Examples
/// ```
/// let date = folio::helpers::parse_date("2023-06-01").unwrap();
/// assert_eq!(date.to_rfc3339(), "2023-06-01T00:00:00+00:00");
/// ```
pub fn parse_date(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt);
    }

    let utc = FixedOffset::east_opt(0)?;

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return utc.from_local_datetime(&naive).single();
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            let naive = d.and_hms_opt(0, 0, 0)?;
            return utc.from_local_datetime(&naive).single();
        }
    }

    None
}

/// Format a date using Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2024-01-15"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a date the way RSS `pubDate` expects (RFC 2822)
pub fn date_rfc2822(date: &DateTime<FixedOffset>) -> String {
    date.to_rfc2822()
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
        ("ZZ", "%z"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date_is_utc_midnight() {
        let date = parse_date("2023-01-01").unwrap();
        assert_eq!(date.to_rfc3339(), "2023-01-01T00:00:00+00:00");

        let slashed = parse_date("2023/01/01").unwrap();
        assert_eq!(slashed, date);
    }

    #[test]
    fn test_parse_keeps_explicit_offset() {
        let date = parse_date("2024-01-15T10:30:00+08:00").unwrap();
        assert_eq!(date.offset().local_minus_utc(), 8 * 3600);
        assert_eq!(date.to_rfc3339(), "2024-01-15T10:30:00+08:00");
    }

    #[test]
    fn test_parse_naive_datetime() {
        let date = parse_date("2024-01-15 10:30:00").unwrap();
        assert_eq!(date.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date("last tuesday").is_none());
        assert!(parse_date("2023-13-45").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_format_date() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(format_date(&date, "YYYY-MM-DD"), "2024-01-15");
        assert_eq!(format_date(&date, "MMMM DD, YYYY"), "January 15, 2024");
    }

    #[test]
    fn test_rfc2822() {
        let date = parse_date("2023-06-15").unwrap();
        assert_eq!(date_rfc2822(&date), "Thu, 15 Jun 2023 00:00:00 +0000");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
    }
}
