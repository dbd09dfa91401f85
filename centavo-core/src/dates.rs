//! Date arithmetic: timezone-safe local-date parsing, formatting, comparison.
//!
//! Everything financial in centavo is keyed on a calendar date with no
//! time-of-day, so `NaiveDate` is the working type. That makes the classic
//! off-by-one bug (a UTC round-trip shifting a date to the adjacent day across
//! midnight or a DST change) structurally impossible.

use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::FinanceError;

/// Today's calendar date in the system-local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Today's calendar date in an IANA timezone like "America/Santiago".
pub fn today_in_tz(tz: &str) -> Result<NaiveDate, FinanceError> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| FinanceError::InvalidTimezone(tz.to_string()))?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}

/// Parse a strict `YYYY-MM-DD` string.
///
/// Empty or malformed input is a hard `InvalidDateFormat` error; callers must
/// not paper over it with a default when the string comes from persisted data.
pub fn parse_date(s: &str) -> Result<NaiveDate, FinanceError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| FinanceError::InvalidDateFormat(s.to_string()))
}

/// Canonical `YYYY-MM-DD` representation; round-trips through [`parse_date`].
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Human-readable form for display only, never for comparisons.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Number of calendar days from `start` through `end`, counting both ends.
///
/// The start day itself counts as day 1; an end before the start clamps to 0.
pub fn days_between_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    ((end - start).num_days() + 1).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn parse_and_format_round_trip() {
        let date = d("2024-01-05");
        assert_eq!(format_date(date), "2024-01-05");
        assert_eq!(parse_date(&format_date(date)).unwrap(), date);
    }

    #[test]
    fn parse_rejects_empty_and_malformed() {
        assert_eq!(
            parse_date(""),
            Err(FinanceError::InvalidDateFormat(String::new()))
        );
        assert!(parse_date("05-01-2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("not a date").is_err());
    }

    #[test]
    fn same_day_counts_as_one() {
        assert_eq!(days_between_inclusive(d("2024-01-01"), d("2024-01-01")), 1);
    }

    #[test]
    fn five_day_span_counts_five() {
        assert_eq!(days_between_inclusive(d("2024-01-01"), d("2024-01-05")), 5);
    }

    #[test]
    fn inverted_span_clamps_to_zero() {
        assert_eq!(days_between_inclusive(d("2024-01-05"), d("2024-01-01")), 0);
    }

    #[test]
    fn span_crosses_month_boundaries() {
        assert_eq!(days_between_inclusive(d("2024-01-31"), d("2024-02-01")), 2);
        // 2024 is a leap year
        assert_eq!(days_between_inclusive(d("2024-02-01"), d("2024-03-01")), 30);
    }

    #[test]
    fn today_in_tz_rejects_bad_name() {
        assert_eq!(
            today_in_tz("America/Nowhere"),
            Err(FinanceError::InvalidTimezone("America/Nowhere".into()))
        );
    }

    #[test]
    fn today_in_tz_accepts_iana_names() {
        assert!(today_in_tz("America/Santiago").is_ok());
        assert!(today_in_tz("Europe/Madrid").is_ok());
    }
}
