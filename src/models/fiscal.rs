//! Thai fiscal-year helpers
//!
//! The government fiscal year runs 1 October through 30 September and is
//! labeled in the Buddhist calendar: October 2024 already belongs to fiscal
//! year 2568. Labels partition the CSV extracts in the backup archive.

use chrono::{Datelike, NaiveDate};

/// Offset between the Gregorian and Buddhist calendar years
pub const THAI_YEAR_OFFSET: i32 = 543;

/// Bucket label for transactions whose date cannot be parsed
///
/// Such rows are still exported; they are never dropped.
pub const UNLABELED_FISCAL_YEAR: &str = "unlabeled";

/// The Buddhist fiscal year a date falls in
///
/// Dates in October through December belong to the next calendar year's
/// fiscal year.
pub fn fiscal_year(date: NaiveDate) -> i32 {
    let calendar_year = if date.month() >= 10 {
        date.year() + 1
    } else {
        date.year()
    };
    calendar_year + THAI_YEAR_OFFSET
}

/// Fiscal-year label for a raw `YYYY-MM-DD` date string
///
/// Falls back to [`UNLABELED_FISCAL_YEAR`] when the string does not parse.
pub fn fiscal_year_label(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => fiscal_year(parsed).to_string(),
        Err(_) => UNLABELED_FISCAL_YEAR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_october_starts_new_fiscal_year() {
        assert_eq!(fiscal_year(date(2024, 9, 30)), 2567);
        assert_eq!(fiscal_year(date(2024, 10, 1)), 2568);
    }

    #[test]
    fn test_buddhist_offset() {
        assert_eq!(fiscal_year(date(2024, 11, 1)), 2568);
        assert_eq!(fiscal_year(date(2024, 3, 15)), 2567);
        assert_eq!(fiscal_year(date(2025, 1, 1)), 2568);
    }

    #[test]
    fn test_label_from_string() {
        assert_eq!(fiscal_year_label("2024-11-01"), "2568");
        assert_eq!(fiscal_year_label("2024-03-15"), "2567");
    }

    #[test]
    fn test_unparseable_dates_fall_back() {
        assert_eq!(fiscal_year_label("not-a-date"), UNLABELED_FISCAL_YEAR);
        assert_eq!(fiscal_year_label(""), UNLABELED_FISCAL_YEAR);
        assert_eq!(fiscal_year_label("2024-13-40"), UNLABELED_FISCAL_YEAR);
        assert_eq!(fiscal_year_label("01/11/2024"), UNLABELED_FISCAL_YEAR);
    }
}
