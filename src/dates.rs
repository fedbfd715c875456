//! Date helpers
//!
//! Comparisons over `chrono` values. The `_at` variants take the current
//! instant explicitly; the others read the local clock.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

/// Whether `date` lies before `now`
pub fn is_past_date_at(date: NaiveDateTime, now: NaiveDateTime) -> bool {
    date < now
}

/// Whether `date` lies before the current local time
pub fn is_past_date(date: NaiveDateTime) -> bool {
    is_past_date_at(date, Local::now().naive_local())
}

/// Whether `date` lies after `now`
pub fn is_future_date_at(date: NaiveDateTime, now: NaiveDateTime) -> bool {
    date > now
}

/// Whether `date` lies after the current local time
pub fn is_future_date(date: NaiveDateTime) -> bool {
    is_future_date_at(date, Local::now().naive_local())
}

/// Same calendar day
pub fn is_same_day<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Same calendar month of the same year
pub fn is_same_month<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Same year
pub fn is_same_year<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year()
}

/// Gregorian leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Whether the year, month and day name a real calendar date
pub fn is_valid_date(year: i32, month: u32, day: u32) -> bool {
    NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// Whether `date` lies within `start..=end`
pub fn is_date_in_range<T: PartialOrd>(date: &T, start: &T, end: &T) -> bool {
    date >= start && date <= end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_past_and_future() {
        let now = at(2024, 6, 15, 12);
        assert!(is_past_date_at(at(2024, 6, 15, 11), now));
        assert!(!is_past_date_at(now, now));
        assert!(is_future_date_at(at(2030, 1, 1, 0), now));
        assert!(!is_future_date_at(at(2020, 1, 1, 0), now));

        assert!(is_past_date(at(2000, 1, 1, 0)));
        assert!(is_future_date(at(9999, 1, 1, 0)));
    }

    #[test]
    fn test_same_period() {
        let a = at(2024, 6, 15, 1);
        let b = at(2024, 6, 15, 23);
        let c = at(2024, 6, 1, 0);
        let d = at(2023, 6, 15, 0);

        assert!(is_same_day(&a, &b));
        assert!(!is_same_day(&a, &c));
        assert!(is_same_month(&a, &c));
        assert!(!is_same_month(&a, &d));
        assert!(is_same_year(&a, &c.date()));
        assert!(!is_same_year(&a, &d));
    }

    #[test]
    fn test_leap_year() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_valid_date() {
        assert!(is_valid_date(2024, 2, 29));
        assert!(!is_valid_date(2023, 2, 29));
        assert!(!is_valid_date(2024, 13, 1));
    }

    #[test]
    fn test_date_in_range() {
        let start = at(2024, 1, 1, 0);
        let end = at(2024, 12, 31, 0);

        assert!(is_date_in_range(&start, &start, &end));
        assert!(is_date_in_range(&at(2024, 6, 1, 0), &start, &end));
        assert!(is_date_in_range(&end, &start, &end));
        assert!(!is_date_in_range(&at(2025, 1, 1, 0), &start, &end));
    }
}
