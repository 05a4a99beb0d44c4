//! Calendar helpers: leap years, ordinal ("Julian") days, month ends and
//! year arithmetic.
//!
//! "Julian day" throughout this crate means the 1-based day of the year,
//! as printed on production codes, not the astronomical Julian Day Number.

use chrono::{Datelike, NaiveDate};

use crate::error::DateError;

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `year` (365 or 366).
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Build a calendar date from a day of a month.
pub fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, DateError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::InvalidDate { year, month, day })
}

/// Convert a 1-based day of year into a calendar date.
///
/// `day_of_year` must lie in `1..=365` (`1..=366` in leap years).
pub fn julian_to_date(year: i32, day_of_year: u32) -> Result<NaiveDate, DateError> {
    let invalid = DateError::InvalidDayOfYear {
        year,
        day: day_of_year,
    };
    if !(1..=days_in_year(year)).contains(&day_of_year) {
        return Err(invalid);
    }
    NaiveDate::from_yo_opt(year, day_of_year).ok_or(invalid)
}

/// The 1-based day of year of `date`.
pub fn date_to_julian(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, DateError> {
    let invalid = DateError::InvalidDate {
        year,
        month,
        day: 1,
    };
    if !(1..=12).contains(&month) {
        return Err(invalid);
    }
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .ok_or(invalid)
}

/// The last calendar day of `month` in `year`.
pub fn month_end(year: i32, month: u32) -> Result<NaiveDate, DateError> {
    let day = days_in_month(year, month)?;
    ymd(year, month, day)
}

/// Shift `date` by `years` calendar years.
///
/// Feb 29 collapses to Feb 28 when the target year is not a leap year;
/// any other construction failure is returned.
pub fn add_years(date: NaiveDate, years: i32) -> Result<NaiveDate, DateError> {
    let year = date.year() + years;
    match ymd(year, date.month(), date.day()) {
        Ok(shifted) => Ok(shifted),
        Err(_) if date.month() == 2 && date.day() == 29 => ymd(year, 2, 28),
        Err(e) => Err(e),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2025));
    }

    #[test]
    fn julian_round_trips_every_day() {
        for year in [2023, 2024] {
            for day in 1..=days_in_year(year) {
                let d = julian_to_date(year, day).unwrap();
                assert_eq!(d.year(), year);
                assert_eq!(date_to_julian(d), day);
            }
        }
    }

    #[test]
    fn julian_known_values() {
        assert_eq!(julian_to_date(2025, 9).unwrap(), date(2025, 1, 9));
        assert_eq!(julian_to_date(2024, 60).unwrap(), date(2024, 2, 29));
        assert_eq!(julian_to_date(2023, 60).unwrap(), date(2023, 3, 1));
        assert_eq!(julian_to_date(2024, 366).unwrap(), date(2024, 12, 31));
    }

    #[test]
    fn julian_rejects_out_of_range() {
        assert_eq!(
            julian_to_date(2023, 366),
            Err(DateError::InvalidDayOfYear { year: 2023, day: 366 })
        );
        assert!(julian_to_date(2024, 0).is_err());
        assert!(julian_to_date(2024, 400).is_err());
    }

    #[test]
    fn add_years_collapses_feb_29() {
        assert_eq!(add_years(date(2020, 2, 29), 1).unwrap(), date(2021, 2, 28));
        assert_eq!(add_years(date(2020, 2, 29), 4).unwrap(), date(2024, 2, 29));
        assert_eq!(add_years(date(2024, 5, 20), 3).unwrap(), date(2027, 5, 20));
    }

    #[test]
    fn month_ends() {
        assert_eq!(month_end(2024, 2).unwrap(), date(2024, 2, 29));
        assert_eq!(month_end(2023, 2).unwrap(), date(2023, 2, 28));
        assert_eq!(month_end(2024, 12).unwrap(), date(2024, 12, 31));
        assert_eq!(days_in_month(2024, 4).unwrap(), 30);
        assert!(month_end(2024, 13).is_err());
        assert!(month_end(2024, 0).is_err());
    }
}
