//! Date policy: the "today"-relative windows every decoded date must fit.
//!
//! All time dependence of the engine flows through [`DateWindow`], which is
//! built once per analysis from a [`Clock`] and a [`DatePolicy`]. Pinning the
//! clock makes every analysis reproducible.

use std::ops::RangeInclusive;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::add_years;
use crate::error::DateError;

// ─── Clock ────────────────────────────────────────────────────────────────────

/// Source of "today" for an analysis.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The local system date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to one date. Used by tests and `--today`.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

// ─── DatePolicy ───────────────────────────────────────────────────────────────

/// Tunable bounds for production and expiry dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatePolicy {
    /// No expiry may fall before this date.
    #[serde(default = "default_earliest_expiry")]
    pub earliest_expiry: NaiveDate,
    /// Production years before this are discarded.
    #[serde(default = "default_earliest_production_year")]
    pub earliest_production_year: i32,
    /// Expiry = production + this many years.
    #[serde(default = "default_shelf_life_years")]
    pub shelf_life_years: i32,
    /// Production may be at most this many days after today.
    #[serde(default = "default_future_window_days")]
    pub future_window_days: u64,
    /// Production years may exceed the current year by at most this much.
    #[serde(default = "default_year_ceiling_offset")]
    pub year_ceiling_offset: i32,
    /// Two-digit years below this pivot resolve into the current century.
    #[serde(default = "default_century_pivot")]
    pub century_pivot: u32,
    /// The resolver also tries 19YY once YY is this far past the current YY.
    #[serde(default = "default_near_future_years")]
    pub near_future_years: i32,
}

fn default_earliest_expiry() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or(NaiveDate::MIN)
}
fn default_earliest_production_year() -> i32 { 2015 }
fn default_shelf_life_years() -> i32 { 3 }
fn default_future_window_days() -> u64 { 90 }
fn default_year_ceiling_offset() -> i32 { 1 }
fn default_century_pivot() -> u32 { 50 }
fn default_near_future_years() -> i32 { 5 }

impl Default for DatePolicy {
    fn default() -> Self {
        Self {
            earliest_expiry: default_earliest_expiry(),
            earliest_production_year: default_earliest_production_year(),
            shelf_life_years: default_shelf_life_years(),
            future_window_days: default_future_window_days(),
            year_ceiling_offset: default_year_ceiling_offset(),
            century_pivot: default_century_pivot(),
            near_future_years: default_near_future_years(),
        }
    }
}

// ─── DateWindow ───────────────────────────────────────────────────────────────

/// A [`DatePolicy`] evaluated against a fixed "today".
#[derive(Debug, Clone, PartialEq)]
pub struct DateWindow {
    today: NaiveDate,
    policy: DatePolicy,
}

impl DateWindow {
    pub fn new(today: NaiveDate, policy: DatePolicy) -> Self {
        Self { today, policy }
    }

    /// Window for `today` under the default policy.
    pub fn at(today: NaiveDate) -> Self {
        Self::new(today, DatePolicy::default())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn policy(&self) -> &DatePolicy {
        &self.policy
    }

    pub fn current_year(&self) -> i32 {
        self.today.year()
    }

    /// Map a two-digit year into the current or the previous century.
    ///
    /// Values below the pivot land in the current century, the rest in the
    /// one before it.
    pub fn resolve_two_digit_year(&self, yy: u32) -> Result<i32, DateError> {
        if yy > 99 {
            return Err(DateError::InvalidTwoDigitYear(yy));
        }
        let century_start = self.current_year().div_euclid(100) * 100;
        let offset = yy as i32;
        if yy < self.policy.century_pivot {
            Ok(century_start + offset)
        } else {
            Ok(century_start - 100 + offset)
        }
    }

    /// Production years a code may plausibly carry.
    pub fn production_years(&self) -> RangeInclusive<i32> {
        self.policy.earliest_production_year..=self.current_year() + self.policy.year_ceiling_offset
    }

    pub fn accepts_production_year(&self, year: i32) -> bool {
        self.production_years().contains(&year)
    }

    /// Latest production date a code may describe (today + future window).
    pub fn latest_production_date(&self) -> NaiveDate {
        self.today
            .checked_add_days(Days::new(self.policy.future_window_days))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Latest acceptable expiry: the same calendar day, shelf-life years on.
    pub fn latest_expiry_date(&self) -> NaiveDate {
        add_years(self.today, self.policy.shelf_life_years).unwrap_or(NaiveDate::MAX)
    }

    pub fn is_valid_expiry(&self, expiry: NaiveDate) -> bool {
        self.policy.earliest_expiry <= expiry && expiry <= self.latest_expiry_date()
    }

    /// Expiry date for a production date.
    pub fn expiry_for(&self, production: NaiveDate) -> Result<NaiveDate, DateError> {
        add_years(production, self.policy.shelf_life_years)
    }

    /// Expiry for `production` if it satisfies the expiry window.
    pub fn policy_expiry(&self, production: NaiveDate) -> Option<NaiveDate> {
        self.expiry_for(production)
            .ok()
            .filter(|expiry| self.is_valid_expiry(*expiry))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window() -> DateWindow {
        DateWindow::at(date(2026, 10, 18))
    }

    #[test]
    fn two_digit_years_split_at_pivot() {
        let w = window();
        assert_eq!(w.resolve_two_digit_year(24).unwrap(), 2024);
        assert_eq!(w.resolve_two_digit_year(0).unwrap(), 2000);
        assert_eq!(w.resolve_two_digit_year(49).unwrap(), 2049);
        assert_eq!(w.resolve_two_digit_year(50).unwrap(), 1950);
        assert_eq!(w.resolve_two_digit_year(99).unwrap(), 1999);
        assert_eq!(
            w.resolve_two_digit_year(100),
            Err(DateError::InvalidTwoDigitYear(100))
        );
    }

    #[test]
    fn centuries_differ_by_exactly_one_hundred() {
        for today in [date(2026, 1, 1), date(2101, 6, 1), date(1999, 12, 31)] {
            let w = DateWindow::at(today);
            let low = w.resolve_two_digit_year(24).unwrap();
            let high = w.resolve_two_digit_year(99).unwrap();
            assert_eq!((low - 24) - (high - 99), 100);
        }
    }

    #[test]
    fn production_year_window() {
        let w = window();
        assert!(w.accepts_production_year(2015));
        assert!(w.accepts_production_year(2027));
        assert!(!w.accepts_production_year(2014));
        assert!(!w.accepts_production_year(2028));
    }

    #[test]
    fn expiry_window_is_inclusive() {
        let w = window();
        assert!(w.is_valid_expiry(date(2015, 1, 1)));
        assert!(w.is_valid_expiry(date(2029, 10, 18)));
        assert!(!w.is_valid_expiry(date(2014, 12, 31)));
        assert!(!w.is_valid_expiry(date(2029, 10, 19)));
    }

    #[test]
    fn leap_day_today_collapses_expiry_ceiling() {
        let w = DateWindow::at(date(2028, 2, 29));
        assert_eq!(w.latest_expiry_date(), date(2031, 2, 28));
    }

    #[test]
    fn future_window_is_ninety_days() {
        assert_eq!(window().latest_production_date(), date(2027, 1, 16));
    }

    #[test]
    fn policy_deserializes_with_defaults() {
        let policy: DatePolicy = serde_json::from_str(r#"{ "future_window_days": 30 }"#).unwrap();
        assert_eq!(policy.future_window_days, 30);
        assert_eq!(policy.shelf_life_years, 3);
        assert_eq!(policy.earliest_expiry, date(2015, 1, 1));
    }
}
