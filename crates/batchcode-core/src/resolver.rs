//! Candidate date resolver.
//!
//! Many code families print two small numbers and a two-digit year with no
//! indication of field order. [`parse_date_variants`] enumerates every
//! calendar reading that survives the date policy and leaves the choice
//! between them to confidence ranking.

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::{month_end, ymd};
use crate::policy::DateWindow;

/// Expand `(part1, part2, yy)` into every plausible production date.
///
/// Tried per candidate year:
/// 1. `part1/part2/yy` as DD/MM/YY
/// 2. `part1/part2/yy` as MM/DD/YY
/// 3. `part1/yy` as MM/YY, dated to the last day of the month
///
/// Dates past [`DateWindow::latest_production_date`] are dropped. The result
/// is sorted ascending with no duplicates.
pub fn parse_date_variants(window: &DateWindow, part1: u32, part2: u32, yy: u32) -> Vec<NaiveDate> {
    let latest = window.latest_production_date();
    let mut candidates: Vec<NaiveDate> = Vec::new();

    let years: Vec<i32> = candidate_years(window, yy)
        .into_iter()
        .filter(|year| window.accepts_production_year(*year))
        .collect();
    if years.is_empty() {
        debug!(yy, "no candidate year inside the production window");
    }

    for year in years {
        let day_month = ((1..=31).contains(&part1) && (1..=12).contains(&part2))
            .then(|| ymd(year, part2, part1));
        let month_day = ((1..=12).contains(&part1) && (1..=31).contains(&part2))
            .then(|| ymd(year, part1, part2));
        let month_year = (1..=12).contains(&part1).then(|| month_end(year, part1));

        for reading in [day_month, month_day, month_year].into_iter().flatten() {
            match reading {
                Ok(date) if date <= latest && !candidates.contains(&date) => candidates.push(date),
                Ok(date) => debug!(%date, "candidate past the production window or duplicate"),
                Err(e) => debug!(part1, part2, year, error = %e, "candidate rejected"),
            }
        }
    }

    candidates.sort_unstable();
    candidates.dedup();
    candidates
}

/// Full years to try for a two-digit `yy`.
///
/// 20YY is always tried; 19YY is tried first when `yy` sits well past the
/// current two-digit year. Values above 99 are taken as full years.
fn candidate_years(window: &DateWindow, yy: u32) -> Vec<i32> {
    if yy > 99 {
        return vec![yy as i32];
    }
    let yy = yy as i32;
    let mut years = Vec::with_capacity(2);
    if yy > window.current_year() % 100 + window.policy().near_future_years {
        years.push(1900 + yy);
    }
    years.push(2000 + yy);
    years.dedup();
    years
}

// ─── Tests ────────────────────────────────────────────────────────────────────
