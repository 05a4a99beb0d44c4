//! Helpers shared by the decoders.

use std::fmt;

use batchcode_core::calendar::julian_to_date;
use batchcode_core::registry::PatternDefinition;
use batchcode_core::{
    parse_date_variants, DateError, DateWindow, DecodeError, DecoderKind, FieldOrder, Format,
    Interpretation,
};
use chrono::NaiveDate;
use regex::Captures;
use tracing::debug;

/// Capture group `index` of a grammar match.
pub(crate) fn group<'c>(
    def: &PatternDefinition,
    caps: &Captures<'c>,
    index: usize,
) -> Result<&'c str, DecodeError> {
    caps.get(index)
        .map(|m| m.as_str())
        .ok_or_else(|| DecodeError::MissingGroup {
            key: def.key.to_string(),
            index,
        })
}

/// Parse a digit run captured by a grammar.
pub(crate) fn number(field: &'static str, value: &str) -> Result<u32, DecodeError> {
    value.parse().map_err(|_| DecodeError::InvalidField {
        field,
        value: value.to_string(),
    })
}

/// Why a Julian-day candidate was dropped.
#[derive(Debug)]
pub(crate) enum Rejected {
    YearOutOfRange(i32),
    Date(DateError),
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::YearOutOfRange(year) => write!(f, "year {year} is outside the production window"),
            Self::Date(e) => write!(f, "{e}"),
        }
    }
}

impl From<DateError> for Rejected {
    fn from(e: DateError) -> Self {
        Self::Date(e)
    }
}

/// Production date for Julian day `ddd` of two-digit year `yy`.
pub(crate) fn julian_production(
    window: &DateWindow,
    yy: u32,
    ddd: u32,
) -> Result<(i32, NaiveDate), Rejected> {
    let year = window.resolve_two_digit_year(yy)?;
    if !window.accepts_production_year(year) {
        return Err(Rejected::YearOutOfRange(year));
    }
    Ok((year, julian_to_date(year, ddd)?))
}

/// Build an interpretation if `production` yields an acceptable expiry.
pub(crate) fn dated(
    window: &DateWindow,
    production: NaiveDate,
    confidence: f32,
    format: Format,
    source: DecoderKind,
) -> Option<Interpretation> {
    match window.policy_expiry(production) {
        Some(expiry) => Some(Interpretation::new(production, expiry, confidence, format, source)),
        None => {
            debug!(%production, %source, "expiry outside the accepted window");
            None
        }
    }
}

/// Run the candidate resolver and keep the readings with a valid expiry.
///
/// `format` picks the label from the field order each date was read in.
pub(crate) fn resolved(
    window: &DateWindow,
    (first, second, yy): (u32, u32, u32),
    confidence: f32,
    source: DecoderKind,
    format: impl Fn(FieldOrder) -> Format,
) -> Vec<Interpretation> {
    let candidates = parse_date_variants(window, first, second, yy);
    if candidates.is_empty() {
        debug!(first, second, yy, %source, "no production date candidates");
    }
    candidates
        .into_iter()
        .filter_map(|production| {
            let order = FieldOrder::classify(production, first, second);
            dated(window, production, confidence, format(order), source)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> DateWindow {
        DateWindow::at(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    #[test]
    fn julian_production_checks_year_then_day() {
        let w = window();
        let (year, date) = julian_production(&w, 24, 187).unwrap();
        assert_eq!(year, 2024);
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 7, 5).unwrap());

        assert!(matches!(julian_production(&w, 12, 10), Err(Rejected::YearOutOfRange(2012))));
        assert!(matches!(
            julian_production(&w, 24, 400),
            Err(Rejected::Date(DateError::InvalidDayOfYear { year: 2024, day: 400 }))
        ));
    }

    #[test]
    fn dated_drops_expiry_past_ceiling() {
        let w = window();
        let today = w.today();
        assert!(dated(&w, today, 0.9, Format::JulianSuffix, DecoderKind::JulianSuffix).is_some());
        let tomorrow = today.succ_opt().unwrap();
        assert!(dated(&w, tomorrow, 0.9, Format::JulianSuffix, DecoderKind::JulianSuffix).is_none());
    }

    #[test]
    fn number_rejects_non_digits() {
        assert_eq!(number("day", "07").unwrap(), 7);
        assert!(matches!(
            number("day", "x7"),
            Err(DecodeError::InvalidField { field: "day", .. })
        ));
    }
}
