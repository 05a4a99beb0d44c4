//! Six-digit `DDMMYY` / `MMDDYY` codes.

use batchcode_core::registry::keys;
use batchcode_core::{
    DecodeContext, DecodeError, DecodeOutcome, DecoderKind, Format, PatternDecoder,
};

use crate::support::{group, number, resolved};

#[derive(Debug, Clone, Copy, Default)]
pub struct DayMonthYearDecoder;

impl PatternDecoder for DayMonthYearDecoder {
    fn kind(&self) -> DecoderKind {
        DecoderKind::DayMonthYear
    }

    fn decode(&self, code: &str, ctx: &DecodeContext<'_>) -> Result<DecodeOutcome, DecodeError> {
        let def = ctx.registry.require(keys::DDMMYY_VARIANTS)?;
        let Some(caps) = def.captures(code) else {
            let reason = if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
                "len/type"
            } else {
                "regex mismatch"
            };
            return Ok(DecodeOutcome::no_match(format!("Not DDMMYY or MMDDYY pattern ({reason})")));
        };
        let first = number("day or month", group(def, &caps, 1)?)?;
        let second = number("month or day", group(def, &caps, 2)?)?;
        let yy = number("year", group(def, &caps, 3)?)?;

        let interpretations = resolved(
            ctx.window,
            (first, second, yy),
            0.85,
            self.kind(),
            |order| Format::Date { order },
        );
        if interpretations.is_empty() {
            return Ok(DecodeOutcome::no_match(format!(
                "Invalid data for DDMMYY or MMDDYY in code '{code}'"
            )));
        }
        Ok(DecodeOutcome::matched(def.description, interpretations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchcode_core::{DateWindow, FieldOrder, PatternRegistry};
    use chrono::NaiveDate;

    fn decode(code: &str) -> DecodeOutcome {
        let window = DateWindow::at(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        let ctx = DecodeContext::new(&window, PatternRegistry::global());
        DayMonthYearDecoder.decode(code, &ctx).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ambiguous_code_yields_every_reading() {
        let out = decode("052024");
        assert!(out.matched);
        let got: Vec<_> = out
            .interpretations
            .iter()
            .map(|i| (i.production_date, i.format.label()))
            .collect();
        assert_eq!(
            got,
            vec![
                (date(2024, 5, 20), "MM/DD/YY".to_string()),
                (date(2024, 5, 31), "MM/YY (End of Month)".to_string()),
            ]
        );
        assert!(out.interpretations.iter().all(|i| i.confidence == 0.85));
    }

    #[test]
    fn day_first_and_month_end_readings() {
        let out = decode("010124");
        let orders: Vec<_> = out
            .interpretations
            .iter()
            .map(|i| (i.production_date, i.format.clone()))
            .collect();
        assert_eq!(
            orders,
            vec![
                (date(2024, 1, 1), Format::Date { order: FieldOrder::DayMonth }),
                (date(2024, 1, 31), Format::Date { order: FieldOrder::MonthEnd }),
            ]
        );
    }

    #[test]
    fn rejects_year_outside_window() {
        let out = decode("202401");
        assert!(!out.matched);
    }

    #[test]
    fn mismatch_reason() {
        assert_eq!(decode("12345").message, "Not DDMMYY or MMDDYY pattern (len/type)");
        assert_eq!(decode("1234AB").message, "Not DDMMYY or MMDDYY pattern (len/type)");
    }
}
