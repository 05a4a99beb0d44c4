//! `YDDD BB`: last digit of the year, Julian day, two-digit batch.
//!
//! `500903` reads as year-digit 5, day 009, batch 03.

use batchcode_core::calendar::julian_to_date;
use batchcode_core::registry::keys;
use batchcode_core::{
    DecodeContext, DecodeError, DecodeOutcome, DecoderKind, Format, PatternDecoder,
};
use tracing::debug;

use crate::support::{dated, group, number};

/// Decoder for year-digit + Julian day + batch codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct YdddBatchDecoder;

/// The most recent year, not after `current_year`, whose last digit is `digit`.
pub fn decade_year(current_year: i32, digit: u32) -> i32 {
    let candidate = current_year.div_euclid(10) * 10 + digit as i32;
    if candidate > current_year {
        candidate - 10
    } else {
        candidate
    }
}

impl PatternDecoder for YdddBatchDecoder {
    fn kind(&self) -> DecoderKind {
        DecoderKind::YdddBatch
    }

    fn decode(&self, code: &str, ctx: &DecodeContext<'_>) -> Result<DecodeOutcome, DecodeError> {
        let def = ctx.registry.require(keys::YDDD_BB)?;
        let Some(caps) = def.captures(code) else {
            return Ok(DecodeOutcome::no_match("Not YDDD BB pattern"));
        };
        let digit = number("year digit", group(def, &caps, 1)?)?;
        let ddd = number("julian day", group(def, &caps, 2)?)?;
        let batch = group(def, &caps, 3)?;

        let window = ctx.window;
        let year = decade_year(window.current_year(), digit);
        if !window.accepts_production_year(year) {
            let years = window.production_years();
            return Ok(DecodeOutcome::no_match(format!(
                "Resolved year {year} is out of valid range ({}-{})",
                years.start(),
                years.end()
            )));
        }

        let invalid = || DecodeOutcome::no_match(format!("Invalid data for YDDD BB pattern in code '{code}'"));
        let production = match julian_to_date(year, ddd) {
            Ok(date) => date,
            Err(e) => {
                debug!(code, error = %e, "YDDD BB candidate rejected");
                return Ok(invalid());
            }
        };
        let Some(interp) = dated(window, production, 0.98, Format::YdddBatch, self.kind()) else {
            return Ok(invalid());
        };

        Ok(DecodeOutcome::matched(
            format!("YDDD BB (Year: {year}, Julian: {ddd}, Batch: {batch})"),
            vec![interp.with_julian_day(ddd).with_batch(batch)],
        ))
    }
}
