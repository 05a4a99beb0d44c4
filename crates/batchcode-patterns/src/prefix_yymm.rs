//! `Prefix-YYMM-Suffix`: a letter, year, month and an alphanumeric tail.
//!
//! The production date is the last day of the encoded month.

use batchcode_core::calendar::month_end;
use batchcode_core::registry::keys;
use batchcode_core::{
    DecodeContext, DecodeError, DecodeOutcome, DecoderKind, Format, PatternDecoder,
};
use tracing::debug;

use crate::support::{dated, group, number};

#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixYymmSuffixDecoder;

impl PatternDecoder for PrefixYymmSuffixDecoder {
    fn kind(&self) -> DecoderKind {
        DecoderKind::PrefixYymmSuffix
    }

    fn decode(&self, code: &str, ctx: &DecodeContext<'_>) -> Result<DecodeOutcome, DecodeError> {
        let def = ctx.registry.require(keys::PREFIX_YYMM_SUFFIX)?;
        let Some(caps) = def.captures(code) else {
            return Ok(DecodeOutcome::no_match("Not Prefix-YYMM-Suffix pattern"));
        };
        let prefix = group(def, &caps, 1)?;
        let mm_str = group(def, &caps, 3)?;
        let yy = number("year", group(def, &caps, 2)?)?;
        let mm = number("month", mm_str)?;
        let suffix = group(def, &caps, 4)?;

        if !(1..=12).contains(&mm) {
            return Ok(DecodeOutcome::no_match(format!("Invalid month '{mm_str}' for pattern")));
        }
        let window = ctx.window;
        let invalid = || {
            DecodeOutcome::no_match(format!("Invalid data for Prefix-YYMM-Suffix in code '{code}'"))
        };
        let year = match window.resolve_two_digit_year(yy) {
            Ok(year) => year,
            Err(e) => {
                debug!(code, error = %e, "Prefix-YYMM-Suffix year rejected");
                return Ok(invalid());
            }
        };
        if !window.accepts_production_year(year) {
            return Ok(DecodeOutcome::no_match(format!("Year {year} out of range for pattern")));
        }
        let production = match month_end(year, mm) {
            Ok(date) => date,
            Err(e) => {
                debug!(code, error = %e, "Prefix-YYMM-Suffix candidate rejected");
                return Ok(invalid());
            }
        };
        let Some(interp) = dated(window, production, 0.95, Format::PrefixYymmSuffix, self.kind()) else {
            return Ok(invalid());
        };

        let letter = prefix.chars().next().unwrap_or_default();
        Ok(DecodeOutcome::matched(
            format!("Prefix-YYMM-Suffix (Prefix: {prefix}, Date: {mm:02}/{year}, Suffix: {suffix})"),
            vec![interp.with_prefix(letter).with_suffix(suffix)],
        ))
    }
}
