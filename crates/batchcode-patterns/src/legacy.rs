//! Legacy layouts kept for older stock.
//!
//! Two independent rules, both of which may fire on one code:
//! - `DDDYYBB`: Julian day, two-digit year, two-digit batch (7 digits)
//! - `YYDDD[suffix]`: two-digit year, Julian day, anything after
//!
//! A `YYDDD` reading landing on the same production date as a `DDDYYBB`
//! reading is dropped.

use batchcode_core::registry::keys;
use batchcode_core::{
    DecodeContext, DecodeError, DecodeOutcome, DecoderKind, Format, Interpretation, PatternDecoder,
};
use tracing::debug;

use crate::support::{dated, group, julian_production, number};

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyDecoder;

impl LegacyDecoder {
    fn julian_batch(
        &self,
        code: &str,
        ctx: &DecodeContext<'_>,
    ) -> Result<Option<Interpretation>, DecodeError> {
        let def = ctx.registry.require(keys::LEGACY_DDDYYBB)?;
        let Some(caps) = def.captures(code) else {
            return Ok(None);
        };
        let ddd = number("julian day", group(def, &caps, 1)?)?;
        let yy = number("year", group(def, &caps, 2)?)?;
        let batch = group(def, &caps, 3)?;

        let production = match julian_production(ctx.window, yy, ddd) {
            Ok((_, production)) => production,
            Err(e) => {
                debug!(code, error = %e, "legacy DDDYYBB rejected");
                return Ok(None);
            }
        };
        Ok(dated(ctx.window, production, 0.8, Format::LegacyJulianBatch, self.kind())
            .map(|interp| interp.with_batch(batch)))
    }

    fn year_julian(
        &self,
        code: &str,
        ctx: &DecodeContext<'_>,
    ) -> Result<Option<Interpretation>, DecodeError> {
        let def = ctx.registry.require(keys::LEGACY_YYDDD)?;
        let Some(caps) = def.captures(code) else {
            return Ok(None);
        };
        let yy = number("year", group(def, &caps, 1)?)?;
        let ddd = number("julian day", group(def, &caps, 2)?)?;
        let suffix = group(def, &caps, 3)?;

        let production = match julian_production(ctx.window, yy, ddd) {
            Ok((_, production)) => production,
            Err(e) => {
                debug!(code, error = %e, "legacy YYDDD rejected");
                return Ok(None);
            }
        };
        let format = Format::LegacyYearJulian {
            suffixed: !suffix.is_empty(),
        };
        Ok(dated(ctx.window, production, 0.8, format, self.kind())
            .map(|interp| interp.with_suffix(suffix)))
    }
}

impl PatternDecoder for LegacyDecoder {
    fn kind(&self) -> DecoderKind {
        DecoderKind::Legacy
    }

    fn decode(&self, code: &str, ctx: &DecodeContext<'_>) -> Result<DecodeOutcome, DecodeError> {
        let mut results: Vec<Interpretation> = self.julian_batch(code, ctx)?.into_iter().collect();

        if let Some(interp) = self.year_julian(code, ctx)? {
            let duplicate = results.iter().any(|r| {
                r.format == Format::LegacyJulianBatch && r.production_date == interp.production_date
            });
            if duplicate {
                debug!(code, production = %interp.production_date, "legacy YYDDD duplicates DDDYYBB");
            } else {
                results.push(interp);
            }
        }

        if results.is_empty() {
            return Ok(DecodeOutcome::no_match("No legacy format match"));
        }
        Ok(DecodeOutcome::matched("Legacy Format Match", results))
    }
}
