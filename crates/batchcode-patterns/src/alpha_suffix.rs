//! Date digits followed by a run of letters.
//!
//! The digit run before the two-digit year decides the reading:
//! - 3 digits: Julian day (`17924AW` is day 179 of 2024)
//! - 4 digits: two ambiguous day/month fields
//! - 5 digits: not decoded

use batchcode_core::registry::keys;
use batchcode_core::{
    DecodeContext, DecodeError, DecodeOutcome, DecoderKind, Format, Interpretation, PatternDecoder,
};
use tracing::{debug, warn};

use crate::support::{dated, group, julian_production, number, resolved};

#[derive(Debug, Clone, Copy, Default)]
pub struct DateAlphaSuffixDecoder;

impl DateAlphaSuffixDecoder {
    fn julian(
        &self,
        ctx: &DecodeContext<'_>,
        ddd: u32,
        yy: u32,
        alpha: &str,
    ) -> Option<Interpretation> {
        let (_, production) = julian_production(ctx.window, yy, ddd)
            .map_err(|e| debug!(ddd, yy, error = %e, "Julian alpha candidate rejected"))
            .ok()?;
        let interp = dated(ctx.window, production, 0.9, Format::JulianAlphaSuffix, self.kind())?;
        Some(interp.with_julian_day(ddd).with_alpha_suffix(alpha))
    }

    fn day_month(
        &self,
        ctx: &DecodeContext<'_>,
        digits: &str,
        yy: u32,
        alpha: &str,
    ) -> Result<Vec<Interpretation>, DecodeError> {
        let (first, second) = digits.split_at(2);
        let first = number("day or month", first)?;
        let second = number("month or day", second)?;
        Ok(resolved(
            ctx.window,
            (first, second, yy),
            0.85,
            self.kind(),
            |order| Format::DateAlphaSuffix { order },
        )
        .into_iter()
        .map(|interp| interp.with_suffix(alpha).with_alpha_suffix(alpha))
        .collect())
    }
}

impl PatternDecoder for DateAlphaSuffixDecoder {
    fn kind(&self) -> DecoderKind {
        DecoderKind::DateAlphaSuffix
    }

    fn decode(&self, code: &str, ctx: &DecodeContext<'_>) -> Result<DecodeOutcome, DecodeError> {
        let def = ctx.registry.require(keys::MIXED_ALPHA)?;
        let Some(caps) = def.captures(code) else {
            return Ok(DecodeOutcome::no_match("Not Date + Alpha Suffix pattern"));
        };
        let digits = group(def, &caps, 1)?;
        let yy = number("year", group(def, &caps, 2)?)?;
        let alpha = group(def, &caps, 3)?;

        let interpretations = match digits.len() {
            3 => self
                .julian(ctx, number("julian day", digits)?, yy, alpha)
                .into_iter()
                .collect(),
            4 => self.day_month(ctx, digits, yy, alpha)?,
            _ => {
                warn!(code, date_part = digits, "5-digit date part is not decoded");
                Vec::new()
            }
        };

        if interpretations.is_empty() {
            return Ok(DecodeOutcome::no_match(format!(
                "Invalid data for Date + Alpha Suffix in code '{code}'"
            )));
        }
        Ok(DecodeOutcome::matched(
            format!("{} (Alpha Suffix: {alpha})", def.description),
            interpretations,
        ))
    }
}
