//! `DD/MM/YY + suffix`: two short date fields, a two-digit year and a
//! numeric suffix, with day/month order unknown.

use batchcode_core::registry::keys;
use batchcode_core::{
    DecodeContext, DecodeError, DecodeOutcome, DecoderKind, Format, PatternDecoder,
};

use crate::support::{group, number, resolved};

#[derive(Debug, Clone, Copy, Default)]
pub struct DateSuffixDecoder;

impl PatternDecoder for DateSuffixDecoder {
    fn kind(&self) -> DecoderKind {
        DecoderKind::DateSuffix
    }

    fn decode(&self, code: &str, ctx: &DecodeContext<'_>) -> Result<DecodeOutcome, DecodeError> {
        let def = ctx.registry.require(keys::DDMMYYYY_VARIANTS)?;
        let Some(caps) = def.captures(code) else {
            return Ok(DecodeOutcome::no_match("Not DD/MM/YY + suffix pattern"));
        };
        let first = number("day or month", group(def, &caps, 1)?)?;
        let second = number("month or day", group(def, &caps, 2)?)?;
        let yy = number("year", group(def, &caps, 3)?)?;
        let suffix = group(def, &caps, 4)?;

        let interpretations: Vec<_> = resolved(
            ctx.window,
            (first, second, yy),
            0.9,
            self.kind(),
            |order| Format::DateSuffix { order },
        )
        .into_iter()
        .map(|interp| interp.with_suffix(suffix))
        .collect();

        if interpretations.is_empty() {
            return Ok(DecodeOutcome::no_match(format!(
                "Invalid data for DD/MM/YY + suffix in code '{code}'"
            )));
        }
        Ok(DecodeOutcome::matched(
            format!("{} (Suffix: {suffix})", def.description),
            interpretations,
        ))
    }
}
