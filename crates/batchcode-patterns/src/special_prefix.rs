//! Lowest-priority fallback: a letter, a 2–4 digit date run and a tail.
//!
//! Only 4-digit runs are decoded. They are read both as `MMYY` (month end)
//! and through the candidate resolver, then reduced to one reading per
//! production date.

use batchcode_core::calendar::month_end;
use batchcode_core::registry::keys;
use batchcode_core::{
    DecodeContext, DecodeError, DecodeOutcome, DecoderKind, Format, Interpretation, PatternDecoder,
};
use tracing::{debug, warn};

use crate::support::{dated, group, number, resolved};

#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialPrefixDecoder;

impl SpecialPrefixDecoder {
    fn month_year(
        &self,
        ctx: &DecodeContext<'_>,
        (month, yy): (u32, u32),
        prefix: char,
        suffix: &str,
    ) -> Option<Interpretation> {
        let window = ctx.window;
        let year = window.resolve_two_digit_year(yy).ok()?;
        if !(1..=12).contains(&month) || !window.accepts_production_year(year) {
            return None;
        }
        let production = month_end(year, month)
            .map_err(|e| debug!(month, year, error = %e, "special-prefix MMYY rejected"))
            .ok()?;
        if production > window.latest_production_date() {
            return None;
        }
        let format = Format::SpecialMonthYear {
            prefix,
            month,
            yy,
            suffix: suffix.to_string(),
        };
        dated(window, production, 0.75, format, self.kind())
    }
}

impl PatternDecoder for SpecialPrefixDecoder {
    fn kind(&self) -> DecoderKind {
        DecoderKind::SpecialPrefix
    }

    fn decode(&self, code: &str, ctx: &DecodeContext<'_>) -> Result<DecodeOutcome, DecodeError> {
        let def = ctx.registry.require(keys::SPECIAL_PREFIX)?;
        let Some(caps) = def.captures(code) else {
            return Ok(DecodeOutcome::no_match("Not special prefix pattern"));
        };
        let prefix_str = group(def, &caps, 1)?;
        let digits = group(def, &caps, 2)?;
        let suffix = group(def, &caps, 3)?;
        let prefix = prefix_str.chars().next().unwrap_or_default();

        let mut results = Vec::new();
        match digits.len() {
            4 => {
                let (head, tail) = digits.split_at(2);
                let first = number("month", head)?;
                let yy = number("year", tail)?;
                results.extend(self.month_year(ctx, (first, yy), prefix, suffix));

                let parsed = resolved(ctx.window, (first, yy, yy), 0.70, self.kind(), |_| {
                    Format::SpecialParsed {
                        prefix,
                        digits: digits.to_string(),
                        suffix: suffix.to_string(),
                    }
                });
                results.extend(parsed);
            }
            3 => warn!(code, date_part = digits, "3-digit special-prefix date part is ambiguous"),
            _ => warn!(code, date_part = digits, "2-digit special-prefix date part is not decoded"),
        }

        results.sort_by_key(|interp| interp.production_date);
        results.dedup_by_key(|interp| interp.production_date);
        let results: Vec<_> = results
            .into_iter()
            .map(|interp| interp.with_prefix(prefix).with_suffix(suffix))
            .collect();

        if results.is_empty() {
            return Ok(DecodeOutcome::no_match(format!(
                "Invalid data for special prefix in code '{code}'"
            )));
        }
        Ok(DecodeOutcome::matched(
            format!("Special Prefix (Prefix: {prefix}, Suffix: {suffix})"),
            results,
        ))
    }
}
