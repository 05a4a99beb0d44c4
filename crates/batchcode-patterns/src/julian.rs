//! `Julian DDDYY + Suffix`: day of year, two-digit year, 1–3 digit suffix.

use batchcode_core::registry::keys;
use batchcode_core::{
    DecodeContext, DecodeError, DecodeOutcome, DecoderKind, Format, PatternDecoder,
};
use tracing::debug;

use crate::support::{dated, group, julian_production, number, Rejected};

#[derive(Debug, Clone, Copy, Default)]
pub struct JulianSuffixDecoder;

impl PatternDecoder for JulianSuffixDecoder {
    fn kind(&self) -> DecoderKind {
        DecoderKind::JulianSuffix
    }

    fn decode(&self, code: &str, ctx: &DecodeContext<'_>) -> Result<DecodeOutcome, DecodeError> {
        let def = ctx.registry.require(keys::JULIAN_WITH_SUFFIX)?;
        let Some(caps) = def.captures(code) else {
            return Ok(DecodeOutcome::no_match("Not Julian DDDYY + Suffix pattern"));
        };
        let ddd = number("julian day", group(def, &caps, 1)?)?;
        let yy = number("year", group(def, &caps, 2)?)?;
        let suffix = group(def, &caps, 3)?;

        let invalid = || {
            DecodeOutcome::no_match(format!("Invalid data for Julian DDDYY + Suffix in code '{code}'"))
        };
        let (year, production) = match julian_production(ctx.window, yy, ddd) {
            Ok(found) => found,
            Err(Rejected::YearOutOfRange(year)) => {
                return Ok(DecodeOutcome::no_match(format!(
                    "Year {year} out of range for Julian DDDYY + Suffix"
                )));
            }
            Err(e) => {
                debug!(code, error = %e, "Julian DDDYY candidate rejected");
                return Ok(invalid());
            }
        };
        let Some(interp) = dated(ctx.window, production, 0.95, Format::JulianSuffix, self.kind()) else {
            return Ok(invalid());
        };

        Ok(DecodeOutcome::matched(
            format!("{} (Julian {ddd}/{year}, Suffix: {suffix})", def.description),
            vec![interp.with_julian_day(ddd).with_suffix(suffix)],
        ))
    }
}
