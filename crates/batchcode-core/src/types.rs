//! Core types for decoded batch-code interpretations.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── DecoderKind ──────────────────────────────────────────────────────────────

/// The decoding rule that produced an interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecoderKind {
    /// Year digit + Julian day + two-digit batch, e.g. `500903`.
    YdddBatch,
    /// Letter + YY + MM + suffix, e.g. `H2401B`.
    PrefixYymmSuffix,
    /// Julian day + YY + 1–3 digit suffix, e.g. `1872417`.
    JulianSuffix,
    /// Day/month (either order) + YY + 1–3 digit suffix.
    DateSuffix,
    /// Julian day or day/month + YY + letters, e.g. `17924AW`.
    DateAlphaSuffix,
    /// Six digits: day/month (either order) + YY.
    DayMonthYear,
    /// DDDYYBB and YYDDD[suffix] legacy layouts.
    Legacy,
    /// Letter + 2–4 digit date + suffix. Lowest priority.
    SpecialPrefix,
}

impl DecoderKind {
    /// Every decoder, most specific first.
    pub const PRIORITY: [DecoderKind; 8] = [
        DecoderKind::YdddBatch,
        DecoderKind::PrefixYymmSuffix,
        DecoderKind::JulianSuffix,
        DecoderKind::DateSuffix,
        DecoderKind::DateAlphaSuffix,
        DecoderKind::DayMonthYear,
        DecoderKind::Legacy,
        DecoderKind::SpecialPrefix,
    ];

    /// Provenance label shown next to an interpretation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::YdddBatch => "YDDD-BB",
            Self::PrefixYymmSuffix => "Prefix-YYMM-Suffix",
            Self::JulianSuffix => "Julian DDDYY+Suffix",
            Self::DateSuffix => "DDMMYY+Suffix",
            Self::DateAlphaSuffix => "Date+Alpha Suffix",
            Self::DayMonthYear => "DDMMYY or MMDDYY",
            Self::Legacy => "Legacy Formats",
            Self::SpecialPrefix => "Special Prefix",
        }
    }
}

impl fmt::Display for DecoderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── FieldOrder ───────────────────────────────────────────────────────────────

/// Which reading of two ambiguous fields a resolved date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOrder {
    DayMonth,
    MonthDay,
    MonthEnd,
}

impl FieldOrder {
    /// Work out which reading produced `date` from `first` and `second`.
    ///
    /// Day/month wins when both readings coincide (e.g. `05/05`).
    pub fn classify(date: NaiveDate, first: u32, second: u32) -> Self {
        if date.day() == first && date.month() == second {
            Self::DayMonth
        } else if date.month() == first && date.day() == second {
            Self::MonthDay
        } else {
            Self::MonthEnd
        }
    }
}

// ─── Format ───────────────────────────────────────────────────────────────────

/// The sub-variant of a pattern an interpretation was read as.
///
/// Rendered through [`fmt::Display`] as the human format label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Format {
    YdddBatch,
    PrefixYymmSuffix,
    JulianSuffix,
    DateSuffix { order: FieldOrder },
    JulianAlphaSuffix,
    DateAlphaSuffix { order: FieldOrder },
    Date { order: FieldOrder },
    LegacyJulianBatch,
    LegacyYearJulian { suffixed: bool },
    SpecialMonthYear { prefix: char, month: u32, yy: u32, suffix: String },
    SpecialParsed { prefix: char, digits: String, suffix: String },
}

impl Format {
    /// The decoder family this format belongs to.
    pub fn family(&self) -> DecoderKind {
        match self {
            Self::YdddBatch => DecoderKind::YdddBatch,
            Self::PrefixYymmSuffix => DecoderKind::PrefixYymmSuffix,
            Self::JulianSuffix => DecoderKind::JulianSuffix,
            Self::DateSuffix { .. } => DecoderKind::DateSuffix,
            Self::JulianAlphaSuffix | Self::DateAlphaSuffix { .. } => DecoderKind::DateAlphaSuffix,
            Self::Date { .. } => DecoderKind::DayMonthYear,
            Self::LegacyJulianBatch | Self::LegacyYearJulian { .. } => DecoderKind::Legacy,
            Self::SpecialMonthYear { .. } | Self::SpecialParsed { .. } => DecoderKind::SpecialPrefix,
        }
    }

    /// Julian day followed by a two-digit year (DDDYY...).
    ///
    /// When one of these is present, a competing `YDDD BB` reading of the
    /// same digits is discarded.
    pub fn is_julian_year_family(&self) -> bool {
        matches!(
            self,
            Self::JulianSuffix | Self::JulianAlphaSuffix | Self::LegacyJulianBatch
        )
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::YdddBatch => f.write_str("YDDD BB"),
            Self::PrefixYymmSuffix => f.write_str("Prefix-YYMM-Suffix"),
            Self::JulianSuffix => f.write_str("Julian DDDYY + Suffix"),
            Self::DateSuffix { order } => f.write_str(match order {
                FieldOrder::DayMonth => "DD/MM/YY + suffix",
                FieldOrder::MonthDay => "MM/DD/YY + suffix",
                FieldOrder::MonthEnd => "Parsed Date (MM/YY?) + suffix",
            }),
            Self::JulianAlphaSuffix => f.write_str("Julian DDDYY + Alpha Suffix"),
            Self::DateAlphaSuffix { order } => f.write_str(match order {
                FieldOrder::DayMonth => "DDMMYY + Alpha Suffix",
                FieldOrder::MonthDay => "MMDDYY + Alpha Suffix",
                FieldOrder::MonthEnd => "MMYY (End of Month) + Alpha Suffix",
            }),
            Self::Date { order } => f.write_str(match order {
                FieldOrder::DayMonth => "DD/MM/YY",
                FieldOrder::MonthDay => "MM/DD/YY",
                FieldOrder::MonthEnd => "MM/YY (End of Month)",
            }),
            Self::LegacyJulianBatch => f.write_str("Legacy DDDYYBB (Julian)"),
            Self::LegacyYearJulian { suffixed } => {
                f.write_str("Legacy YYDDD (Julian)")?;
                if *suffixed {
                    f.write_str(" + Suffix")?;
                }
                Ok(())
            }
            Self::SpecialMonthYear { prefix, month, yy, suffix } => write!(
                f,
                "Special Prefix ({prefix}) + MMYY ({month:02}/{yy:02}) + Suffix ({suffix})"
            ),
            Self::SpecialParsed { prefix, digits, suffix } => write!(
                f,
                "Special Prefix ({prefix}) + Parsed({digits}) + Suffix ({suffix})"
            ),
        }
    }
}

// ─── ExpiryStatus / ConfidenceBand ────────────────────────────────────────────

/// How urgent an expiry date is relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    Expired,
    /// Expires within 30 days.
    Critical,
    /// Expires within 90 days.
    Soon,
    Good,
}

impl ExpiryStatus {
    pub fn classify(days_to_expiry: i64) -> Self {
        match days_to_expiry {
            d if d < 0 => Self::Expired,
            d if d <= 30 => Self::Critical,
            d if d <= 90 => Self::Soon,
            _ => Self::Good,
        }
    }

    /// Human sentence, e.g. "Expires in 12 days (Critical)".
    pub fn describe(&self, days_to_expiry: i64) -> String {
        match self {
            Self::Expired => format!("Expired {} days ago", days_to_expiry.unsigned_abs()),
            Self::Critical => format!("Expires in {days_to_expiry} days (Critical)"),
            Self::Soon => format!("Expires in {days_to_expiry} days (Soon)"),
            Self::Good => format!("Expires in {days_to_expiry} days (Good)"),
        }
    }
}

/// Coarse bucket for a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence >= 0.85 {
            Self::VeryHigh
        } else if confidence >= 0.70 {
            Self::High
        } else if confidence >= 0.50 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        })
    }
}

// ─── Interpretation ───────────────────────────────────────────────────────────

/// One dated reading of a batch code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub production_date: NaiveDate,
    /// Production date + shelf life (Feb 29 collapses to Feb 28).
    pub expiry_date: NaiveDate,
    /// Decode confidence [0.0, 1.0].
    pub confidence: f32,
    pub format: Format,

    /// Opaque two-digit batch id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha_suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub julian_day: Option<u32>,

    /// Decoder that produced this reading.
    pub source: DecoderKind,
    /// The decoder's parsing message.
    #[serde(default)]
    pub message: String,
}

/// Identity of an interpretation for de-duplication across decoders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterpretationKey {
    production_date: NaiveDate,
    expiry_date: NaiveDate,
    format_label: String,
    suffix: Option<String>,
    batch: Option<String>,
    prefix: Option<char>,
}

impl Interpretation {
    pub fn new(
        production_date: NaiveDate,
        expiry_date: NaiveDate,
        confidence: f32,
        format: Format,
        source: DecoderKind,
    ) -> Self {
        Self {
            production_date,
            expiry_date,
            confidence,
            format,
            batch: None,
            suffix: None,
            alpha_suffix: None,
            prefix: None,
            julian_day: None,
            source,
            message: String::new(),
        }
    }

    pub fn with_batch(mut self, batch: impl Into<String>) -> Self {
        self.batch = Some(batch.into());
        self
    }

    /// Set the suffix; an empty suffix is recorded as absent.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.suffix = (!suffix.is_empty()).then_some(suffix);
        self
    }

    pub fn with_alpha_suffix(mut self, alpha_suffix: impl Into<String>) -> Self {
        self.alpha_suffix = Some(alpha_suffix.into());
        self
    }

    pub fn with_prefix(mut self, prefix: char) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn with_julian_day(mut self, julian_day: u32) -> Self {
        self.julian_day = Some(julian_day);
        self
    }

    pub fn format_label(&self) -> String {
        self.format.label()
    }

    pub fn key(&self) -> InterpretationKey {
        InterpretationKey {
            production_date: self.production_date,
            expiry_date: self.expiry_date,
            format_label: self.format.label(),
            suffix: self.suffix.clone(),
            batch: self.batch.clone(),
            prefix: self.prefix,
        }
    }

    /// Days from `today` until expiry; negative once expired.
    pub fn days_to_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }

    pub fn expiry_status(&self, today: NaiveDate) -> ExpiryStatus {
        ExpiryStatus::classify(self.days_to_expiry(today))
    }

    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: produced {}, expires {} ({:.0}%)",
            self.format,
            self.production_date,
            self.expiry_date,
            self.confidence * 100.0
        )
    }
}

// ─── AnalysisResult ───────────────────────────────────────────────────────────

/// Outcome of analysing one code: ranked interpretations or a reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub success: bool,
    pub message: String,
    /// Ordered by confidence, highest first.
    pub interpretations: Vec<Interpretation>,
}

impl AnalysisResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            interpretations: Vec::new(),
        }
    }

    /// Successful result; the message counts the interpretations.
    pub fn found(interpretations: Vec<Interpretation>) -> Self {
        let n = interpretations.len();
        Self {
            success: true,
            message: format!(
                "Found {n} valid interpretation{}",
                if n == 1 { "" } else { "s" }
            ),
            interpretations,
        }
    }

    /// The highest-confidence interpretation, if any.
    pub fn top(&self) -> Option<&Interpretation> {
        self.interpretations.first()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn field_order_prefers_day_month_when_equal() {
        assert_eq!(FieldOrder::classify(date(2024, 5, 5), 5, 5), FieldOrder::DayMonth);
        assert_eq!(FieldOrder::classify(date(2024, 5, 20), 5, 20), FieldOrder::MonthDay);
        assert_eq!(FieldOrder::classify(date(2024, 1, 20), 20, 1), FieldOrder::DayMonth);
        assert_eq!(FieldOrder::classify(date(2024, 5, 31), 5, 24), FieldOrder::MonthEnd);
    }

    #[test]
    fn format_labels() {
        assert_eq!(Format::YdddBatch.to_string(), "YDDD BB");
        assert_eq!(
            Format::DateSuffix { order: FieldOrder::MonthEnd }.to_string(),
            "Parsed Date (MM/YY?) + suffix"
        );
        assert_eq!(
            Format::LegacyYearJulian { suffixed: true }.to_string(),
            "Legacy YYDDD (Julian) + Suffix"
        );
        assert_eq!(
            Format::SpecialMonthYear {
                prefix: 'H',
                month: 7,
                yy: 24,
                suffix: "A".into()
            }
            .to_string(),
            "Special Prefix (H) + MMYY (07/24) + Suffix (A)"
        );
    }

    #[test]
    fn julian_year_family() {
        assert!(Format::JulianSuffix.is_julian_year_family());
        assert!(Format::JulianAlphaSuffix.is_julian_year_family());
        assert!(Format::LegacyJulianBatch.is_julian_year_family());
        assert!(!Format::YdddBatch.is_julian_year_family());
        assert!(!Format::LegacyYearJulian { suffixed: false }.is_julian_year_family());
    }

    #[test]
    fn every_format_maps_to_a_decoder() {
        assert_eq!(Format::JulianAlphaSuffix.family(), DecoderKind::DateAlphaSuffix);
        assert_eq!(Format::Date { order: FieldOrder::DayMonth }.family(), DecoderKind::DayMonthYear);
        assert_eq!(Format::LegacyJulianBatch.family(), DecoderKind::Legacy);
    }

    #[test]
    fn expiry_status_thresholds() {
        assert_eq!(ExpiryStatus::classify(-1), ExpiryStatus::Expired);
        assert_eq!(ExpiryStatus::classify(0), ExpiryStatus::Critical);
        assert_eq!(ExpiryStatus::classify(30), ExpiryStatus::Critical);
        assert_eq!(ExpiryStatus::classify(31), ExpiryStatus::Soon);
        assert_eq!(ExpiryStatus::classify(90), ExpiryStatus::Soon);
        assert_eq!(ExpiryStatus::classify(91), ExpiryStatus::Good);
        assert_eq!(ExpiryStatus::Expired.describe(-12), "Expired 12 days ago");
    }

    #[test]
    fn confidence_bands() {
        assert_eq!(ConfidenceBand::from_confidence(0.98), ConfidenceBand::VeryHigh);
        assert_eq!(ConfidenceBand::from_confidence(0.85), ConfidenceBand::VeryHigh);
        assert_eq!(ConfidenceBand::from_confidence(0.75), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_confidence(0.5), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_confidence(0.1), ConfidenceBand::Low);
    }

    #[test]
    fn empty_suffix_is_absent() {
        let i = Interpretation::new(
            date(2024, 5, 2),
            date(2027, 5, 2),
            0.8,
            Format::LegacyYearJulian { suffixed: false },
            DecoderKind::Legacy,
        )
        .with_suffix("");
        assert_eq!(i.suffix, None);
    }

    #[test]
    fn found_message_pluralises() {
        assert_eq!(AnalysisResult::found(vec![]).message, "Found 0 valid interpretations");
        let one = Interpretation::new(
            date(2024, 5, 2),
            date(2027, 5, 2),
            0.95,
            Format::JulianSuffix,
            DecoderKind::JulianSuffix,
        );
        assert_eq!(AnalysisResult::found(vec![one]).message, "Found 1 valid interpretation");
    }

    #[test]
    fn interpretation_serde_roundtrip() {
        let i = Interpretation::new(
            date(2024, 7, 31),
            date(2027, 7, 31),
            0.75,
            Format::SpecialMonthYear {
                prefix: 'H',
                month: 7,
                yy: 24,
                suffix: "A".into(),
            },
            DecoderKind::SpecialPrefix,
        )
        .with_prefix('H')
        .with_suffix("A");
        let json = serde_json::to_string(&i).unwrap();
        let back: Interpretation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, i);
        assert!(!json.contains("batch"));
    }
}
