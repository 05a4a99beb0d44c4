//! Human-readable rendering of analysis results.

use batchcode_core::{AnalysisResult, Interpretation};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Calendar date layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    /// DD/MM/YYYY
    #[default]
    Uk,
    /// MM/DD/YYYY
    Us,
}

impl DateStyle {
    pub fn format(&self, date: NaiveDate, weekday: bool) -> String {
        let pattern = match (self, weekday) {
            (Self::Uk, false) => "%d/%m/%Y",
            (Self::Us, false) => "%m/%d/%Y",
            (Self::Uk, true) => "%a %d/%m/%Y",
            (Self::Us, true) => "%a %m/%d/%Y",
        };
        date.format(pattern).to_string()
    }
}

/// Rendering options for one run.
#[derive(Debug, Clone, Copy)]
pub struct View {
    pub style: DateStyle,
    pub weekday: bool,
    pub today: NaiveDate,
}

impl View {
    fn date(&self, date: NaiveDate) -> String {
        self.style.format(date, self.weekday)
    }
}

pub fn render_interpretation(rank: usize, interp: &Interpretation, view: &View) -> String {
    let days = interp.days_to_expiry(view.today);
    let mut lines = vec![
        format!(
            "  [{rank}] {}  (confidence {:.0}%, {})",
            interp.format,
            interp.confidence * 100.0,
            interp.confidence_band()
        ),
        format!("      Produced:  {}", view.date(interp.production_date)),
        format!(
            "      Expires:   {}  ({})",
            view.date(interp.expiry_date),
            interp.expiry_status(view.today).describe(days)
        ),
    ];
    let optional = [
        ("Batch", interp.batch.clone()),
        ("Suffix", interp.suffix.clone()),
        ("Letters", interp.alpha_suffix.clone()),
        ("Prefix", interp.prefix.map(String::from)),
        ("Julian", interp.julian_day.map(|d| d.to_string())),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            lines.push(format!("      {:<10} {value}", format!("{label}:")));
        }
    }
    if interp.message.is_empty() {
        lines.push(format!("      Source:    {}", interp.source));
    } else {
        lines.push(format!("      Source:    {} ({})", interp.source, interp.message));
    }
    lines.join("\n")
}

pub fn render_result(code: &str, result: &AnalysisResult, view: &View) -> String {
    let mut out = format!("{code}: {}", result.message);
    for (i, interp) in result.interpretations.iter().enumerate() {
        out.push('\n');
        out.push_str(&render_interpretation(i + 1, interp, view));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchcode_core::{DecoderKind, Format};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_styles() {
        let d = date(2024, 5, 20);
        assert_eq!(DateStyle::Uk.format(d, false), "20/05/2024");
        assert_eq!(DateStyle::Us.format(d, false), "05/20/2024");
        assert_eq!(DateStyle::Uk.format(d, true), "Mon 20/05/2024");
    }

    #[test]
    fn renders_optional_fields_present_only() {
        let interp = Interpretation::new(
            date(2025, 1, 9),
            date(2028, 1, 9),
            0.98,
            Format::YdddBatch,
            DecoderKind::YdddBatch,
        )
        .with_batch("03")
        .with_julian_day(9);
        let view = View {
            style: DateStyle::Uk,
            weekday: false,
            today: date(2026, 10, 18),
        };
        let text = render_interpretation(1, &interp, &view);
        assert!(text.starts_with("  [1] YDDD BB  (confidence 98%, Very High)"));
        assert!(text.contains("Produced:  09/01/2025"));
        assert!(text.contains("Expires in 448 days (Good)"));
        assert!(text.contains("Batch:     03"));
        assert!(text.contains("Julian:    9"));
        assert!(!text.contains("Suffix:"));
    }

    #[test]
    fn style_parses_from_yaml() {
        let style: DateStyle = serde_yaml::from_str("us").unwrap();
        assert_eq!(style, DateStyle::Us);
    }
}
