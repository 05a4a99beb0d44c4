//! Golden fixture integration tests for batchcode-patterns.
//!
//! Each fixture in `fixtures/codes/` pins `today`, names a raw code and lists
//! the expected interpretations in ranked order.

use batchcode_core::{AnalysisResult, FixedClock, PatternRegistry};
use batchcode_patterns::BatchCodeAnalyzer;
use chrono::NaiveDate;
use serde::Deserialize;

// ─── Helpers ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Fixture {
    code: String,
    today: NaiveDate,
    expected_success: bool,
    expected_message: String,
    expected_interpretations: Vec<Expected>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Expected {
    format: String,
    production_date: NaiveDate,
    expiry_date: NaiveDate,
    confidence: f64,
    suffix: Option<String>,
    batch: Option<String>,
    alpha_suffix: Option<String>,
    prefix: Option<String>,
    julian_day: Option<u32>,
}

fn fixture_path(name: &str) -> std::path::PathBuf {
    let mut p = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("../../fixtures/codes");
    p.push(name);
    p
}

fn load_fixture(name: &str) -> Fixture {
    let content = std::fs::read_to_string(fixture_path(name)).expect("fixture not found");
    serde_json::from_str(&content).expect("invalid fixture JSON")
}

fn analyze_fixture(f: &Fixture) -> AnalysisResult {
    BatchCodeAnalyzer::new()
        .with_clock(FixedClock(f.today))
        .analyze(&f.code)
}

fn check(name: &str) {
    let f = load_fixture(name);
    let result = analyze_fixture(&f);

    assert_eq!(result.success, f.expected_success, "{name}: success flag");
    assert_eq!(result.message, f.expected_message, "{name}: message");
    assert_eq!(
        result.interpretations.len(),
        f.expected_interpretations.len(),
        "{name}: interpretation count, got {:#?}",
        result.interpretations
    );

    for (i, (got, want)) in result
        .interpretations
        .iter()
        .zip(&f.expected_interpretations)
        .enumerate()
    {
        assert_eq!(got.format.label(), want.format, "{name}[{i}]: format");
        assert_eq!(got.production_date, want.production_date, "{name}[{i}]: production");
        assert_eq!(got.expiry_date, want.expiry_date, "{name}[{i}]: expiry");
        assert_eq!(got.confidence, want.confidence as f32, "{name}[{i}]: confidence");
        assert_eq!(got.suffix, want.suffix, "{name}[{i}]: suffix");
        assert_eq!(got.batch, want.batch, "{name}[{i}]: batch");
        assert_eq!(got.alpha_suffix, want.alpha_suffix, "{name}[{i}]: alpha suffix");
        assert_eq!(
            got.prefix.map(String::from),
            want.prefix,
            "{name}[{i}]: prefix"
        );
        assert_eq!(got.julian_day, want.julian_day, "{name}[{i}]: julian day");
    }
}

// ─── YDDD BB ──────────────────────────────────────────────────────────────────

#[test]
fn golden_yddd_batch() {
    check("yddd-batch.json");
}

#[test]
fn golden_yddd_batch_later_day() {
    check("yddd-batch-2.json");
}

// ─── Julian DDDYY ─────────────────────────────────────────────────────────────

#[test]
fn golden_julian_suffix_three_digit() {
    check("julian-suffix-three-digit.json");
}

#[test]
fn golden_julian_suffix_with_legacy_readings() {
    check("julian-suffix-legacy-overlap.json");
}

#[test]
fn golden_julian_suffix_short() {
    check("julian-suffix-short.json");
}

#[test]
fn golden_julian_alpha_suffix() {
    check("julian-alpha-suffix.json");
}

#[test]
fn golden_legacy_yyddd_alpha() {
    check("legacy-yyddd-alpha.json");
}

// ─── Day / month readings ─────────────────────────────────────────────────────

#[test]
fn golden_date_alpha_suffix() {
    check("date-alpha-suffix.json");
}

#[test]
fn golden_ddmmyy_ambiguous() {
    check("ddmmyy-ambiguous.json");
}

#[test]
fn golden_ddmmyy_three_readings() {
    check("ddmmyy-three-readings.json");
}

#[test]
fn golden_date_suffix_leap_day() {
    check("date-suffix-leap-day.json");
}

// ─── Prefixed codes ───────────────────────────────────────────────────────────

#[test]
fn golden_prefix_yymm_suffix() {
    check("prefix-yymm-suffix.json");
}

#[test]
fn golden_special_prefix() {
    check("special-prefix.json");
}

#[test]
fn golden_special_prefix_undatable() {
    check("special-prefix-undatable.json");
}

// ─── Normalisation ────────────────────────────────────────────────────────────

#[test]
fn golden_separators() {
    check("separators.json");
}

#[test]
fn golden_empty_after_cleaning() {
    check("empty-after-cleaning.json");
}

// ─── Registry examples ────────────────────────────────────────────────────────

#[test]
fn every_registry_example_decodes_to_its_own_family() {
    let analyzer = BatchCodeAnalyzer::new()
        .with_clock(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()));
    for def in PatternRegistry::global().iter() {
        for example in def.examples {
            let result = analyzer.analyze(example);
            assert!(result.success, "{example} ({}) failed: {}", def.key, result.message);
            assert!(
                result
                    .interpretations
                    .iter()
                    .any(|i| i.format.family() == def.decoder),
                "{example}: no {} interpretation in {:?}",
                def.decoder,
                result.interpretations
            );
        }
    }
}
