//! `batchcode selftest`: decode every registry example and the historical samples.

use anyhow::{bail, Result};
use batchcode_core::DecoderKind;
use batchcode_patterns::BatchCodeAnalyzer;

/// Codes from older pattern tables that decode under a different family
/// (or not at all) with the current rules.
const HISTORICAL_SAMPLES: &[&str] = &["27124128", "22924124", "25624125", "202401", "212306", "H1619A"];

struct Check {
    code: String,
    expected: Option<DecoderKind>,
    top: Option<DecoderKind>,
    count: usize,
}

impl Check {
    fn passed(&self) -> bool {
        match self.expected {
            Some(kind) => self.top == Some(kind),
            None => true,
        }
    }
}

pub fn run(analyzer: &BatchCodeAnalyzer) -> Result<()> {
    let window = analyzer.window();
    let mut checks = Vec::new();

    for def in analyzer.registry().iter() {
        for code in def.examples {
            checks.push((code.to_string(), Some(def.decoder)));
        }
    }
    checks.extend(HISTORICAL_SAMPLES.iter().map(|code| (code.to_string(), None)));

    let checks: Vec<Check> = checks
        .into_iter()
        .map(|(code, expected)| {
            let result = analyzer.analyze_at(&code, &window);
            Check {
                top: result.top().map(|i| i.format.family()),
                count: result.interpretations.len(),
                code,
                expected,
            }
        })
        .collect();

    println!("Self-test (today {})", window.today());
    for check in &checks {
        let mark = if check.passed() { "✓" } else { "✗" };
        let top = check.top.map_or("no match", |kind| kind.name());
        let origin = if check.expected.is_some() { "example" } else { "historical" };
        println!(
            "  {mark} {:<10} {:<10} {:<22} ({} reading(s))",
            check.code, origin, top, check.count
        );
    }

    let failed: Vec<_> = checks.iter().filter(|c| !c.passed()).map(|c| c.code.as_str()).collect();
    if !failed.is_empty() {
        bail!("{} registry example(s) did not decode to their own family: {}", failed.len(), failed.join(", "));
    }
    println!("\nAll {} registry examples decoded to their own family.", checks.len() - HISTORICAL_SAMPLES.len());
    Ok(())
}
