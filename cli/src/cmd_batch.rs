//! `batchcode batch`: decode a list of codes in parallel.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use batchcode_batch::{BatchEngine, BatchRequest};
use batchcode_core::ExpiryStatus;
use batchcode_patterns::BatchCodeAnalyzer;

use crate::display::DateStyle;

pub fn run(
    analyzer: Arc<BatchCodeAnalyzer>,
    file: Option<&Path>,
    chunk_size: usize,
    as_json: bool,
    style: DateStyle,
) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read codes from '{}'", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read codes from stdin")?;
            buf
        }
    };

    let request = BatchRequest::from_lines(&text)
        .chunk_size(chunk_size)
        .on_progress(|done, total| eprintln!("  decoded {done}/{total}"));
    let report = BatchEngine::new(analyzer).run(request)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{:<16} {:<12} {:>7}  {:<10} FORMAT", "CODE", "EXPIRES", "DAYS", "STATUS");
    for row in report.by_urgency() {
        match (row.result.top(), row.days_to_expiry, row.status) {
            (Some(top), Some(days), Some(status)) => println!(
                "{:<16} {:<12} {:>7}  {:<10} {}",
                row.code,
                style.format(top.expiry_date, false),
                days,
                format!("{status:?}"),
                top.format
            ),
            _ => println!("{:<16} {:<12} {:>7}  {:<10} {}", row.code, "-", "-", "-", row.result.message),
        }
    }

    println!();
    println!(
        "{} codes, {} dated: {} expired, {} critical, {} soon, {} good",
        report.len(),
        report.dated_count(),
        report.count_with_status(ExpiryStatus::Expired),
        report.count_with_status(ExpiryStatus::Critical),
        report.count_with_status(ExpiryStatus::Soon),
        report.count_with_status(ExpiryStatus::Good),
    );
    Ok(())
}
