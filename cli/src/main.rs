//! batchcode CLI: decode cosmetic batch codes into production and expiry dates.
//!
//! # Commands
//! ```text
//! batchcode analyze   <CODE>... [--json] [--weekday]
//! batchcode batch     [--file <path>] [--json] [--chunk-size <N>]
//! batchcode patterns  [--json]
//! batchcode selftest
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use batchcode_core::FixedClock;
use batchcode_observability::init_tracing;
use batchcode_patterns::BatchCodeAnalyzer;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};

mod cmd_batch;
mod cmd_selftest;
mod config;
mod display;

use config::AppConfig;
use display::{render_result, DateStyle, View};

#[derive(Parser)]
#[command(
    name = "batchcode",
    about = "Cosmetic batch code decoder",
    long_about = "
Decode manufacturer batch codes into production dates and estimated expiry
dates. Every plausible reading is listed, most confident first.

ENVIRONMENT VARIABLES:
  BATCHCODE_LOG    Log level override (trace|debug|info|warn|error)
",
    version
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Analyse as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Date layout for human-readable output
    #[arg(long, value_enum, global = true)]
    date_style: Option<DateStyle>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one or more batch codes
    Analyze {
        /// Batch codes, e.g. 500903 H2401B
        #[arg(required = true)]
        codes: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Show weekday names next to dates
        #[arg(long)]
        weekday: bool,
    },

    /// Decode many codes, one per line, in parallel
    Batch {
        /// Input file (default: stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Codes per progress update
        #[arg(long, default_value_t = 1000)]
        chunk_size: usize,
    },

    /// List the bundled pattern registry
    Patterns {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode every registry example and the historical samples
    Selftest,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(
        cli.today,
        cli.date_style,
        cli.verbose,
    );
    init_tracing(&config.log);

    let analyzer = build_analyzer(&config);

    match cli.command {
        Commands::Analyze { codes, json, weekday } => {
            cmd_analyze(&analyzer, &codes, json, weekday, config.date_style)
        }
        Commands::Batch { file, json, chunk_size } => {
            cmd_batch::run(Arc::new(analyzer), file.as_deref(), chunk_size, json, config.date_style)
        }
        Commands::Patterns { json } => cmd_patterns(&analyzer, json),
        Commands::Selftest => cmd_selftest::run(&analyzer),
    }
}

fn build_analyzer(config: &AppConfig) -> BatchCodeAnalyzer {
    let analyzer = BatchCodeAnalyzer::new().with_policy(config.policy.clone());
    match config.today {
        Some(today) => analyzer.with_clock(FixedClock(today)),
        None => analyzer,
    }
}

// ─── Command implementations ─────────────────────────────────────────────────

fn cmd_analyze(
    analyzer: &BatchCodeAnalyzer,
    codes: &[String],
    as_json: bool,
    weekday: bool,
    style: DateStyle,
) -> Result<()> {
    let window = analyzer.window();
    let results: Vec<_> = codes
        .iter()
        .map(|code| (code.as_str(), analyzer.analyze_at(code, &window)))
        .collect();

    if as_json {
        let map: serde_json::Map<String, serde_json::Value> = results
            .iter()
            .map(|(code, result)| Ok((code.to_string(), serde_json::to_value(result)?)))
            .collect::<Result<_, serde_json::Error>>()?;
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    let view = View {
        style,
        weekday,
        today: window.today(),
    };
    for (i, (code, result)) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", render_result(code, result, &view));
    }
    Ok(())
}

fn cmd_patterns(analyzer: &BatchCodeAnalyzer, as_json: bool) -> Result<()> {
    let registry = analyzer.registry();

    if as_json {
        let entries: Vec<_> = registry
            .iter()
            .map(|def| {
                serde_json::json!({
                    "key": def.key,
                    "decoder": def.decoder.name(),
                    "regex": def.grammar().as_str(),
                    "description": def.description,
                    "examples": def.examples,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{} patterns:", registry.len());
    for def in registry.iter() {
        println!("  {:<20} {:<22} {}", def.key, def.decoder.name(), def.grammar().as_str());
        println!("  {:<20} {}", "", def.description);
        println!("  {:<20} e.g. {}", "", def.examples.join(", "));
    }
    Ok(())
}
