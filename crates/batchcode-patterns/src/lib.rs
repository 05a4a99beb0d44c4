//! batchcode-patterns: the eight batch-code decoders and the analyzer that
//! runs them.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use batchcode_patterns::BatchCodeAnalyzer;
//!
//! let analyzer = BatchCodeAnalyzer::new();
//! let result = analyzer.analyze("17924AW");
//! if let Some(top) = result.top() {
//!     println!("{top}");  // "Julian DDDYY + Alpha Suffix: produced 2024-06-27, ..."
//! }
//! ```

pub mod alpha_suffix;
pub mod analyzer;
pub mod date_suffix;
pub mod day_month;
pub mod julian;
pub mod legacy;
pub mod prefix_yymm;
pub mod special_prefix;
mod support;
pub mod yddd;

pub use alpha_suffix::DateAlphaSuffixDecoder;
pub use analyzer::{default_decoders, normalize, BatchCodeAnalyzer};
pub use date_suffix::DateSuffixDecoder;
pub use day_month::DayMonthYearDecoder;
pub use julian::JulianSuffixDecoder;
pub use legacy::LegacyDecoder;
pub use prefix_yymm::PrefixYymmSuffixDecoder;
pub use special_prefix::SpecialPrefixDecoder;
pub use yddd::YdddBatchDecoder;
