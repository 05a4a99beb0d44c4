//! # batchcode-batch
//!
//! Analyse many batch codes in one run.
//!
//! ## Features
//! - CPU-parallel analysis via Rayon, in bounded chunks
//! - One "today" snapshot shared by every code in the run
//! - Progress callbacks (for progress bars)
//! - Urgency ordering by days to expiry
//!
//! ## Usage
//! ```no_run
//! use std::sync::Arc;
//! use batchcode_batch::{BatchEngine, BatchRequest};
//! use batchcode_patterns::BatchCodeAnalyzer;
//!
//! let engine = BatchEngine::new(Arc::new(BatchCodeAnalyzer::new()));
//! let report = engine.run(BatchRequest::from_lines("500903\nH2401B\n")).unwrap();
//! for row in report.by_urgency() {
//!     println!("{} {:?}", row.code, row.days_to_expiry);
//! }
//! ```

pub mod engine;
pub mod error;
pub mod report;
pub mod request;

pub use engine::BatchEngine;
pub use error::BatchError;
pub use report::{BatchReport, BatchRow};
pub use request::BatchRequest;
