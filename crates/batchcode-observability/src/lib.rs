//! # batchcode-observability
//!
//! Structured logging for the BatchCode decoder.
//!
//! Decoders log per-candidate rejections at `debug`, deliberately
//! unsupported layouts at `warn` and decoder faults at `error`. Batch runs
//! log start and finish at `info`. Levels are configurable per crate, and
//! output is either human-readable or JSON lines on stderr.

pub mod tracing_setup;

pub use tracing_setup::{directives, init_tracing, LogConfig, LOG_ENV_VAR};
