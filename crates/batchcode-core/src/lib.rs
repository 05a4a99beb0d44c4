//! batchcode-core: foundation types and traits for the BatchCode decoder.
//!
//! This crate defines:
//! - [`Interpretation`]: one dated reading of a batch code
//! - [`Format`] / [`DecoderKind`]: what produced a reading and how it is labelled
//! - [`DateWindow`]: the "today"-relative policy every decoder checks against
//! - [`parse_date_variants`]: the shared ambiguous day/month/year resolver
//! - [`PatternRegistry`]: the static table of known code grammars
//! - [`PatternDecoder`]: the trait every pattern decoder implements

pub mod calendar;
pub mod decoder;
pub mod error;
pub mod policy;
pub mod registry;
pub mod resolver;
pub mod types;

pub use decoder::{DecodeContext, DecodeOutcome, PatternDecoder};
pub use error::{DateError, DecodeError};
pub use policy::{Clock, DatePolicy, DateWindow, FixedClock, SystemClock};
pub use registry::{PatternDefinition, PatternRegistry};
pub use resolver::parse_date_variants;
pub use types::{
    AnalysisResult, ConfidenceBand, DecoderKind, ExpiryStatus, FieldOrder, Format, Interpretation,
};
