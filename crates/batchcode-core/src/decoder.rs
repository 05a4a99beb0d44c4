//! The `PatternDecoder` trait, implemented once per batch-code family.

use crate::error::DecodeError;
use crate::policy::DateWindow;
use crate::registry::PatternRegistry;
use crate::types::{DecoderKind, Interpretation};

/// What a decoder made of one normalised code.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOutcome {
    /// `true` only when at least one interpretation survived.
    pub matched: bool,
    /// Diagnostic on failure, parsing summary on success.
    pub message: String,
    pub interpretations: Vec<Interpretation>,
}

impl DecodeOutcome {
    /// The code did not fit, or every candidate was rejected.
    pub fn no_match(message: impl Into<String>) -> Self {
        Self {
            matched: false,
            message: message.into(),
            interpretations: Vec::new(),
        }
    }

    /// Wrap decoded interpretations; an empty list is reported as no match.
    pub fn matched(message: impl Into<String>, interpretations: Vec<Interpretation>) -> Self {
        Self {
            matched: !interpretations.is_empty(),
            message: message.into(),
            interpretations,
        }
    }
}

/// Inputs shared by every decoder during one analysis.
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'a> {
    /// "Today" and the date policy, fixed for the whole analysis.
    pub window: &'a DateWindow,
    pub registry: &'a PatternRegistry,
}

impl<'a> DecodeContext<'a> {
    pub fn new(window: &'a DateWindow, registry: &'a PatternRegistry) -> Self {
        Self { window, registry }
    }
}

/// A batch-code pattern decoder.
///
/// Implementations are stateless and must be `Send + Sync` so one analyzer
/// can serve many threads.
pub trait PatternDecoder: Send + Sync {
    /// Which family this decoder handles.
    fn kind(&self) -> DecoderKind;

    /// Decode a normalised (trimmed, uppercased, separator-free) code.
    ///
    /// Structural mismatches and rejected candidates are reported through
    /// [`DecodeOutcome::no_match`]. `Err` is reserved for faults unrelated
    /// to the code itself, such as a grammar missing from the registry.
    fn decode(&self, code: &str, ctx: &DecodeContext<'_>) -> Result<DecodeOutcome, DecodeError>;
}
