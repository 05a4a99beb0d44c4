//! `BatchCodeAnalyzer`: runs every decoder over a code and ranks the results.
//!
//! Analysis order:
//! 1. Normalise (trim, uppercase, strip separators)
//! 2. Run each decoder in priority order, collecting every interpretation
//! 3. Drop `YDDD BB` readings when a Julian DDDYY-family reading exists
//! 4. Stable-sort by confidence and remove duplicates

use std::collections::HashSet;
use std::sync::Arc;

use batchcode_core::{
    AnalysisResult, Clock, DatePolicy, DateWindow, DecodeContext, DecoderKind, Format,
    Interpretation, PatternDecoder, PatternRegistry, SystemClock,
};
use tracing::{debug, error};

use crate::{
    DateAlphaSuffixDecoder, DateSuffixDecoder, DayMonthYearDecoder, JulianSuffixDecoder,
    LegacyDecoder, PrefixYymmSuffixDecoder, SpecialPrefixDecoder, YdddBatchDecoder,
};

/// The bundled decoders, most specific first.
pub fn default_decoders() -> Vec<Box<dyn PatternDecoder>> {
    vec![
        Box::new(YdddBatchDecoder),
        Box::new(PrefixYymmSuffixDecoder),
        Box::new(JulianSuffixDecoder),
        Box::new(DateSuffixDecoder),
        Box::new(DateAlphaSuffixDecoder),
        Box::new(DayMonthYearDecoder),
        Box::new(LegacyDecoder),
        Box::new(SpecialPrefixDecoder),
    ]
}

/// Trim, uppercase and strip separators (`- _ . / \` and whitespace).
pub fn normalize(code: &str) -> String {
    code.trim()
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '_' | '.' | '/' | '\\'))
        .collect()
}

/// Decodes batch codes into ranked production/expiry interpretations.
///
/// # Usage
/// ```rust
/// use batchcode_core::FixedClock;
/// use batchcode_patterns::BatchCodeAnalyzer;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
/// let analyzer = BatchCodeAnalyzer::new().with_clock(FixedClock(today));
/// let result = analyzer.analyze("H2401B");
/// assert!(result.success);
/// assert_eq!(result.top().unwrap().format.label(), "Prefix-YYMM-Suffix");
/// ```
pub struct BatchCodeAnalyzer {
    decoders: Vec<Box<dyn PatternDecoder>>,
    registry: Arc<PatternRegistry>,
    clock: Arc<dyn Clock>,
    policy: DatePolicy,
}

impl BatchCodeAnalyzer {
    /// Analyzer with the bundled decoders and registry, the system clock and
    /// the default date policy.
    pub fn new() -> Self {
        Self {
            decoders: default_decoders(),
            registry: PatternRegistry::shared(),
            clock: Arc::new(SystemClock),
            policy: DatePolicy::default(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_policy(mut self, policy: DatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use a custom registry (for testing or extension).
    pub fn with_registry(mut self, registry: Arc<PatternRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the decoder list. Order sets tie-break priority.
    pub fn with_decoders(mut self, decoders: Vec<Box<dyn PatternDecoder>>) -> Self {
        self.decoders = decoders;
        self
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &DatePolicy {
        &self.policy
    }

    /// Decoder families in the order they run.
    pub fn decoder_kinds(&self) -> Vec<DecoderKind> {
        self.decoders.iter().map(|d| d.kind()).collect()
    }

    /// Snapshot of "today" under this analyzer's policy.
    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.clock.today(), self.policy.clone())
    }

    /// Analyse one code against today's date.
    pub fn analyze(&self, code: &str) -> AnalysisResult {
        self.analyze_at(code, &self.window())
    }

    /// Analyse one code against a fixed date window.
    ///
    /// Never fails: an undecodable code yields `success == false` and a
    /// reason in `message`.
    pub fn analyze_at(&self, code: &str, window: &DateWindow) -> AnalysisResult {
        let cleaned = normalize(code);
        if cleaned.is_empty() {
            return AnalysisResult::failure(if code.trim().is_empty() {
                "Empty code"
            } else {
                "Code empty after cleaning"
            });
        }

        let ctx = DecodeContext::new(window, &self.registry);
        let mut found: Vec<Interpretation> = Vec::new();
        for decoder in &self.decoders {
            let kind = decoder.kind();
            match decoder.decode(&cleaned, &ctx) {
                Ok(outcome) if outcome.matched => {
                    found.extend(outcome.interpretations.into_iter().map(|mut interp| {
                        interp.source = kind;
                        interp.message = outcome.message.clone();
                        interp
                    }));
                }
                Ok(outcome) => {
                    debug!(code = %cleaned, decoder = %kind, message = %outcome.message, "no match")
                }
                Err(e) => {
                    error!(code = %cleaned, decoder = %kind, error = %e, "decoder failed; skipping")
                }
            }
        }

        if found.is_empty() {
            return AnalysisResult::failure("No valid date patterns found by any validator");
        }

        let ranked = rank(found);
        if ranked.is_empty() {
            return AnalysisResult::failure("No valid interpretations after filtering");
        }
        AnalysisResult::found(ranked)
    }
}

impl Default for BatchCodeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Collision filter, confidence ordering and de-duplication.
///
/// Equal confidences keep decoder priority order.
fn rank(mut found: Vec<Interpretation>) -> Vec<Interpretation> {
    let has_yddd = found.iter().any(|i| i.format == Format::YdddBatch);
    if has_yddd && found.iter().any(|i| i.format.is_julian_year_family()) {
        debug!("Julian DDDYY reading present; dropping YDDD BB");
        found.retain(|i| i.format != Format::YdddBatch);
    }

    found.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    let mut seen = HashSet::new();
    found.retain(|i| seen.insert(i.key()));
    found
}
