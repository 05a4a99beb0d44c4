//! Pattern registry: the static table of known batch-code grammars.
//!
//! The table is built once and never mutated. Decoders look up their
//! grammar by key through [`PatternRegistry::require`].

use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::DecodeError;
use crate::types::DecoderKind;

/// Registry keys for the bundled grammars.
pub mod keys {
    pub const YDDD_BB: &str = "yddd_bb";
    pub const DDMMYYYY_VARIANTS: &str = "ddmmyyyy_variants";
    pub const DDMMYY_VARIANTS: &str = "ddmmyy_variants";
    pub const JULIAN_WITH_SUFFIX: &str = "julian_with_suffix";
    pub const MIXED_ALPHA: &str = "mixed_alpha";
    pub const PREFIX_YYMM_SUFFIX: &str = "prefix_yymm_suffix";
    pub const SPECIAL_PREFIX: &str = "special_prefix";
    pub const LEGACY_DDDYYBB: &str = "legacy_dddyybb";
    pub const LEGACY_YYDDD: &str = "legacy_yyddd";
}

/// One known code grammar.
#[derive(Debug, Clone)]
pub struct PatternDefinition {
    /// Stable identifier, e.g. `"yddd_bb"`.
    pub key: &'static str,
    /// Decoder that owns this grammar.
    pub decoder: DecoderKind,
    pub description: &'static str,
    /// Sample codes from real products.
    pub examples: &'static [&'static str],
    grammar: Regex,
}

impl PatternDefinition {
    pub fn new(
        key: &'static str,
        decoder: DecoderKind,
        grammar: &str,
        description: &'static str,
        examples: &'static [&'static str],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            key,
            decoder,
            description,
            examples,
            grammar: Regex::new(grammar)?,
        })
    }

    pub fn grammar(&self) -> &Regex {
        &self.grammar
    }

    pub fn is_match(&self, code: &str) -> bool {
        self.grammar.is_match(code)
    }

    /// Capture groups for `code`, or `None` on a structural mismatch.
    pub fn captures<'c>(&self, code: &'c str) -> Option<Captures<'c>> {
        self.grammar.captures(code)
    }
}

/// Ordered collection of [`PatternDefinition`]s keyed by name.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    patterns: IndexMap<&'static str, PatternDefinition>,
}

static GLOBAL: Lazy<Arc<PatternRegistry>> = Lazy::new(|| Arc::new(PatternRegistry::bundled()));

impl PatternRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide bundled registry.
    pub fn global() -> &'static PatternRegistry {
        &GLOBAL
    }

    /// Shared handle to the bundled registry.
    pub fn shared() -> Arc<PatternRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// Register a definition, replacing any existing one with the same key.
    pub fn register(&mut self, def: PatternDefinition) {
        self.patterns.insert(def.key, def);
    }

    /// The grammars shipped with the engine, in decoder priority order.
    pub fn bundled() -> Self {
        let mut registry = Self::new();
        for (key, decoder, grammar, description, examples) in BUNDLED {
            match PatternDefinition::new(key, decoder, grammar, description, examples) {
                Ok(def) => registry.register(def),
                Err(e) => tracing::error!(key, error = %e, "bundled grammar failed to compile"),
            }
        }
        registry
    }

    pub fn get(&self, key: &str) -> Option<&PatternDefinition> {
        self.patterns.get(key)
    }

    /// Like [`get`](Self::get), but a missing key is a decoder fault.
    pub fn require(&self, key: &str) -> Result<&PatternDefinition, DecodeError> {
        self.get(key).ok_or_else(|| DecodeError::MissingPattern {
            key: key.to_string(),
        })
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &PatternDefinition> {
        self.patterns.values()
    }

    /// Definitions owned by one decoder.
    pub fn for_decoder(&self, kind: DecoderKind) -> impl Iterator<Item = &PatternDefinition> {
        self.iter().filter(move |def| def.decoder == kind)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

type BundledEntry = (
    &'static str,
    DecoderKind,
    &'static str,
    &'static str,
    &'static [&'static str],
);

const BUNDLED: [BundledEntry; 9] = [
    (
        keys::YDDD_BB,
        DecoderKind::YdddBatch,
        r"^([0-9])([0-9]{3})([0-9]{2})$",
        "Year(Y) + Julian Day(DDD) + Batch(BB)",
        &["500903", "505201", "510402"],
    ),
    (
        keys::PREFIX_YYMM_SUFFIX,
        DecoderKind::PrefixYymmSuffix,
        r"^([A-Z])([0-9]{2})([0-9]{2})([A-Z0-9]+)$",
        "Prefix + Year(YY) + Month(MM) + Suffix",
        &["H2401B"],
    ),
    (
        keys::JULIAN_WITH_SUFFIX,
        DecoderKind::JulianSuffix,
        r"^([0-9]{3})([0-9]{2})([0-9]{1,3})$",
        "Julian day + Year + 1 to 3 digit suffix",
        &["1872417", "2402416", "250241"],
    ),
    (
        keys::DDMMYYYY_VARIANTS,
        DecoderKind::DateSuffix,
        r"^([0-9]{1,2})([0-9]{1,2})([0-9]{2})([0-9]{1,3})$",
        "Day/Month/Year with suffix",
        &["0101241", "29022401", "1506241"],
    ),
    (
        keys::MIXED_ALPHA,
        DecoderKind::DateAlphaSuffix,
        r"^([0-9]{3,5})([0-9]{2})([A-Z]+)$",
        "Date digits + alphabetic suffix",
        &["17924AW", "20424P", "10224O"],
    ),
    (
        keys::DDMMYY_VARIANTS,
        DecoderKind::DayMonthYear,
        r"^([0-9]{2})([0-9]{2})([0-9]{2})$",
        "Day/Month/Year or Month/Day/Year",
        &["052024", "010124", "150624"],
    ),
    (
        keys::LEGACY_DDDYYBB,
        DecoderKind::Legacy,
        r"^([0-9]{3})([0-9]{2})([0-9]{2})$",
        "Julian Day(DDD) + Year(YY) + Batch(BB)",
        &["1232401"],
    ),
    (
        keys::LEGACY_YYDDD,
        DecoderKind::Legacy,
        r"^([0-9]{2})([0-9]{3})(.*)$",
        "Year(YY) + Julian Day(DDD) + optional suffix",
        &["24123AB"],
    ),
    (
        keys::SPECIAL_PREFIX,
        DecoderKind::SpecialPrefix,
        r"^([A-Z])([0-9]{2,4})([A-Z0-9]+)$",
        "Letter prefix + ambiguous date + suffix (lower confidence fallback)",
        &["H0724A"],
    ),
];
