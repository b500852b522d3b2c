//! Static catalog of risk-indicating patterns for contract text.
//!
//! The corpus is constructed once at startup, validated eagerly, and shared
//! read-only across concurrent scans. A malformed definition is a
//! [`CorpusError`] at load time; scans never encounter invalid patterns.

pub mod builtin;
pub mod pattern;

use thiserror::Error;
use tracing::debug;

pub use pattern::{
    CompiledPattern, MatchMode, RiskPattern, SeverityBoost, DEFAULT_PROXIMITY_WINDOW,
};

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("pattern `{id}`: invalid regex: {source}")]
    InvalidRegex {
        id: String,
        #[source]
        source: regex::Error,
    },

    #[error("pattern `{id}`: {reason}")]
    InvalidPattern { id: String, reason: String },

    #[error("duplicate pattern id `{0}`")]
    DuplicateId(String),

    #[error("corpus contains no patterns")]
    Empty,

    #[error("failed to parse corpus definition: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An immutable, validated, compiled set of risk patterns.
pub struct RuleCorpus {
    patterns: Vec<CompiledPattern>,
}

impl RuleCorpus {
    /// Build a corpus from explicit pattern definitions. Every pattern is
    /// validated and compiled here; the first defect aborts the load.
    pub fn from_patterns(patterns: Vec<RiskPattern>) -> Result<RuleCorpus, CorpusError> {
        if patterns.is_empty() {
            return Err(CorpusError::Empty);
        }
        let mut seen = std::collections::HashSet::new();
        let mut compiled = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            if !seen.insert(pattern.id.clone()) {
                return Err(CorpusError::DuplicateId(pattern.id));
            }
            compiled.push(CompiledPattern::compile(pattern)?);
        }
        debug!(patterns = compiled.len(), "rule corpus loaded");
        Ok(RuleCorpus { patterns: compiled })
    }

    /// The built-in catalog covering all eight risk categories.
    pub fn builtin() -> Result<RuleCorpus, CorpusError> {
        RuleCorpus::from_patterns(builtin::patterns())
    }

    /// Load a custom catalog from its JSON definition.
    pub fn from_json_str(json: &str) -> Result<RuleCorpus, CorpusError> {
        let patterns: Vec<RiskPattern> = serde_json::from_str(json)?;
        RuleCorpus::from_patterns(patterns)
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
