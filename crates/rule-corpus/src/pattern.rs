//! Risk pattern definitions and compiled matchers.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use risk_types::RiskCategory;

use crate::CorpusError;

pub const DEFAULT_PROXIMITY_WINDOW: usize = 30;

fn default_window() -> usize {
    DEFAULT_PROXIMITY_WINDOW
}

/// How a pattern's expression is matched against text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MatchMode {
    /// Case-insensitive whole-phrase match on word boundaries.
    Literal { phrase: String },
    /// Raw regular expression, compiled case-insensitive.
    Regex { expression: String },
    /// All terms must occur within a bounded token window of each other.
    Proximity {
        terms: Vec<String>,
        #[serde(default = "default_window")]
        window: usize,
    },
}

/// Extra terms that, when present near a match, raise its severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityBoost {
    pub terms: Vec<String>,
    pub amount: f64,
}

/// One risk-indicating pattern in the corpus. Immutable; identity is `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskPattern {
    pub id: String,
    pub category: RiskCategory,
    #[serde(flatten)]
    pub mode: MatchMode,
    /// Base severity weight in [0,1].
    pub base_severity: f64,
    /// Prior confidence in [0,1]; lexical-only evidence sits below what the
    /// deep analyzer reports.
    pub confidence: f64,
    pub description: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<SeverityBoost>,
}

impl RiskPattern {
    /// Reject malformed definitions before any scan can see them.
    pub(crate) fn validate(&self) -> Result<(), CorpusError> {
        if self.id.trim().is_empty() {
            return Err(CorpusError::InvalidPattern {
                id: self.id.clone(),
                reason: "empty pattern id".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.base_severity) {
            return Err(CorpusError::InvalidPattern {
                id: self.id.clone(),
                reason: format!("base_severity {} outside [0,1]", self.base_severity),
            });
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(CorpusError::InvalidPattern {
                id: self.id.clone(),
                reason: format!("confidence {} outside [0,1]", self.confidence),
            });
        }
        match &self.mode {
            MatchMode::Literal { phrase } => {
                if phrase.trim().is_empty() {
                    return Err(CorpusError::InvalidPattern {
                        id: self.id.clone(),
                        reason: "empty literal phrase".into(),
                    });
                }
            }
            MatchMode::Regex { expression } => {
                if expression.trim().is_empty() {
                    return Err(CorpusError::InvalidPattern {
                        id: self.id.clone(),
                        reason: "empty regex expression".into(),
                    });
                }
            }
            MatchMode::Proximity { terms, window } => {
                if terms.len() < 2 {
                    return Err(CorpusError::InvalidPattern {
                        id: self.id.clone(),
                        reason: "proximity mode requires at least two terms".into(),
                    });
                }
                if terms.iter().any(|t| t.trim().is_empty()) {
                    return Err(CorpusError::InvalidPattern {
                        id: self.id.clone(),
                        reason: "empty proximity term".into(),
                    });
                }
                if *window == 0 {
                    return Err(CorpusError::InvalidPattern {
                        id: self.id.clone(),
                        reason: "proximity window must be at least one token".into(),
                    });
                }
            }
        }
        if let Some(boost) = &self.boost {
            if boost.terms.is_empty() || boost.terms.iter().any(|t| t.trim().is_empty()) {
                return Err(CorpusError::InvalidPattern {
                    id: self.id.clone(),
                    reason: "severity boost requires non-empty terms".into(),
                });
            }
            if !(0.0..=1.0).contains(&boost.amount) {
                return Err(CorpusError::InvalidPattern {
                    id: self.id.clone(),
                    reason: format!("boost amount {} outside [0,1]", boost.amount),
                });
            }
        }
        Ok(())
    }
}

fn case_insensitive(expression: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(expression)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
}

/// Compile a phrase into a word-boundary, case-insensitive regex.
fn phrase_regex(phrase: &str) -> Result<Regex, regex::Error> {
    case_insensitive(&format!(r"\b{}\b", regex::escape(phrase.trim())))
}

enum Matcher {
    Literal(Regex),
    Regex(Regex),
    Proximity { terms: Vec<Regex>, window: usize },
}

/// A validated pattern with its compiled matcher.
pub struct CompiledPattern {
    pub pattern: RiskPattern,
    matcher: Matcher,
    boost_terms: Vec<Regex>,
}

impl CompiledPattern {
    pub(crate) fn compile(pattern: RiskPattern) -> Result<CompiledPattern, CorpusError> {
        pattern.validate()?;
        let regex_err = |source| CorpusError::InvalidRegex {
            id: pattern.id.clone(),
            source,
        };
        let matcher = match &pattern.mode {
            MatchMode::Literal { phrase } => {
                Matcher::Literal(phrase_regex(phrase).map_err(regex_err)?)
            }
            MatchMode::Regex { expression } => {
                Matcher::Regex(case_insensitive(expression).map_err(regex_err)?)
            }
            MatchMode::Proximity { terms, window } => Matcher::Proximity {
                terms: terms
                    .iter()
                    .map(|t| phrase_regex(t))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(regex_err)?,
                window: *window,
            },
        };
        let boost_terms = match &pattern.boost {
            Some(boost) => boost
                .terms
                .iter()
                .map(|t| phrase_regex(t))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| CorpusError::InvalidRegex {
                    id: pattern.id.clone(),
                    source,
                })?,
            None => Vec::new(),
        };
        Ok(CompiledPattern {
            pattern,
            matcher,
            boost_terms,
        })
    }

    /// All non-overlapping match spans in `text`, as byte offsets.
    /// Overlapping spans of this same pattern are reduced to the longest.
    /// Within a single expression the regex engine resolves overlapping
    /// alternatives leftmost-first, so earlier-starting matches win there.
    pub fn find_matches(&self, text: &str) -> Vec<(usize, usize)> {
        let spans = match &self.matcher {
            Matcher::Literal(re) | Matcher::Regex(re) => {
                re.find_iter(text).map(|m| (m.start(), m.end())).collect()
            }
            Matcher::Proximity { terms, window } => proximity_matches(text, terms, *window),
        };
        dedupe_longest(spans)
    }

    /// True when any boost term appears inside `window_text`.
    pub fn boost_applies(&self, window_text: &str) -> bool {
        self.boost_terms.iter().any(|re| re.is_match(window_text))
    }
}

/// Find spans where every term occurs within `window` tokens of the first.
fn proximity_matches(text: &str, terms: &[Regex], window: usize) -> Vec<(usize, usize)> {
    // Token start offsets; a match offset maps to the token containing it.
    let token_starts: Vec<usize> = text
        .char_indices()
        .filter(|(i, c)| {
            !c.is_whitespace()
                && (*i == 0 || text[..*i].chars().next_back().is_some_and(char::is_whitespace))
        })
        .map(|(i, _)| i)
        .collect();
    if token_starts.is_empty() {
        return Vec::new();
    }
    let token_of = |offset: usize| token_starts.partition_point(|&s| s <= offset).saturating_sub(1);

    let occurrences: Vec<Vec<(usize, usize)>> = terms
        .iter()
        .map(|re| re.find_iter(text).map(|m| (m.start(), m.end())).collect())
        .collect();
    if occurrences.iter().any(|occ: &Vec<_>| occ.is_empty()) {
        return Vec::new();
    }

    let mut spans = Vec::new();
    for &(anchor_start, anchor_end) in &occurrences[0] {
        let anchor_token = token_of(anchor_start);
        let mut span = (anchor_start, anchor_end);
        let mut complete = true;
        for occ in &occurrences[1..] {
            let nearest = occ
                .iter()
                .filter(|(s, _)| token_of(*s).abs_diff(anchor_token) <= window)
                .min_by_key(|(s, _)| token_of(*s).abs_diff(anchor_token));
            match nearest {
                Some(&(s, e)) => {
                    span.0 = span.0.min(s);
                    span.1 = span.1.max(e);
                }
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            spans.push(span);
        }
    }
    spans
}

/// Collapse overlapping spans, keeping the longest in each overlap group.
fn dedupe_longest(mut spans: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    spans.sort_by_key(|&(s, e)| (s, std::cmp::Reverse(e)));
    let mut result: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match result.last_mut() {
            Some(last) if start < last.1 => {
                if end - start > last.1 - last.0 {
                    *last = (start, end);
                }
            }
            _ => result.push((start, end)),
        }
    }
    result
}
