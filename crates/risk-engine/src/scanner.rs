//! Tier-1 fast scanner: corpus pattern matching over raw text.
//!
//! Purely lexical and CPU-bound; no external calls. Severity is the
//! pattern's base weight adjusted by boost terms and by mitigating language
//! found in the local window around each match.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use tracing::debug;

use risk_types::{
    ClauseSpan, Finding, Provenance, QuickScanResult, RiskCategory, SeverityLevel,
};
use rule_corpus::RuleCorpus;

use crate::clauses;
use crate::config::EngineConfig;
use crate::textutil::window;

// Severity floor: a matched pattern is never discounted to nothing.
const MIN_SEVERITY: f64 = 0.05;
const CAP_MITIGATION: f64 = 0.10;
const MUTUAL_MITIGATION: f64 = 0.05;

fn word_list_regex(terms: &[&str]) -> Regex {
    let alternation = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
        .case_insensitive(true)
        .build()
        .expect("static regex")
}

lazy_static! {
    // Caps and limits near a match soften it.
    static ref CAP_LANGUAGE: Regex = word_list_regex(&[
        "capped at",
        "not to exceed",
        "cap of",
        "limited to",
        "no more than",
        "aggregate limit",
        "up to a maximum",
    ]);
    // Reciprocal obligations cut both ways.
    static ref MUTUAL_LANGUAGE: Regex = word_list_regex(&[
        "mutual",
        "mutually",
        "reciprocal",
        "both parties",
        "each party",
        "either party",
    ]);
}

pub struct FastScanner {
    corpus: Arc<RuleCorpus>,
    local_window_chars: usize,
    materiality_threshold: f64,
}

impl FastScanner {
    pub fn new(corpus: Arc<RuleCorpus>, config: &EngineConfig) -> Self {
        Self {
            corpus,
            local_window_chars: config.local_window_chars,
            materiality_threshold: config.materiality_threshold,
        }
    }

    /// Scan `text` against the full corpus, attributing each match to its
    /// containing clause (or the nearest one when boundaries are loose).
    pub fn scan(&self, text: &str, spans: &[ClauseSpan]) -> Vec<Finding> {
        let mut findings = Vec::new();
        for compiled in self.corpus.patterns() {
            for (start, end) in compiled.find_matches(text) {
                let local = window(text, start, end, self.local_window_chars);
                let severity = self.adjusted_severity(compiled, local);
                let clause_index = clauses::containing_clause(spans, start).unwrap_or(0);
                findings.push(Finding {
                    clause_index,
                    start,
                    end,
                    category: compiled.pattern.category,
                    confidence: compiled.pattern.confidence,
                    severity,
                    matched: compiled.pattern.id.clone(),
                    explanation: compiled.pattern.description.clone(),
                    recommendation: compiled.pattern.recommendation.clone(),
                    provenance: Provenance::Fast,
                });
            }
        }
        debug!(findings = findings.len(), "fast scan complete");
        findings
    }

    fn adjusted_severity(&self, compiled: &rule_corpus::CompiledPattern, local: &str) -> f64 {
        let mut severity = compiled.pattern.base_severity;
        if let Some(boost) = &compiled.pattern.boost {
            if compiled.boost_applies(local) {
                severity += boost.amount;
            }
        }
        if CAP_LANGUAGE.is_match(local) {
            severity -= CAP_MITIGATION;
        }
        if MUTUAL_LANGUAGE.is_match(local) {
            severity -= MUTUAL_MITIGATION;
        }
        severity.clamp(MIN_SEVERITY, 1.0)
    }

    /// Tier-1-only document summary.
    pub fn quick_scan(&self, text: &str, spans: &[ClauseSpan]) -> QuickScanResult {
        let started = Instant::now();
        let findings = self.scan(text, spans);

        let mut category_counts: BTreeMap<RiskCategory, usize> = BTreeMap::new();
        for finding in &findings {
            *category_counts.entry(finding.category).or_default() += 1;
        }

        let total_evidence: f64 = findings.iter().map(Finding::evidence).sum();
        let critical_count = findings.iter().filter(|f| f.evidence() >= 0.6).count();
        let estimated_risk_level = if critical_count >= 3 || total_evidence > 10.0 {
            SeverityLevel::Critical
        } else if critical_count >= 1 || total_evidence > 6.0 {
            SeverityLevel::High
        } else if total_evidence > 3.0 {
            SeverityLevel::Medium
        } else {
            SeverityLevel::Low
        };

        let clauses_to_deep_analyze = self.escalation_candidates(&findings);

        QuickScanResult {
            total_matches: findings.len(),
            findings,
            category_counts,
            estimated_risk_level,
            clauses_to_deep_analyze,
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        }
    }

    /// Clause indexes whose strongest fast-tier evidence meets the
    /// materiality threshold, in document order.
    pub fn escalation_candidates(&self, findings: &[Finding]) -> Vec<usize> {
        let mut indexes: Vec<usize> = findings
            .iter()
            .filter(|f| f.evidence() >= self.materiality_threshold)
            .map(|f| f.clause_index)
            .collect();
        indexes.sort_unstable();
        indexes.dedup();
        indexes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rule_corpus::{MatchMode, RiskPattern};

    fn corpus(patterns: Vec<RiskPattern>) -> Arc<RuleCorpus> {
        Arc::new(RuleCorpus::from_patterns(patterns).unwrap())
    }

    fn literal(id: &str, category: RiskCategory, phrase: &str, sev: f64, conf: f64) -> RiskPattern {
        RiskPattern {
            id: id.into(),
            category,
            mode: MatchMode::Literal {
                phrase: phrase.into(),
            },
            base_severity: sev,
            confidence: conf,
            description: format!("{} detected", phrase),
            recommendation: "Review with counsel".into(),
            boost: None,
        }
    }

    fn scanner(patterns: Vec<RiskPattern>) -> FastScanner {
        FastScanner::new(corpus(patterns), &EngineConfig::default())
    }

    #[test]
    fn test_scan_yields_fast_findings_with_pattern_prior() {
        let s = scanner(vec![literal(
            "auto-renewal",
            RiskCategory::Termination,
            "automatically renew",
            0.6,
            0.7,
        )]);
        let text = "This Agreement shall automatically renew for successive one-year terms \
                    unless terminated 90 days prior.";
        let spans = clauses::split(text);
        let findings = s.scan(text, &spans);
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.category, RiskCategory::Termination);
        assert_eq!(f.provenance, Provenance::Fast);
        assert!((f.confidence - 0.7).abs() < 1e-9);
        assert!((f.severity - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_overlapping_matches_of_different_patterns_both_retained() {
        let s = scanner(vec![
            literal("a", RiskCategory::LegalLiability, "indemnify and hold harmless", 0.7, 0.7),
            literal("b", RiskCategory::LegalLiability, "hold harmless", 0.6, 0.6),
        ]);
        let text = "Vendor shall indemnify and hold harmless the Customer from third party claims \
                    arising out of the services.";
        let spans = clauses::split(text);
        let findings = s.scan(text, &spans);
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn test_mitigating_cap_language_lowers_severity() {
        let pattern = literal("indemnity", RiskCategory::LegalLiability, "shall indemnify", 0.6, 0.7);
        let s = scanner(vec![pattern]);

        let bare = "Vendor shall indemnify Customer against all losses arising from the work.";
        let capped = "Vendor shall indemnify Customer, with liability capped at the fees paid.";
        let bare_sev = s.scan(bare, &clauses::split(bare))[0].severity;
        let capped_sev = s.scan(capped, &clauses::split(capped))[0].severity;
        assert!(capped_sev < bare_sev);
    }

    #[test]
    fn test_boost_terms_raise_severity() {
        let mut pattern = literal("liability", RiskCategory::Financial, "liability", 0.5, 0.7);
        pattern.boost = Some(rule_corpus::SeverityBoost {
            terms: vec!["unlimited".into()],
            amount: 0.3,
        });
        let s = scanner(vec![pattern]);
        let text = "Contractor accepts unlimited liability for defects in the delivered goods.";
        let findings = s.scan(text, &clauses::split(text));
        assert!((findings[0].severity - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_findings_attributed_to_containing_clause() {
        let s = scanner(vec![literal(
            "no-refund",
            RiskCategory::Financial,
            "non-refundable",
            0.6,
            0.7,
        )]);
        let text = "This agreement is made between the parties for professional services rendered.\n\n\
                    All fees paid under this agreement are strictly non-refundable in every case.";
        let spans = clauses::split(text);
        assert_eq!(spans.len(), 2);
        let findings = s.scan(text, &spans);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].clause_index, 1);
    }

    #[test]
    fn test_escalation_respects_materiality_threshold() {
        let s = scanner(vec![
            literal("strong", RiskCategory::LegalLiability, "waive all claims", 0.9, 0.75),
            literal("weak", RiskCategory::Operational, "best efforts", 0.2, 0.5),
        ]);
        let text = "Licensee shall waive all claims against Licensor under this section.\n\n\
                    Provider shall use best efforts to meet the agreed delivery schedule here.";
        let spans = clauses::split(text);
        let findings = s.scan(text, &spans);
        let escalated = s.escalation_candidates(&findings);
        assert_eq!(escalated, vec![0]);
    }

    #[test]
    fn test_quick_scan_counts_and_level() {
        let s = scanner(vec![literal(
            "waiver",
            RiskCategory::LegalLiability,
            "waive all claims",
            0.9,
            0.75,
        )]);
        let text = "Tenant agrees to waive all claims against Landlord for any damage to property.";
        let result = s.quick_scan(text, &clauses::split(text));
        assert_eq!(result.total_matches, 1);
        assert_eq!(
            result.category_counts.get(&RiskCategory::LegalLiability),
            Some(&1)
        );
        // One finding at 0.675 evidence: HIGH by the critical-count rule.
        assert_eq!(result.estimated_risk_level, SeverityLevel::High);
    }
}
