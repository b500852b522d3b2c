//! Core data model for contract risk assessment.
//!
//! Everything here is plain serde-serializable data shared between the rule
//! corpus, the analysis engine, and downstream consumers (UI, export, agents).
//! Results are immutable once constructed: scoring derives new values rather
//! than rewriting findings.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed set of risk categories every finding must belong to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Financial,
    LegalLiability,
    Termination,
    IntellectualProperty,
    Confidentiality,
    DisputeResolution,
    Compliance,
    Operational,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 8] = [
        RiskCategory::Financial,
        RiskCategory::LegalLiability,
        RiskCategory::Termination,
        RiskCategory::IntellectualProperty,
        RiskCategory::Confidentiality,
        RiskCategory::DisputeResolution,
        RiskCategory::Compliance,
        RiskCategory::Operational,
    ];

    /// Business-impact priority used to break score ties when ranking risks.
    /// Lower rank means higher priority.
    pub fn priority_rank(&self) -> u8 {
        match self {
            RiskCategory::LegalLiability => 0,
            RiskCategory::Financial => 1,
            RiskCategory::Compliance => 2,
            RiskCategory::DisputeResolution => 3,
            RiskCategory::Termination => 4,
            RiskCategory::IntellectualProperty => 5,
            RiskCategory::Confidentiality => 6,
            RiskCategory::Operational => 7,
        }
    }

    /// Human-readable category name for reports.
    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Financial => "Financial",
            RiskCategory::LegalLiability => "Legal Liability",
            RiskCategory::Termination => "Termination",
            RiskCategory::IntellectualProperty => "Intellectual Property",
            RiskCategory::Confidentiality => "Confidentiality",
            RiskCategory::DisputeResolution => "Dispute Resolution",
            RiskCategory::Compliance => "Compliance",
            RiskCategory::Operational => "Operational",
        }
    }

    /// Wire name as used in the external-service contract.
    pub fn wire_name(&self) -> &'static str {
        match self {
            RiskCategory::Financial => "financial",
            RiskCategory::LegalLiability => "legal_liability",
            RiskCategory::Termination => "termination",
            RiskCategory::IntellectualProperty => "intellectual_property",
            RiskCategory::Confidentiality => "confidentiality",
            RiskCategory::DisputeResolution => "dispute_resolution",
            RiskCategory::Compliance => "compliance",
            RiskCategory::Operational => "operational",
        }
    }

    /// Parse a category from its wire name. Returns `None` for anything
    /// outside the fixed enumeration; callers must reject such values.
    pub fn parse(value: &str) -> Option<RiskCategory> {
        RiskCategory::ALL
            .iter()
            .copied()
            .find(|c| c.wire_name() == value.trim().to_lowercase())
    }
}

/// Severity label for a clause or document score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityLevel {
    /// Fixed threshold table: 0-30 LOW, 31-60 MEDIUM, 61-85 HIGH,
    /// 86-100 CRITICAL. Downstream bucketing depends on these exact bounds.
    pub fn from_score(score: f64) -> SeverityLevel {
        if score <= 30.0 {
            SeverityLevel::Low
        } else if score <= 60.0 {
            SeverityLevel::Medium
        } else if score <= 85.0 {
            SeverityLevel::High
        } else {
            SeverityLevel::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "LOW",
            SeverityLevel::Medium => "MEDIUM",
            SeverityLevel::High => "HIGH",
            SeverityLevel::Critical => "CRITICAL",
        }
    }
}

/// Confidence bucket derived from the mean raw confidence of contributing
/// findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn from_mean(mean_confidence: f64) -> ConfidenceLevel {
        if mean_confidence < 0.45 {
            ConfidenceLevel::Low
        } else if mean_confidence < 0.75 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::High
        }
    }
}

/// Which analysis tier produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Fast,
    Deep,
}

/// A contiguous region of contract text, produced by the input boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseSpan {
    /// Zero-based position in document order.
    pub index: usize,
    /// Byte offset of the clause start in the full text.
    pub start: usize,
    /// Byte offset one past the clause end.
    pub end: usize,
    pub text: String,
    /// Optional label, e.g. "Section 12.3".
    pub label: Option<String>,
}

impl ClauseSpan {
    pub fn reference(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("clause {}", self.index + 1))
    }
}

/// One piece of evidence that a clause carries a specific category of risk.
/// Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub clause_index: usize,
    /// Byte offsets of the evidence within the full document text.
    pub start: usize,
    pub end: usize,
    pub category: RiskCategory,
    /// Raw confidence in [0,1]. Fast-tier findings carry the pattern's prior.
    pub confidence: f64,
    /// Raw severity in [0,1].
    pub severity: f64,
    /// Pattern id (fast) or analyzer rationale tag (deep).
    pub matched: String,
    pub explanation: String,
    pub recommendation: String,
    pub provenance: Provenance,
}

impl Finding {
    /// Combined evidence weight used for escalation and scoring.
    pub fn evidence(&self) -> f64 {
        (self.severity * self.confidence).clamp(0.0, 1.0)
    }
}

/// Outcome bucket for a clause, derived one-to-one from its severity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBucket {
    DealBreaker,
    MustAddress,
    ShouldNegotiate,
    Acceptable,
}

impl RiskBucket {
    pub fn from_severity(severity: SeverityLevel) -> RiskBucket {
        match severity {
            SeverityLevel::Critical => RiskBucket::DealBreaker,
            SeverityLevel::High => RiskBucket::MustAddress,
            SeverityLevel::Medium => RiskBucket::ShouldNegotiate,
            SeverityLevel::Low => RiskBucket::Acceptable,
        }
    }
}

/// Scored risk assessment for a single clause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseRisk {
    pub clause_index: usize,
    pub label: Option<String>,
    /// Leading text of the clause, for display.
    pub excerpt: String,
    /// Length of the clause in characters; aggregation weight.
    pub clause_chars: usize,
    pub category_scores: BTreeMap<RiskCategory, f64>,
    /// Overall clause score in [0,100].
    pub score: f64,
    pub severity: SeverityLevel,
    pub confidence: ConfidenceLevel,
    pub findings: Vec<Finding>,
    /// True when deep analysis was requested for this clause but failed.
    pub degraded: bool,
}

impl ClauseRisk {
    pub fn bucket(&self) -> RiskBucket {
        RiskBucket::from_severity(self.severity)
    }

    /// Highest-scoring category, ties broken by business priority.
    pub fn dominant_category(&self) -> Option<RiskCategory> {
        self.category_scores
            .iter()
            .map(|(c, s)| (*c, *s))
            .max_by(|(ca, sa), (cb, sb)| {
                sa.partial_cmp(sb)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(cb.priority_rank().cmp(&ca.priority_rank()))
            })
            .map(|(c, _)| c)
    }

    pub fn reference(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("clause {}", self.clause_index + 1))
    }
}

/// Count of clauses per severity label.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskDistribution {
    pub fn record(&mut self, severity: SeverityLevel) {
        match severity {
            SeverityLevel::Critical => self.critical += 1,
            SeverityLevel::High => self.high += 1,
            SeverityLevel::Medium => self.medium += 1,
            SeverityLevel::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// Per-category rollup across all clauses of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRollup {
    pub category: RiskCategory,
    pub clause_count: usize,
    pub finding_count: usize,
    pub max_score: f64,
    pub mean_score: f64,
}

/// A ranked view over the highest-scoring clauses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopRisk {
    pub rank: usize,
    pub clause_index: usize,
    pub reference: String,
    pub score: f64,
    pub category: Option<RiskCategory>,
    pub issue: String,
    pub action: String,
}

/// A prioritized item the reader should act on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub priority: usize,
    pub clause_reference: String,
    pub issue: String,
    pub urgency: String,
    pub action: String,
}

/// Whether deep analysis completed for every escalated clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnalysisStatus {
    Complete,
    Partial { degraded_clauses: Vec<usize> },
}

impl AnalysisStatus {
    pub fn is_partial(&self) -> bool {
        matches!(self, AnalysisStatus::Partial { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub filename: String,
    pub chars: usize,
    pub clauses_analyzed: usize,
    pub analyzed_at: DateTime<Utc>,
    pub status: AnalysisStatus,
}

/// Document-level summary statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskSummary {
    pub overall_score: f64,
    pub overall_level: SeverityLevel,
    pub confidence: ConfidenceLevel,
    pub distribution: RiskDistribution,
    pub category_rollups: Vec<CategoryRollup>,
    pub recommendation: String,
}

/// Complete risk assessment for one document. Constructed once per
/// `analyze_document` call and owned by the caller afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRisk {
    pub metadata: DocumentMetadata,
    pub summary: RiskSummary,
    pub executive_summary: String,
    pub clause_risks: Vec<ClauseRisk>,
    pub top_risks: Vec<TopRisk>,
    pub must_address_immediately: Vec<ActionItem>,
    pub should_negotiate: Vec<String>,
    pub acceptable_as_is: Vec<String>,
    pub deal_breakers: Vec<ActionItem>,
    pub action_plan: Vec<String>,
}

/// Result of the fast-tier-only scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickScanResult {
    pub total_matches: usize,
    pub findings: Vec<Finding>,
    pub category_counts: BTreeMap<RiskCategory, usize>,
    pub estimated_risk_level: SeverityLevel,
    /// Clause indexes whose strongest evidence meets the materiality
    /// threshold.
    pub clauses_to_deep_analyze: Vec<usize>,
    pub elapsed_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_severity_threshold_table() {
        assert_eq!(SeverityLevel::from_score(0.0), SeverityLevel::Low);
        assert_eq!(SeverityLevel::from_score(30.0), SeverityLevel::Low);
        assert_eq!(SeverityLevel::from_score(30.5), SeverityLevel::Medium);
        assert_eq!(SeverityLevel::from_score(60.0), SeverityLevel::Medium);
        assert_eq!(SeverityLevel::from_score(61.0), SeverityLevel::High);
        assert_eq!(SeverityLevel::from_score(85.0), SeverityLevel::High);
        assert_eq!(SeverityLevel::from_score(86.0), SeverityLevel::Critical);
        assert_eq!(SeverityLevel::from_score(100.0), SeverityLevel::Critical);
    }

    #[test]
    fn test_bucket_maps_one_to_one_from_severity() {
        assert_eq!(
            RiskBucket::from_severity(SeverityLevel::Critical),
            RiskBucket::DealBreaker
        );
        assert_eq!(
            RiskBucket::from_severity(SeverityLevel::High),
            RiskBucket::MustAddress
        );
        assert_eq!(
            RiskBucket::from_severity(SeverityLevel::Medium),
            RiskBucket::ShouldNegotiate
        );
        assert_eq!(
            RiskBucket::from_severity(SeverityLevel::Low),
            RiskBucket::Acceptable
        );
    }

    #[test]
    fn test_category_parse_rejects_unknown_values() {
        assert_eq!(
            RiskCategory::parse("legal_liability"),
            Some(RiskCategory::LegalLiability)
        );
        assert_eq!(
            RiskCategory::parse("  Dispute_Resolution "),
            Some(RiskCategory::DisputeResolution)
        );
        assert_eq!(RiskCategory::parse("reputational"), None);
        assert_eq!(RiskCategory::parse(""), None);
    }

    #[test]
    fn test_category_priority_order() {
        assert!(
            RiskCategory::LegalLiability.priority_rank()
                < RiskCategory::Financial.priority_rank()
        );
        assert!(
            RiskCategory::Confidentiality.priority_rank()
                < RiskCategory::Operational.priority_rank()
        );
    }

    #[test]
    fn test_dominant_category_breaks_ties_by_priority() {
        let mut scores = BTreeMap::new();
        scores.insert(RiskCategory::Operational, 50.0);
        scores.insert(RiskCategory::LegalLiability, 50.0);
        let risk = ClauseRisk {
            clause_index: 0,
            label: None,
            excerpt: String::new(),
            clause_chars: 100,
            category_scores: scores,
            score: 50.0,
            severity: SeverityLevel::Medium,
            confidence: ConfidenceLevel::Medium,
            findings: vec![],
            degraded: false,
        };
        assert_eq!(risk.dominant_category(), Some(RiskCategory::LegalLiability));
    }

    #[test]
    fn test_confidence_buckets() {
        assert_eq!(ConfidenceLevel::from_mean(0.2), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_mean(0.5), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_mean(0.9), ConfidenceLevel::High);
    }
}
