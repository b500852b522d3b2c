//! Tier-2 deep analysis: semantic clause evaluation delegated to an external
//! language-understanding service.
//!
//! The wire schema here is the compatibility contract: any provider must
//! return, per issue, a category from the fixed enumeration, confidence and
//! severity in [0,1], an explanation, and a recommendation. Everything coming
//! back over the wire is validated; out-of-contract values are discarded,
//! never trusted structurally.

mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use risk_types::{AnalysisContext, ClauseSpan, Finding, Provenance, RiskCategory, UserRole};

use crate::error::AnalyzerError;

pub use http::HttpAnalyzer;

/// Severity discount applied when the reviewer drafted the document; language
/// that binds the counterparty reads less risky from the drafting side.
const DRAFTING_PARTY_SEVERITY_SCALE: f64 = 0.85;

/// One issue reported by the service, exactly as received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireIssue {
    pub category: String,
    pub confidence: f64,
    pub severity: f64,
    pub explanation: String,
    pub recommendation: String,
}

/// Top-level service response shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireResponse {
    #[serde(default)]
    pub issues: Vec<WireIssue>,
}

/// Seam for the external service. Implementations are pure request/response
/// with no shared mutable state, so calls for distinct clauses may run
/// concurrently.
#[async_trait]
pub trait DeepAnalysis: Send + Sync {
    async fn analyze(
        &self,
        clause: &ClauseSpan,
        context: &AnalysisContext,
    ) -> Result<WireResponse, AnalyzerError>;
}

/// Validate a wire response into findings for `clause`.
///
/// Items with an unrecognized category are dropped; numeric fields are
/// clamped into [0,1]. Accepted severities are biased by the reviewer role.
pub fn accept_issues(
    clause: &ClauseSpan,
    response: WireResponse,
    context: &AnalysisContext,
) -> Vec<Finding> {
    let role_scale = match context.user_role {
        UserRole::DraftingParty => DRAFTING_PARTY_SEVERITY_SCALE,
        UserRole::Counterparty | UserRole::Neutral => 1.0,
    };
    response
        .issues
        .into_iter()
        .filter_map(|issue| {
            let Some(category) = RiskCategory::parse(&issue.category) else {
                debug!(
                    category = %issue.category,
                    clause = clause.index,
                    "discarding issue with unrecognized category"
                );
                return None;
            };
            let severity = sanitize_unit(issue.severity) * role_scale;
            let confidence = sanitize_unit(issue.confidence);
            Some(Finding {
                clause_index: clause.index,
                start: clause.start,
                end: clause.end,
                category,
                confidence,
                severity: severity.clamp(0.0, 1.0),
                matched: format!("deep:{}", category.wire_name()),
                explanation: issue.explanation,
                recommendation: issue.recommendation,
                provenance: Provenance::Deep,
            })
        })
        .collect()
}

fn sanitize_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_types::AnalysisContext;

    fn clause() -> ClauseSpan {
        ClauseSpan {
            index: 3,
            start: 100,
            end: 220,
            text: "Licensee hereby assigns all right, title, and interest in the work product."
                .to_string(),
            label: Some("Section 7".into()),
        }
    }

    fn issue(category: &str, confidence: f64, severity: f64) -> WireIssue {
        WireIssue {
            category: category.into(),
            confidence,
            severity,
            explanation: "The clause transfers ownership outright.".into(),
            recommendation: "License instead of assigning.".into(),
        }
    }

    #[test]
    fn test_valid_issue_becomes_deep_finding() {
        let findings = accept_issues(
            &clause(),
            WireResponse {
                issues: vec![issue("intellectual_property", 0.9, 0.8)],
            },
            &AnalysisContext::default(),
        );
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.category, RiskCategory::IntellectualProperty);
        assert_eq!(f.provenance, Provenance::Deep);
        assert_eq!(f.clause_index, 3);
        assert_eq!((f.start, f.end), (100, 220));
    }

    #[test]
    fn test_unknown_category_discarded() {
        let findings = accept_issues(
            &clause(),
            WireResponse {
                issues: vec![
                    issue("reputational", 0.9, 0.9),
                    issue("financial", 0.8, 0.7),
                ],
            },
            &AnalysisContext::default(),
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, RiskCategory::Financial);
    }

    #[test]
    fn test_out_of_range_numerics_clamped() {
        let findings = accept_issues(
            &clause(),
            WireResponse {
                issues: vec![issue("compliance", 1.7, -0.3)],
            },
            &AnalysisContext::default(),
        );
        assert_eq!(findings[0].confidence, 1.0);
        assert_eq!(findings[0].severity, 0.0);
    }

    #[test]
    fn test_drafting_party_bias_scales_severity() {
        let neutral = accept_issues(
            &clause(),
            WireResponse {
                issues: vec![issue("legal_liability", 0.8, 0.8)],
            },
            &AnalysisContext::default(),
        );
        let drafter = accept_issues(
            &clause(),
            WireResponse {
                issues: vec![issue("legal_liability", 0.8, 0.8)],
            },
            &AnalysisContext::default().with_role(UserRole::DraftingParty),
        );
        assert!(drafter[0].severity < neutral[0].severity);
        assert!((drafter[0].severity - 0.8 * 0.85).abs() < 1e-9);
    }
}
