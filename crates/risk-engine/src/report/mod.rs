//! Result rendering for export and display.

mod markdown;

pub use markdown::to_markdown;

use risk_types::DocumentRisk;

/// Pretty-printed JSON export of the full assessment.
pub fn to_json(result: &DocumentRisk) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use risk_types::{
        AnalysisStatus, ConfidenceLevel, DocumentMetadata, DocumentRisk, RiskDistribution,
        RiskSummary, SeverityLevel,
    };

    pub(super) fn minimal_result(status: AnalysisStatus) -> DocumentRisk {
        DocumentRisk {
            metadata: DocumentMetadata {
                filename: "msa.txt".into(),
                chars: 1200,
                clauses_analyzed: 2,
                analyzed_at: Utc::now(),
                status,
            },
            summary: RiskSummary {
                overall_score: 47.5,
                overall_level: SeverityLevel::Medium,
                confidence: ConfidenceLevel::Medium,
                distribution: RiskDistribution {
                    critical: 0,
                    high: 1,
                    medium: 1,
                    low: 0,
                },
                category_rollups: vec![],
                recommendation: "Generally acceptable with some concerns.".into(),
            },
            executive_summary: "This contract has some areas of concern.".into(),
            clause_risks: vec![],
            top_risks: vec![],
            must_address_immediately: vec![],
            should_negotiate: vec!["clause 2".into()],
            acceptable_as_is: vec![],
            deal_breakers: vec![],
            action_plan: vec!["1. Have legal counsel review before signing".into()],
        }
    }

    #[test]
    fn test_json_round_trips() {
        let result = minimal_result(AnalysisStatus::Complete);
        let json = to_json(&result).unwrap();
        let parsed: DocumentRisk = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.metadata.filename, "msa.txt");
        assert_eq!(parsed.summary.overall_level, SeverityLevel::Medium);
    }
}
