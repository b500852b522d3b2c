//! Calibrated clause scoring.
//!
//! Scores are a pure function of the finding set: order-independent,
//! deterministic, and clamped. Within a category, severities combine with
//! diminishing returns so a pile of weak matches cannot outrank one strong
//! finding; across categories, breadth earns a fixed co-occurrence bonus.

use std::collections::BTreeMap;

use tracing::warn;

use risk_types::{
    ClauseRisk, ClauseSpan, ConfidenceLevel, Finding, RiskCategory, SeverityLevel,
};

use crate::textutil::excerpt;

/// Additive bonus when a clause's findings span at least
/// `CO_OCCURRENCE_MIN_CATEGORIES` distinct categories.
pub const CO_OCCURRENCE_BONUS: f64 = 10.0;
pub const CO_OCCURRENCE_MIN_CATEGORIES: usize = 3;

const EXCERPT_CHARS: usize = 160;

/// Diminishing-returns combination of evidence weights:
/// 100 x (1 - prod(1 - severity_i x confidence_i)).
///
/// Inputs are sorted before folding so the product is bit-identical under
/// permutation of the finding list.
fn category_score(evidence: &mut Vec<f64>) -> f64 {
    evidence.sort_by(f64::total_cmp);
    let survival: f64 = evidence.iter().fold(1.0, |acc, e| acc * (1.0 - e));
    clamp_score(100.0 * (1.0 - survival))
}

fn clamp_score(score: f64) -> f64 {
    if !(0.0..=100.0).contains(&score) || score.is_nan() {
        warn!(score, "score outside [0,100], clamping");
        if score.is_nan() {
            return 0.0;
        }
        return score.clamp(0.0, 100.0);
    }
    score
}

/// Score one clause from its findings (either tier, any order).
pub fn score_clause(span: &ClauseSpan, findings: Vec<Finding>, degraded: bool) -> ClauseRisk {
    let mut per_category: BTreeMap<RiskCategory, Vec<f64>> = BTreeMap::new();
    for finding in &findings {
        per_category
            .entry(finding.category)
            .or_default()
            .push(finding.evidence());
    }

    let category_scores: BTreeMap<RiskCategory, f64> = per_category
        .into_iter()
        .map(|(category, mut evidence)| (category, category_score(&mut evidence)))
        .collect();

    let peak = category_scores.values().fold(0.0_f64, |a, &b| a.max(b));
    let mut score = peak;
    if category_scores.len() >= CO_OCCURRENCE_MIN_CATEGORIES {
        score = (score + CO_OCCURRENCE_BONUS).min(100.0);
    }
    let score = clamp_score(score);

    let confidence = if findings.is_empty() {
        ConfidenceLevel::Low
    } else {
        let mean = findings.iter().map(|f| f.confidence).sum::<f64>() / findings.len() as f64;
        ConfidenceLevel::from_mean(mean)
    };

    ClauseRisk {
        clause_index: span.index,
        label: span.label.clone(),
        excerpt: excerpt(&span.text, EXCERPT_CHARS),
        clause_chars: span.text.chars().count(),
        category_scores,
        score,
        severity: SeverityLevel::from_score(score),
        confidence,
        findings,
        degraded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use risk_types::Provenance;

    fn span() -> ClauseSpan {
        ClauseSpan {
            index: 0,
            start: 0,
            end: 80,
            text: "Clause text long enough to look like a real contract provision here."
                .to_string(),
            label: None,
        }
    }

    fn finding(category: RiskCategory, severity: f64, confidence: f64) -> Finding {
        Finding {
            clause_index: 0,
            start: 0,
            end: 10,
            category,
            confidence,
            severity,
            matched: "test-pattern".into(),
            explanation: "test".into(),
            recommendation: "test".into(),
            provenance: Provenance::Fast,
        }
    }

    #[test]
    fn test_single_finding_matches_formula() {
        // severity 0.6, confidence 0.7 -> 100 x (1 - (1 - 0.42)) = 42.
        let risk = score_clause(
            &span(),
            vec![finding(RiskCategory::Termination, 0.6, 0.7)],
            false,
        );
        assert!((risk.score - 42.0).abs() < 1e-9);
        assert_eq!(risk.severity, SeverityLevel::Medium);
    }

    #[test]
    fn test_no_findings_scores_zero_low() {
        let risk = score_clause(&span(), vec![], false);
        assert_eq!(risk.score, 0.0);
        assert_eq!(risk.severity, SeverityLevel::Low);
        assert_eq!(risk.confidence, ConfidenceLevel::Low);
    }

    #[test]
    fn test_diminishing_returns_is_concave() {
        let one = score_clause(
            &span(),
            vec![finding(RiskCategory::Financial, 0.4, 0.6)],
            false,
        )
        .score;
        let two = score_clause(
            &span(),
            vec![
                finding(RiskCategory::Financial, 0.4, 0.6),
                finding(RiskCategory::Financial, 0.4, 0.6),
            ],
            false,
        )
        .score;
        let three = score_clause(
            &span(),
            vec![
                finding(RiskCategory::Financial, 0.4, 0.6),
                finding(RiskCategory::Financial, 0.4, 0.6),
                finding(RiskCategory::Financial, 0.4, 0.6),
            ],
            false,
        )
        .score;
        let first_gain = two - one;
        let second_gain = three - two;
        assert!(first_gain > 0.0);
        assert!(second_gain > 0.0);
        assert!(second_gain < first_gain);
    }

    #[test]
    fn test_many_weak_findings_do_not_beat_one_strong() {
        let weak: Vec<Finding> = (0..10)
            .map(|_| finding(RiskCategory::Financial, 0.1, 0.5))
            .collect();
        let weak_score = score_clause(&span(), weak, false).score;
        let strong_score = score_clause(
            &span(),
            vec![finding(RiskCategory::Financial, 0.95, 0.9)],
            false,
        )
        .score;
        assert!(strong_score > weak_score);
    }

    #[test]
    fn test_cross_category_bonus_versus_single_category_control() {
        // Same peak evidence in both clauses; only breadth differs.
        let single = score_clause(
            &span(),
            vec![finding(RiskCategory::Financial, 0.7, 0.8)],
            false,
        )
        .score;
        let spread = score_clause(
            &span(),
            vec![
                finding(RiskCategory::Financial, 0.7, 0.8),
                finding(RiskCategory::IntellectualProperty, 0.2, 0.5),
                finding(RiskCategory::DisputeResolution, 0.2, 0.5),
            ],
            false,
        )
        .score;
        assert!((spread - (single + CO_OCCURRENCE_BONUS)).abs() < 1e-9);
    }

    #[test]
    fn test_two_categories_get_no_bonus() {
        let risk = score_clause(
            &span(),
            vec![
                finding(RiskCategory::Financial, 0.7, 0.8),
                finding(RiskCategory::Termination, 0.2, 0.5),
            ],
            false,
        );
        let peak = risk
            .category_scores
            .values()
            .fold(0.0_f64, |a, &b| a.max(b));
        assert!((risk.score - peak).abs() < 1e-9);
    }

    #[test]
    fn test_bonus_capped_at_100() {
        let risk = score_clause(
            &span(),
            vec![
                finding(RiskCategory::Financial, 1.0, 1.0),
                finding(RiskCategory::Termination, 1.0, 1.0),
                finding(RiskCategory::Compliance, 1.0, 1.0),
            ],
            false,
        );
        assert!(risk.score <= 100.0);
        assert_eq!(risk.severity, SeverityLevel::Critical);
    }

    proptest! {
        #[test]
        fn prop_score_bounded(findings in proptest::collection::vec(
            (0usize..8, 0.0f64..=1.0, 0.0f64..=1.0),
            0..20,
        )) {
            let findings: Vec<Finding> = findings
                .into_iter()
                .map(|(c, s, k)| finding(RiskCategory::ALL[c], s, k))
                .collect();
            let risk = score_clause(&span(), findings, false);
            prop_assert!((0.0..=100.0).contains(&risk.score));
            for score in risk.category_scores.values() {
                prop_assert!((0.0..=100.0).contains(score));
            }
        }

        #[test]
        fn prop_permutation_invariance(
            findings in proptest::collection::vec(
                (0usize..8, 0.0f64..=1.0, 0.0f64..=1.0),
                1..12,
            ),
            seed in any::<u64>(),
        ) {
            let findings: Vec<Finding> = findings
                .into_iter()
                .map(|(c, s, k)| finding(RiskCategory::ALL[c], s, k))
                .collect();
            let mut shuffled = findings.clone();
            // Deterministic pseudo-shuffle driven by the seed.
            let mut state = seed;
            for i in (1..shuffled.len()).rev() {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let j = (state % (i as u64 + 1)) as usize;
                shuffled.swap(i, j);
            }
            let a = score_clause(&span(), findings, false);
            let b = score_clause(&span(), shuffled, false);
            prop_assert_eq!(a.score, b.score);
            prop_assert_eq!(a.severity, b.severity);
            prop_assert_eq!(a.category_scores, b.category_scores);
        }
    }
}
