//! Document-level consolidation of scored clauses.
//!
//! Everything produced here is a deterministic function of the clause risks:
//! template-filled summary text, ranked top risks, and the severity-driven
//! bucket partition. Identical input always yields an identical report body.

use std::collections::BTreeMap;

use chrono::Utc;

use risk_types::{
    ActionItem, AnalysisStatus, CategoryRollup, ClauseRisk, ConfidenceLevel, DocumentMetadata,
    DocumentRisk, RiskBucket, RiskCategory, RiskDistribution, RiskSummary, SeverityLevel, TopRisk,
};

use crate::config::EngineConfig;

/// Clauses below this score never appear in the ranked top-risk list.
const TOP_RISK_MIN_SCORE: f64 = 30.0;
/// Rollup max at or above this marks a category for focused review.
const CATEGORY_REVIEW_SCORE: f64 = 60.0;
const ACTION_PLAN_MAX_ITEMS: usize = 5;

/// Consolidate scored clauses into the final document result.
///
/// `clause_risks` must be in document order and non-empty; the engine
/// enforces both before calling.
pub fn aggregate(
    clause_risks: Vec<ClauseRisk>,
    filename: &str,
    chars: usize,
    status: AnalysisStatus,
    config: &EngineConfig,
) -> DocumentRisk {
    debug_assert!(!clause_risks.is_empty());

    let overall_score = document_score(&clause_risks, config.floor_weight_chars);
    let overall_level = SeverityLevel::from_score(overall_score);

    let mut distribution = RiskDistribution::default();
    for risk in &clause_risks {
        distribution.record(risk.severity);
    }

    let category_rollups = rollups(&clause_risks);
    let confidence = document_confidence(&clause_risks);
    let top_risks = top_risks(&clause_risks, config.top_n);

    let mut deal_breakers = Vec::new();
    let mut must_address = Vec::new();
    let mut should_negotiate = Vec::new();
    let mut acceptable = Vec::new();
    for risk in bucket_order(&clause_risks) {
        match risk.bucket() {
            RiskBucket::DealBreaker => deal_breakers.push(action_item(
                risk,
                deal_breakers.len() + 1,
                "Deal-breaker unless revised",
            )),
            RiskBucket::MustAddress => must_address.push(action_item(
                risk,
                must_address.len() + 1,
                "High risk; resolve before signing",
            )),
            RiskBucket::ShouldNegotiate => should_negotiate.push(risk.reference()),
            RiskBucket::Acceptable => acceptable.push(risk.reference()),
        }
    }

    let executive_summary = executive_summary(overall_level, &distribution, &top_risks);
    let action_plan = action_plan(
        &deal_breakers,
        &must_address,
        &should_negotiate,
        &category_rollups,
    );

    DocumentRisk {
        metadata: DocumentMetadata {
            filename: filename.to_string(),
            chars,
            clauses_analyzed: clause_risks.len(),
            analyzed_at: Utc::now(),
            status,
        },
        summary: RiskSummary {
            overall_score,
            overall_level,
            confidence,
            distribution,
            category_rollups,
            recommendation: overall_recommendation(overall_level).to_string(),
        },
        executive_summary,
        clause_risks,
        top_risks,
        must_address_immediately: must_address,
        should_negotiate,
        acceptable_as_is: acceptable,
        deal_breakers,
        action_plan,
    }
}

/// Length-weighted mean of clause scores. The floor weight keeps a terse
/// clause ("irrevocable, perpetual") from vanishing next to boilerplate.
fn document_score(clause_risks: &[ClauseRisk], floor_weight_chars: usize) -> f64 {
    let floor = floor_weight_chars.max(1) as f64;
    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for risk in clause_risks {
        let weight = (risk.clause_chars as f64).max(floor);
        weighted += weight * risk.score;
        total_weight += weight;
    }
    if total_weight == 0.0 {
        return 0.0;
    }
    (weighted / total_weight).clamp(0.0, 100.0)
}

fn document_confidence(clause_risks: &[ClauseRisk]) -> ConfidenceLevel {
    let confidences: Vec<f64> = clause_risks
        .iter()
        .flat_map(|r| r.findings.iter().map(|f| f.confidence))
        .collect();
    if confidences.is_empty() {
        return ConfidenceLevel::Low;
    }
    ConfidenceLevel::from_mean(confidences.iter().sum::<f64>() / confidences.len() as f64)
}

fn rollups(clause_risks: &[ClauseRisk]) -> Vec<CategoryRollup> {
    struct Acc {
        clause_count: usize,
        finding_count: usize,
        max: f64,
        sum: f64,
    }
    let mut by_category: BTreeMap<RiskCategory, Acc> = BTreeMap::new();
    for risk in clause_risks {
        for (&category, &score) in &risk.category_scores {
            let entry = by_category.entry(category).or_insert(Acc {
                clause_count: 0,
                finding_count: 0,
                max: 0.0,
                sum: 0.0,
            });
            entry.clause_count += 1;
            entry.finding_count += risk
                .findings
                .iter()
                .filter(|f| f.category == category)
                .count();
            entry.max = entry.max.max(score);
            entry.sum += score;
        }
    }
    let mut rollups: Vec<CategoryRollup> = by_category
        .into_iter()
        .map(|(category, acc)| CategoryRollup {
            category,
            clause_count: acc.clause_count,
            finding_count: acc.finding_count,
            max_score: acc.max,
            mean_score: acc.sum / acc.clause_count as f64,
        })
        .collect();
    rollups.sort_by_key(|r| r.category.priority_rank());
    rollups
}

/// Strongest single finding for a clause: what the issue is and what to do.
fn headline(risk: &ClauseRisk) -> (String, String) {
    match risk
        .findings
        .iter()
        .max_by(|a, b| a.evidence().total_cmp(&b.evidence()))
    {
        Some(finding) => (finding.explanation.clone(), finding.recommendation.clone()),
        None => (
            "No specific risk indicators detected".to_string(),
            default_action(risk.severity).to_string(),
        ),
    }
}

fn default_action(severity: SeverityLevel) -> &'static str {
    match severity {
        SeverityLevel::Critical => {
            "Have legal counsel review immediately. Consider rejecting or significantly revising."
        }
        SeverityLevel::High => "Negotiate changes to this clause before signing.",
        SeverityLevel::Medium => "Review carefully and consider negotiating.",
        SeverityLevel::Low => "Clause appears standard. Review for completeness.",
    }
}

fn top_risks(clause_risks: &[ClauseRisk], top_n: usize) -> Vec<TopRisk> {
    let mut ranked: Vec<&ClauseRisk> = clause_risks
        .iter()
        .filter(|r| r.score >= TOP_RISK_MIN_SCORE)
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| {
                let pa = a.dominant_category().map_or(u8::MAX, |c| c.priority_rank());
                let pb = b.dominant_category().map_or(u8::MAX, |c| c.priority_rank());
                pa.cmp(&pb)
            })
            .then(a.clause_index.cmp(&b.clause_index))
    });
    ranked
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(i, risk)| {
            let (issue, action) = headline(risk);
            TopRisk {
                rank: i + 1,
                clause_index: risk.clause_index,
                reference: risk.reference(),
                score: risk.score,
                category: risk.dominant_category(),
                issue,
                action,
            }
        })
        .collect()
}

/// Clauses ordered for bucket assignment: score descending so action-item
/// priorities track severity, ties in document order.
fn bucket_order(clause_risks: &[ClauseRisk]) -> Vec<&ClauseRisk> {
    let mut ordered: Vec<&ClauseRisk> = clause_risks.iter().collect();
    ordered.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.clause_index.cmp(&b.clause_index))
    });
    ordered
}

fn action_item(risk: &ClauseRisk, priority: usize, urgency: &str) -> ActionItem {
    let (issue, action) = headline(risk);
    ActionItem {
        priority,
        clause_reference: risk.reference(),
        issue,
        urgency: urgency.to_string(),
        action,
    }
}

fn overall_recommendation(level: SeverityLevel) -> &'static str {
    match level {
        SeverityLevel::Critical => {
            "DO NOT SIGN without significant negotiation. Multiple critical issues detected."
        }
        SeverityLevel::High => {
            "Review high-risk clauses carefully before signing. Negotiation strongly recommended."
        }
        SeverityLevel::Medium => {
            "Generally acceptable with some concerns. Consider negotiating key points."
        }
        SeverityLevel::Low => "Contract appears balanced. Standard terms with minimal risk.",
    }
}

fn executive_summary(
    level: SeverityLevel,
    distribution: &RiskDistribution,
    top_risks: &[TopRisk],
) -> String {
    let mut parts = Vec::new();
    parts.push(
        match level {
            SeverityLevel::Critical => {
                "This contract contains CRITICAL risks that require immediate attention."
            }
            SeverityLevel::High => {
                "This contract has significant risks that should be addressed before signing."
            }
            SeverityLevel::Medium => {
                "This contract has some areas of concern but is generally reasonable."
            }
            SeverityLevel::Low => "This contract appears balanced with minimal risk.",
        }
        .to_string(),
    );
    parts.push(format!(
        "Analysis found {} critical, {} high, {} medium, and {} low risk clauses.",
        distribution.critical, distribution.high, distribution.medium, distribution.low
    ));
    if let Some(top) = top_risks.first() {
        if let Some(category) = top.category {
            parts.push(format!(
                "The highest-scoring concern is a {} issue in {} ({:.0}/100).",
                category.label().to_lowercase(),
                top.reference,
                top.score
            ));
        }
    }
    parts.join(" ")
}

fn action_plan(
    deal_breakers: &[ActionItem],
    must_address: &[ActionItem],
    should_negotiate: &[String],
    rollups: &[CategoryRollup],
) -> Vec<String> {
    let mut plan = Vec::new();
    if !deal_breakers.is_empty() {
        let refs: Vec<&str> = deal_breakers
            .iter()
            .take(3)
            .map(|a| a.clause_reference.as_str())
            .collect();
        plan.push(format!(
            "Resolve {} deal-breaker clause(s) before any signature: {}",
            deal_breakers.len(),
            refs.join(", ")
        ));
    }
    if !must_address.is_empty() {
        let refs: Vec<&str> = must_address
            .iter()
            .take(3)
            .map(|a| a.clause_reference.as_str())
            .collect();
        plan.push(format!(
            "Address {} high-risk clause(s): {}",
            must_address.len(),
            refs.join(", ")
        ));
    }
    if !should_negotiate.is_empty() {
        plan.push(format!(
            "Negotiate {} medium-risk clause(s) before signing",
            should_negotiate.len()
        ));
    }
    for rollup in rollups
        .iter()
        .filter(|r| r.max_score >= CATEGORY_REVIEW_SCORE)
        .take(2)
    {
        plan.push(format!(
            "Review all {} clauses for balance",
            rollup.category.label().to_lowercase()
        ));
    }
    plan.push("Have legal counsel review before signing".to_string());
    plan.truncate(ACTION_PLAN_MAX_ITEMS);
    plan.into_iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect()
}
