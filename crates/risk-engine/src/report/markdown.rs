//! Markdown rendering of a document assessment.

use std::fmt::Write;

use risk_types::{AnalysisStatus, DocumentRisk, SeverityLevel};

fn severity_marker(level: SeverityLevel) -> &'static str {
    match level {
        SeverityLevel::Critical => "🔴",
        SeverityLevel::High => "🟠",
        SeverityLevel::Medium => "🟡",
        SeverityLevel::Low => "🟢",
    }
}

/// Render the full assessment as a standalone markdown document.
pub fn to_markdown(result: &DocumentRisk) -> String {
    let mut out = String::new();
    let summary = &result.summary;

    let _ = writeln!(out, "# Contract Risk Assessment: {}", result.metadata.filename);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "**Overall Risk: {} {} ({:.0}/100)**, confidence {:?}",
        severity_marker(summary.overall_level),
        summary.overall_level.label(),
        summary.overall_score,
        summary.confidence,
    );
    let _ = writeln!(out);
    match &result.metadata.status {
        AnalysisStatus::Complete => {
            let _ = writeln!(out, "_Analysis: complete_");
        }
        AnalysisStatus::Partial { degraded_clauses } => {
            let clause_list = degraded_clauses
                .iter()
                .map(|i| (i + 1).to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(
                out,
                "_Analysis: partial (deep analysis unavailable for clauses: {})_",
                clause_list
            );
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Executive Summary");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", result.executive_summary);
    let _ = writeln!(out);
    let _ = writeln!(out, "> {}", summary.recommendation);
    let _ = writeln!(out);

    let d = &summary.distribution;
    let _ = writeln!(out, "## Risk Distribution");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Severity | Clauses |");
    let _ = writeln!(out, "|----------|---------|");
    let _ = writeln!(out, "| 🔴 Critical | {} |", d.critical);
    let _ = writeln!(out, "| 🟠 High | {} |", d.high);
    let _ = writeln!(out, "| 🟡 Medium | {} |", d.medium);
    let _ = writeln!(out, "| 🟢 Low | {} |", d.low);
    let _ = writeln!(out);

    if !summary.category_rollups.is_empty() {
        let _ = writeln!(out, "## Risk by Category");
        let _ = writeln!(out);
        let _ = writeln!(out, "| Category | Clauses | Findings | Max | Mean |");
        let _ = writeln!(out, "|----------|---------|----------|-----|------|");
        for rollup in &summary.category_rollups {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {:.0} | {:.0} |",
                rollup.category.label(),
                rollup.clause_count,
                rollup.finding_count,
                rollup.max_score,
                rollup.mean_score,
            );
        }
        let _ = writeln!(out);
    }

    if !result.deal_breakers.is_empty() {
        let _ = writeln!(out, "## ⛔ Deal-Breakers");
        let _ = writeln!(out);
        for item in &result.deal_breakers {
            let _ = writeln!(
                out,
                "{}. **{}**: {}\n   - {}",
                item.priority, item.clause_reference, item.issue, item.action
            );
        }
        let _ = writeln!(out);
    }

    if !result.must_address_immediately.is_empty() {
        let _ = writeln!(out, "## Must Address Before Signing");
        let _ = writeln!(out);
        for item in &result.must_address_immediately {
            let _ = writeln!(
                out,
                "{}. **{}**: {}\n   - {}",
                item.priority, item.clause_reference, item.issue, item.action
            );
        }
        let _ = writeln!(out);
    }

    if !result.top_risks.is_empty() {
        let _ = writeln!(out, "## Top Risks");
        let _ = writeln!(out);
        for top in &result.top_risks {
            let category = top
                .category
                .map(|c| c.label())
                .unwrap_or("General");
            let _ = writeln!(
                out,
                "{}. **{}** ({:.0}/100, {})  \n   {}  \n   _Action: {}_",
                top.rank, top.reference, top.score, category, top.issue, top.action
            );
        }
        let _ = writeln!(out);
    }

    if !result.should_negotiate.is_empty() {
        let _ = writeln!(out, "## Should Negotiate");
        let _ = writeln!(out);
        for reference in &result.should_negotiate {
            let _ = writeln!(out, "- {}", reference);
        }
        let _ = writeln!(out);
    }

    if !result.acceptable_as_is.is_empty() {
        let _ = writeln!(out, "## Acceptable As-Is");
        let _ = writeln!(out);
        for reference in &result.acceptable_as_is {
            let _ = writeln!(out, "- {}", reference);
        }
        let _ = writeln!(out);
    }

    if !result.action_plan.is_empty() {
        let _ = writeln!(out, "## Recommended Action Plan");
        let _ = writeln!(out);
        for step in &result.action_plan {
            let _ = writeln!(out, "{}", step);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "---\n_{} clauses analyzed, {} characters._",
        result.metadata.clauses_analyzed, result.metadata.chars
    );
    out
}
