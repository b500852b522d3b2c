//! Two-tier contract risk analysis.
//!
//! Tier 1 is a synchronous corpus scan over the raw text. Tier 2 escalates
//! material clauses to an external deep analyzer with bounded concurrency,
//! per-clause deadlines, and graceful degradation: a clause whose deep call
//! fails keeps its fast-tier findings and is marked degraded, never dropped.

pub mod analyzer;
pub mod clauses;
pub mod config;
pub mod error;
pub mod report;
pub mod scanner;
pub mod scorer;

mod aggregator;
mod textutil;

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use risk_types::{
    AnalysisContext, AnalysisDepth, AnalysisStatus, ClauseRisk, ClauseSpan, DocumentRisk,
    Finding, QuickScanResult,
};
use rule_corpus::RuleCorpus;

pub use analyzer::{DeepAnalysis, HttpAnalyzer};
pub use config::EngineConfig;
pub use error::{AnalyzerError, EngineError};
pub use scanner::FastScanner;

/// The analysis pipeline: corpus scan, selective deep analysis, scoring, and
/// document aggregation.
pub struct RiskEngine {
    scanner: FastScanner,
    analyzer: Option<Arc<dyn DeepAnalysis>>,
    config: EngineConfig,
}

impl RiskEngine {
    pub fn new(corpus: RuleCorpus, config: EngineConfig) -> Self {
        let corpus = Arc::new(corpus);
        Self {
            scanner: FastScanner::new(Arc::clone(&corpus), &config),
            analyzer: None,
            config,
        }
    }

    /// Engine over the built-in pattern catalog.
    pub fn builtin(config: EngineConfig) -> Result<Self, EngineError> {
        Ok(Self::new(RuleCorpus::builtin()?, config))
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn DeepAnalysis>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Fast-tier-only summary. Synchronous; suitable for interactive triage.
    pub fn quick_scan(&self, text: &str) -> Result<QuickScanResult, EngineError> {
        if text.trim().is_empty() {
            return Err(EngineError::EmptyInput);
        }
        let spans = clauses::split(text);
        if spans.is_empty() {
            return Err(EngineError::NoClauses);
        }
        Ok(self.scanner.quick_scan(text, &spans))
    }

    /// Full two-tier assessment of a document.
    #[instrument(skip_all, fields(filename = %filename, chars = text.len()))]
    pub async fn analyze_document(
        &self,
        text: &str,
        filename: &str,
        context: &AnalysisContext,
    ) -> Result<DocumentRisk, EngineError> {
        if text.trim().is_empty() {
            return Err(EngineError::EmptyInput);
        }
        let spans = clauses::split(text);
        if spans.is_empty() {
            return Err(EngineError::NoClauses);
        }
        self.analyze_document_with_spans(text, spans, filename, context)
            .await
    }

    /// Same as [`analyze_document`](Self::analyze_document) but over
    /// caller-supplied clause boundaries.
    pub async fn analyze_document_with_spans(
        &self,
        text: &str,
        spans: Vec<ClauseSpan>,
        filename: &str,
        context: &AnalysisContext,
    ) -> Result<DocumentRisk, EngineError> {
        if spans.is_empty() {
            return Err(EngineError::NoClauses);
        }

        let fast_findings = self.scanner.scan(text, &spans);
        let escalate = self.escalation_set(&spans, &fast_findings, context);
        info!(
            clauses = spans.len(),
            fast_findings = fast_findings.len(),
            escalated = escalate.len(),
            "document scan complete"
        );

        let deep_results = self.run_deep_analysis(&spans, &escalate, context).await;

        let mut per_clause: BTreeMap<usize, Vec<Finding>> = BTreeMap::new();
        for finding in fast_findings {
            per_clause.entry(finding.clause_index).or_default().push(finding);
        }

        let mut degraded_clauses = Vec::new();
        for (index, outcome) in &deep_results {
            match outcome {
                Ok(findings) => {
                    per_clause
                        .entry(*index)
                        .or_default()
                        .extend(findings.iter().cloned());
                }
                Err(error) => {
                    warn!(clause = index, %error, "deep analysis degraded");
                    degraded_clauses.push(*index);
                }
            }
        }
        degraded_clauses.sort_unstable();

        // Clauses scored in document order regardless of deep completion order.
        let clause_risks = spans
            .iter()
            .map(|span| {
                let findings = per_clause.remove(&span.index).unwrap_or_default();
                let degraded = degraded_clauses.binary_search(&span.index).is_ok();
                scorer::score_clause(span, findings, degraded)
            })
            .collect();

        let status = if degraded_clauses.is_empty() {
            AnalysisStatus::Complete
        } else {
            AnalysisStatus::Partial { degraded_clauses }
        };

        Ok(aggregator::aggregate(
            clause_risks,
            filename,
            text.chars().count(),
            status,
            &self.config,
        ))
    }

    /// Assess a single clause in isolation: fast scan, deep analysis when the
    /// evidence is material (or the analyzer call fails, degrading), scoring.
    pub async fn analyze_clause(
        &self,
        text: &str,
        context: &AnalysisContext,
    ) -> Result<ClauseRisk, EngineError> {
        if text.trim().is_empty() {
            return Err(EngineError::EmptyInput);
        }
        let span = ClauseSpan {
            index: 0,
            start: 0,
            end: text.len(),
            text: text.trim().to_string(),
            label: None,
        };
        let spans = std::slice::from_ref(&span);
        let mut findings = self.scanner.scan(text, spans);

        let mut degraded = false;
        let escalate = !self.escalation_set(spans, &findings, context).is_empty();
        if let (Some(analyzer), true) = (&self.analyzer, escalate) {
            match deep_call(Arc::clone(analyzer), &span, context, &self.config).await {
                Ok(response) => {
                    findings.extend(analyzer::accept_issues(&span, response, context));
                }
                Err(error) => {
                    warn!(%error, "deep analysis degraded");
                    degraded = true;
                }
            }
        }

        Ok(scorer::score_clause(&span, findings, degraded))
    }

    fn escalation_set(
        &self,
        spans: &[ClauseSpan],
        fast_findings: &[Finding],
        context: &AnalysisContext,
    ) -> Vec<usize> {
        if self.analyzer.is_none() {
            return Vec::new();
        }
        match context.depth {
            AnalysisDepth::Full => spans.iter().map(|s| s.index).collect(),
            AnalysisDepth::Standard => self.scanner.escalation_candidates(fast_findings),
        }
    }

    /// Fan escalated clauses out to the deep analyzer with at most
    /// `max_workers` calls in flight. Results are keyed by clause index, so
    /// completion order never leaks into the output.
    async fn run_deep_analysis(
        &self,
        spans: &[ClauseSpan],
        escalate: &[usize],
        context: &AnalysisContext,
    ) -> Vec<(usize, Result<Vec<Finding>, AnalyzerError>)> {
        let Some(analyzer) = &self.analyzer else {
            return Vec::new();
        };
        if escalate.is_empty() {
            return Vec::new();
        }

        stream::iter(escalate.iter().filter_map(|&index| {
            let span = spans.iter().find(|s| s.index == index)?.clone();
            let analyzer = Arc::clone(analyzer);
            let context = context.clone();
            let config = self.config.clone();
            Some(async move {
                let outcome = deep_call(analyzer, &span, &context, &config)
                    .await
                    .map(|response| analyzer::accept_issues(&span, response, &context));
                (index, outcome)
            })
        }))
        .buffer_unordered(self.config.max_workers.max(1))
        .collect()
        .await
    }
}

/// One deep-analysis call under the configured deadline, with a single retry
/// on transient failure. Validation failures are terminal.
async fn deep_call(
    analyzer: Arc<dyn DeepAnalysis>,
    span: &ClauseSpan,
    context: &AnalysisContext,
    config: &EngineConfig,
) -> Result<analyzer::WireResponse, AnalyzerError> {
    let attempt = || async {
        match tokio::time::timeout(config.deep_timeout, analyzer.analyze(span, context)).await {
            Ok(result) => result,
            Err(_) => Err(AnalyzerError::Timeout),
        }
    };

    match attempt().await {
        Ok(response) => Ok(response),
        Err(error) if error.is_transient() => {
            debug!(clause = span.index, %error, "retrying deep analysis");
            attempt().await
        }
        Err(error) => Err(error),
    }
}
