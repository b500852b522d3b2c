//! Caller-supplied context that biases severity interpretation.

use serde::{Deserialize, Serialize};

/// Which side of the table the reader sits on. A liability cap reads very
/// differently for the party that drafted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    DraftingParty,
    Counterparty,
    #[default]
    Neutral,
}

/// How far the pipeline should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisDepth {
    /// Deep-analyze only clauses above the materiality threshold.
    #[default]
    Standard,
    /// Deep-analyze every clause, regardless of fast-tier evidence.
    Full,
}

/// Optional document-level context passed through to the deep analyzer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisContext {
    pub document_type: Option<String>,
    pub user_role: UserRole,
    pub industry: Option<String>,
    pub jurisdiction: Option<String>,
    pub contract_value: Option<f64>,
    pub depth: AnalysisDepth,
}

impl AnalysisContext {
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.user_role = role;
        self
    }

    pub fn with_depth(mut self, depth: AnalysisDepth) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_document_type(mut self, document_type: &str) -> Self {
        self.document_type = Some(document_type.to_string());
        self
    }
}
