pub mod context;
pub mod types;

pub use context::{AnalysisContext, AnalysisDepth, UserRole};
pub use types::{
    ActionItem, AnalysisStatus, CategoryRollup, ClauseRisk, ClauseSpan, ConfidenceLevel,
    DocumentMetadata, DocumentRisk, Finding, Provenance, QuickScanResult, RiskBucket,
    RiskCategory, RiskDistribution, RiskSummary, SeverityLevel, TopRisk,
};
