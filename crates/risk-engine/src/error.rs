use thiserror::Error;

/// Top-level engine failures. Per-clause deep-analysis failures are not
/// errors; they degrade the clause and are recorded in the result metadata.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("no clauses found in input")]
    NoClauses,

    #[error(transparent)]
    Corpus(#[from] rule_corpus::CorpusError),
}

/// Failures of a single deep-analysis call.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("analyzer service returned status {0}")]
    Status(u16),

    #[error("deep analysis timed out")]
    Timeout,

    #[error("malformed analyzer response: {0}")]
    Malformed(String),
}

impl AnalyzerError {
    /// Transient failures get one bounded retry; validation failures never do.
    pub fn is_transient(&self) -> bool {
        match self {
            AnalyzerError::Transport(_) | AnalyzerError::Timeout => true,
            AnalyzerError::Status(code) => *code >= 500,
            AnalyzerError::Malformed(_) => false,
        }
    }
}
