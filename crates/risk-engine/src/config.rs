//! Engine configuration.

use std::time::Duration;

/// Tuning knobs for the analysis pipeline. Defaults are safe for interactive
/// use; construct explicitly or load from the environment.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum fast-tier evidence (severity x confidence) for a clause to be
    /// escalated to deep analysis.
    pub materiality_threshold: f64,
    /// Concurrent deep-analysis calls in flight.
    pub max_workers: usize,
    /// Per-clause deadline for a deep-analysis call.
    pub deep_timeout: Duration,
    /// Number of entries in the ranked top-risk list.
    pub top_n: usize,
    /// Characters of context around a match used for clause-less attribution
    /// and for boost/mitigation term lookup.
    pub local_window_chars: usize,
    /// Floor weight (in characters) so short clauses still contribute to the
    /// document score.
    pub floor_weight_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            materiality_threshold: 0.4,
            max_workers: 4,
            deep_timeout: Duration::from_secs(20),
            top_n: 10,
            local_window_chars: 120,
            floor_weight_chars: 160,
        }
    }
}

impl EngineConfig {
    /// Load overrides from environment variables.
    ///
    /// Recognized variables:
    /// - RISK_MATERIALITY_THRESHOLD: float in [0,1]
    /// - RISK_MAX_WORKERS: positive integer
    /// - RISK_DEEP_TIMEOUT_SECS: positive integer
    /// - RISK_TOP_N: positive integer
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(v) = env_parse::<f64>("RISK_MATERIALITY_THRESHOLD") {
            config.materiality_threshold = v.clamp(0.0, 1.0);
        }
        if let Some(v) = env_parse::<usize>("RISK_MAX_WORKERS") {
            config.max_workers = v.max(1);
        }
        if let Some(v) = env_parse::<u64>("RISK_DEEP_TIMEOUT_SECS") {
            config.deep_timeout = Duration::from_secs(v.max(1));
        }
        if let Some(v) = env_parse::<usize>("RISK_TOP_N") {
            config.top_n = v.max(1);
        }
        config
    }

    pub fn with_materiality_threshold(mut self, threshold: f64) -> Self {
        self.materiality_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = workers.max(1);
        self
    }

    pub fn with_deep_timeout(mut self, timeout: Duration) -> Self {
        self.deep_timeout = timeout;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n.max(1);
        self
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = EngineConfig::default();
        assert!(config.materiality_threshold > 0.0);
        assert!(config.max_workers >= 1);
        assert!(config.top_n >= 1);
    }

    #[test]
    fn test_builders_clamp() {
        let config = EngineConfig::default()
            .with_materiality_threshold(2.0)
            .with_max_workers(0);
        assert_eq!(config.materiality_threshold, 1.0);
        assert_eq!(config.max_workers, 1);
    }
}
