//! HTTP provider for deep analysis against an OpenAI-compatible
//! chat-completions endpoint with a JSON response format.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use risk_types::{AnalysisContext, ClauseSpan, RiskCategory};

use crate::error::AnalyzerError;

use super::{DeepAnalysis, WireResponse};

const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f64 = 0.3;

const SYSTEM_PROMPT: &str = "\
You are a contract risk analyst. Examine the clause and report every concrete \
risk you identify. Respond with a JSON object of the form \
{\"issues\": [{\"category\": ..., \"confidence\": ..., \"severity\": ..., \
\"explanation\": ..., \"recommendation\": ...}]}. \
`category` must be exactly one of: financial, legal_liability, termination, \
intellectual_property, confidentiality, dispute_resolution, compliance, \
operational. `confidence` and `severity` are numbers between 0 and 1. \
Report no issues as an empty list. Do not invent risks that are not \
supported by the clause text.";

/// Deep analyzer backed by a hosted language-understanding service.
pub struct HttpAnalyzer {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl HttpAnalyzer {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Read endpoint settings from the environment.
    ///
    /// Expected variables:
    /// - RISK_ANALYZER_API_KEY: bearer token (required)
    /// - RISK_ANALYZER_BASE_URL: default "https://api.groq.com/openai/v1"
    /// - RISK_ANALYZER_MODEL: default model name
    pub fn from_env() -> Result<Self, AnalyzerError> {
        let api_key = std::env::var("RISK_ANALYZER_API_KEY")
            .map_err(|_| AnalyzerError::Transport("RISK_ANALYZER_API_KEY not set".into()))?;
        let base_url = std::env::var("RISK_ANALYZER_BASE_URL")
            .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string());
        let mut analyzer = Self::new(&base_url, &api_key);
        if let Ok(model) = std::env::var("RISK_ANALYZER_MODEL") {
            analyzer.model = model;
        }
        Ok(analyzer)
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    fn user_prompt(clause: &ClauseSpan, context: &AnalysisContext) -> String {
        let mut prompt = String::new();
        if let Some(document_type) = &context.document_type {
            prompt.push_str(&format!("Document type: {}\n", document_type));
        }
        prompt.push_str(&format!("Reviewer role: {:?}\n", context.user_role));
        if let Some(industry) = &context.industry {
            prompt.push_str(&format!("Industry: {}\n", industry));
        }
        if let Some(jurisdiction) = &context.jurisdiction {
            prompt.push_str(&format!("Jurisdiction: {}\n", jurisdiction));
        }
        if let Some(value) = context.contract_value {
            prompt.push_str(&format!("Contract value: {}\n", value));
        }
        prompt.push_str(&format!(
            "Valid categories: {}\n\nClause:\n{}",
            RiskCategory::ALL
                .iter()
                .map(|c| c.wire_name())
                .collect::<Vec<_>>()
                .join(", "),
            clause.text
        ));
        prompt
    }
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[async_trait]
impl DeepAnalysis for HttpAnalyzer {
    async fn analyze(
        &self,
        clause: &ClauseSpan,
        context: &AnalysisContext,
    ) -> Result<WireResponse, AnalyzerError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": Self::user_prompt(clause, context) },
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
            "response_format": { "type": "json_object" },
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalyzerError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzerError::Status(status.as_u16()));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| AnalyzerError::Malformed(e.to_string()))?;
        let content = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| AnalyzerError::Malformed("response has no choices".into()))?;

        debug!(clause = clause.index, bytes = content.len(), "deep analysis response");
        serde_json::from_str(content).map_err(|e| AnalyzerError::Malformed(e.to_string()))
    }
}
