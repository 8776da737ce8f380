//! The Bedrock-backed analyzer.
//!
//! One Converse call per completed session: system prompt pins the JSON
//! contract, the user message carries the rendered history, and the reply
//! is parsed into a [`TriageSummary`]. Referral synthesis stays with the
//! orchestrator; this module never sets one.

use std::collections::HashMap;
use std::time::Duration;

use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, Message, SystemContentBlock,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use neuriq_core::analyzer::{Analyzer, BoxFuture};
use neuriq_core::disease::Disease;
use neuriq_core::error::AnalysisError;
use neuriq_core::summary::{ExtractedProfile, TriageSummary};
use neuriq_core::turn::Turn;

use crate::error::BedrockError;
use crate::prompt;

/// Analyzer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Model or inference profile id passed to Converse.
    pub model_id: String,
    /// Seconds before an in-flight call is abandoned as a retryable
    /// timeout.
    pub timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            model_id: "us.anthropic.claude-sonnet-4-20250514-v1:0".to_string(),
            timeout_secs: 30,
        }
    }
}

pub struct BedrockAnalyzer {
    client: aws_sdk_bedrockruntime::Client,
    config: AnalysisConfig,
}

impl BedrockAnalyzer {
    pub fn new(sdk_config: &aws_config::SdkConfig, config: AnalysisConfig) -> Self {
        BedrockAnalyzer {
            client: aws_sdk_bedrockruntime::Client::new(sdk_config),
            config,
        }
    }

    async fn converse(&self, turns: &[Turn], disease: Disease) -> Result<String, BedrockError> {
        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(prompt::analysis_request(turns)))
            .build()
            .map_err(|e| BedrockError::Invocation(e.to_string()))?;

        let response = self
            .client
            .converse()
            .model_id(&self.config.model_id)
            .system(SystemContentBlock::Text(prompt::system_prompt(disease)))
            .messages(message)
            .send()
            .await
            .map_err(|e| BedrockError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| BedrockError::ResponseParse("no message in response".to_string()))?;

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");
        Ok(text)
    }
}

impl Analyzer for BedrockAnalyzer {
    fn analyze<'a>(
        &'a self,
        turns: &'a [Turn],
        disease: Disease,
    ) -> BoxFuture<'a, Result<TriageSummary, AnalysisError>> {
        Box::pin(async move {
            info!(
                disease = disease.as_str(),
                turns = turns.len(),
                model_id = %self.config.model_id,
                "starting triage analysis"
            );
            let limit = Duration::from_secs(self.config.timeout_secs);
            let text = tokio::time::timeout(limit, self.converse(turns, disease))
                .await
                .map_err(|_| BedrockError::Timeout {
                    seconds: self.config.timeout_secs,
                })??;
            let summary = parse_summary(&text, disease)?;
            info!(
                disease = disease.as_str(),
                risk_score = summary.risk_score,
                "triage analysis complete"
            );
            Ok(summary)
        })
    }
}

/// Wire shape of the model's JSON reply.
#[derive(Debug, Deserialize)]
struct SummaryWire {
    risk_score: f64,
    #[serde(default)]
    disease: Option<String>,
    summary: String,
    #[serde(default)]
    profile: Option<HashMap<String, String>>,
}

/// Parse the model's reply into a summary for the routed pathway.
///
/// The model's own disease label is advisory only: a mismatch is logged
/// and dropped, because classification is fixed at routing time. Scores
/// are clamped onto the 0..=100 scale.
pub fn parse_summary(text: &str, disease: Disease) -> Result<TriageSummary, BedrockError> {
    let trimmed = strip_fences(text.trim());
    let wire: SummaryWire = serde_json::from_str(trimmed).map_err(|e| {
        BedrockError::SchemaViolation(format!("failed to parse summary: {e}. Response: {text}"))
    })?;

    if let Some(claimed) = wire.disease.as_deref()
        && claimed != disease.as_str()
    {
        warn!(
            claimed,
            routed = disease.as_str(),
            "model disease label ignored"
        );
    }

    let profile = wire
        .profile
        .filter(|entries| !entries.is_empty())
        .map(|entries| ExtractedProfile { disease, entries });

    Ok(TriageSummary {
        risk_score: wire.risk_score.clamp(0.0, 100.0),
        disease,
        summary: wire.summary,
        critical: false,
        profile,
        referral: None,
    })
}

/// Models occasionally wrap the object in a markdown fence despite the
/// contract. Strip one if present.
fn strip_fences(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim().strip_suffix("```").unwrap_or(inner).trim()
}
