use thiserror::Error;

use neuriq_core::error::AnalysisError;

#[derive(Debug, Error)]
pub enum BedrockError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("response did not conform to expected schema: {0}")]
    SchemaViolation(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("analysis timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl From<BedrockError> for AnalysisError {
    fn from(error: BedrockError) -> Self {
        match error {
            BedrockError::Timeout { seconds } => AnalysisError::Timeout { seconds },
            BedrockError::Invocation(message) => AnalysisError::Transport(message),
            BedrockError::ResponseParse(message) | BedrockError::SchemaViolation(message) => {
                AnalysisError::MalformedResponse(message)
            }
            BedrockError::Serialization(error) => AnalysisError::MalformedResponse(error.to_string()),
        }
    }
}
