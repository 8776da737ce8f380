use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown disease pathway: {0}")]
    UnknownDisease(String),
}

/// Failure of the external analysis call.
///
/// Always retryable. The orchestrator keeps the session and its persisted
/// history untouched when one of these comes back.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("analysis timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("analysis transport failure: {0}")]
    Transport(String),

    #[error("analysis response malformed: {0}")]
    MalformedResponse(String),
}
