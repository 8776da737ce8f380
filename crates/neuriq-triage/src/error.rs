use thiserror::Error;
use uuid::Uuid;

use neuriq_core::error::AnalysisError;
use neuriq_dialogue::error::SessionStateError;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error(transparent)]
    Session(#[from] SessionStateError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("unknown session: {0}")]
    UnknownSession(Uuid),

    #[error("session store failure: {0}")]
    Store(String),
}

impl TriageError {
    /// Whether retrying the same call later can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TriageError::Analysis(_)
                | TriageError::Store(_)
                | TriageError::Session(SessionStateError::TurnOutstanding)
                | TriageError::Session(SessionStateError::AnalysisPending)
        )
    }
}
