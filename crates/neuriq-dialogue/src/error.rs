use thiserror::Error;

/// Input rejected because of where the session currently is.
///
/// None of these corrupt the session; the caller may retry once the state
/// allows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionStateError {
    #[error("session is terminal and accepts no further input")]
    Terminal,

    #[error("session has not reached the assessment step")]
    NotTerminal,

    #[error("a turn is already outstanding for this session")]
    TurnOutstanding,

    #[error("an analysis is already in flight for this session")]
    AnalysisPending,
}
