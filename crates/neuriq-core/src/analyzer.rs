//! The analysis interface.
//!
//! Turn history in, structured triage summary out. The concrete analyzer
//! lives in `neuriq-bedrock`; the orchestrator only sees this trait so
//! tests can substitute a scripted one.

use std::future::Future;
use std::pin::Pin;

use crate::disease::Disease;
use crate::error::AnalysisError;
use crate::summary::TriageSummary;
use crate::turn::Turn;

/// Boxed future so the traits below stay dyn-compatible.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Abstract analysis call over a session's collected history.
///
/// Failures are retryable; implementations must not assume the caller
/// discards anything on error.
pub trait Analyzer: Send + Sync {
    fn analyze<'a>(
        &'a self,
        turns: &'a [Turn],
        disease: Disease,
    ) -> BoxFuture<'a, Result<TriageSummary, AnalysisError>>;
}
