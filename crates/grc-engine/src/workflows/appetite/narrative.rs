use tracing::warn;

use super::digest::build_digest;
use super::domain::MetricResult;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NarrativeError {
    #[error("narrative summarizer not configured")]
    NotConfigured,
    #[error("narrative summarizer failed: {0}")]
    Failed(String),
}

/// Turns a metric digest into committee-ready prose.
///
/// Implementations may block on network calls. The HTTP router runs them on
/// the blocking thread pool, never on an async worker.
pub trait NarrativeSummarizer: Send + Sync {
    fn summarize(&self, digest: &str) -> Result<String, NarrativeError>;
}

/// Default summarizer for deployments without a language model backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredSummarizer;

impl NarrativeSummarizer for UnconfiguredSummarizer {
    fn summarize(&self, _digest: &str) -> Result<String, NarrativeError> {
        Err(NarrativeError::NotConfigured)
    }
}

/// Briefing text for the risk committee; never fails.
pub fn committee_briefing<S>(summarizer: &S, results: &[MetricResult]) -> String
where
    S: NarrativeSummarizer + ?Sized,
{
    briefing_from_digest(summarizer, &build_digest(results))
}

/// Same as [`committee_briefing`] for a digest that is already built.
pub fn briefing_from_digest<S>(summarizer: &S, digest: &str) -> String
where
    S: NarrativeSummarizer + ?Sized,
{
    match summarizer.summarize(digest) {
        Ok(prose) => prose,
        Err(err) => unavailable_briefing(&err),
    }
}

pub(crate) fn unavailable_briefing(reason: &dyn std::fmt::Display) -> String {
    warn!(error = %reason, "committee briefing degraded");
    format!("⚠ Committee briefing unavailable: {reason}")
}
