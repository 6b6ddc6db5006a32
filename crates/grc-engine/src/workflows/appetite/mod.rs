//! Risk appetite monitoring.
//!
//! Key risk indicators are rated Red/Amber/Green against an appetite and a
//! tolerance threshold. The thresholds are read relative to each metric's
//! direction, so "higher is better" metrics invert every comparison.

mod catalogue;
mod digest;
mod domain;
mod evaluator;
mod ledger;
mod narrative;
mod summary;

pub use catalogue::{CatalogueEntry, MetricCatalogue};
pub use digest::build_digest;
pub use domain::{Direction, MetricRecord, MetricResult, RagStatus, ThresholdError, Trend};
pub use evaluator::{breach, period_change, rag, trend, validate_thresholds, AppetiteEvaluator};
pub use ledger::{MetricRegister, HISTORY_DEPTH};
pub use narrative::{
    briefing_from_digest, committee_briefing, NarrativeError, NarrativeSummarizer,
    UnconfiguredSummarizer,
};
pub(crate) use narrative::unavailable_briefing;
pub use summary::{rank_by_rag, AppetiteSummary, RagCount};
