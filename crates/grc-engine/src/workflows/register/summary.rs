use serde::Serialize;

use super::domain::RiskRegisterEntry;
use crate::workflows::schedule::{review_alerts, ReviewAlert};
use crate::workflows::tier::{tier_distribution, TierCount};

/// Headline figures for an imported risk register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterSummary {
    pub total: usize,
    pub open: usize,
    pub overdue_reviews: usize,
    pub due_soon_reviews: usize,
    pub tier_distribution: Vec<TierCount>,
    pub review_alerts: Vec<ReviewAlert>,
}

impl RegisterSummary {
    pub fn from_entries(entries: &[RiskRegisterEntry]) -> Self {
        Self {
            total: entries.len(),
            open: entries.iter().filter(|entry| entry.is_open()).count(),
            overdue_reviews: entries.iter().filter(|entry| entry.review.overdue).count(),
            due_soon_reviews: entries.iter().filter(|entry| entry.review.due_soon).count(),
            tier_distribution: tier_distribution(entries.iter().map(|entry| entry.tier)),
            review_alerts: review_alerts(
                entries
                    .iter()
                    .map(|entry| (entry.risk_id.as_str(), entry.review)),
            ),
        }
    }
}

/// Highest likelihood-impact product first; ties keep input order.
pub fn rank_by_score(entries: &[RiskRegisterEntry]) -> Vec<&RiskRegisterEntry> {
    let mut ranked: Vec<&RiskRegisterEntry> = entries.iter().collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
