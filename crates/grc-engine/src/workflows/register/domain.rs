use chrono::NaiveDate;
use serde::Serialize;

use super::parser::{coerce_rating, RegisterRow};
use crate::workflows::schedule::ReviewWindow;
use crate::workflows::tier::{RiskTier, TierScheme};

const PLACEHOLDER: &str = "—";

/// Register line scored on the likelihood-impact grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskRegisterEntry {
    pub risk_id: String,
    pub risk_title: String,
    pub category: String,
    pub risk_owner: String,
    pub likelihood: u8,
    pub impact: u8,
    pub score: u32,
    pub tier: RiskTier,
    pub existing_controls: String,
    pub remediation_action: String,
    pub review_date: String,
    pub status: String,
    pub framework_ref: String,
    pub review: ReviewWindow,
}

impl RiskRegisterEntry {
    pub(crate) fn from_row(row: RegisterRow, today: NaiveDate) -> Self {
        let likelihood = coerce_rating(row.likelihood.as_deref());
        let impact = coerce_rating(row.impact.as_deref());
        let score = u32::from(likelihood) * u32::from(impact);
        let review = ReviewWindow::evaluate(row.review_date.as_deref(), today);

        Self {
            risk_id: text(row.risk_id),
            risk_title: text(row.risk_title),
            category: text(row.category),
            risk_owner: text(row.risk_owner),
            likelihood,
            impact,
            score,
            tier: TierScheme::LikelihoodImpact.classify(score),
            existing_controls: text(row.existing_controls),
            remediation_action: text(row.remediation_action),
            review_date: text(row.review_date),
            status: text(row.status),
            framework_ref: text(row.framework_ref),
            review,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status.eq_ignore_ascii_case("open")
    }
}

fn text(value: Option<String>) -> String {
    value.unwrap_or_else(|| PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date")
    }

    #[test]
    fn product_is_classified_on_grid() {
        let row = RegisterRow {
            risk_id: Some("R-07".to_string()),
            likelihood: Some("4".to_string()),
            impact: Some("5".to_string()),
            review_date: Some("2026-03-14".to_string()),
            status: Some("OPEN".to_string()),
            ..RegisterRow::default()
        };
        let entry = RiskRegisterEntry::from_row(row, today());
        assert_eq!(entry.score, 20);
        assert_eq!(entry.tier, RiskTier::Critical);
        assert!(entry.review.overdue);
        assert_eq!(entry.review.days_until, Some(-1));
        assert!(entry.is_open());
    }

    #[test]
    fn missing_columns_use_placeholders_and_minimum_rating() {
        let entry = RiskRegisterEntry::from_row(RegisterRow::default(), today());
        assert_eq!(entry.risk_title, "—");
        assert_eq!(entry.review_date, "—");
        assert_eq!((entry.likelihood, entry.impact, entry.score), (1, 1, 1));
        assert_eq!(entry.tier, RiskTier::Low);
        assert_eq!(entry.review.days_until, None);
        assert!(!entry.is_open());
    }
}
