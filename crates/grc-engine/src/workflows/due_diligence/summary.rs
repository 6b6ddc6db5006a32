use serde::Serialize;

use super::decision::ValidationStatus;
use super::ValidationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: ValidationStatus,
    pub count: usize,
}

/// Assessment distribution across a batch of questionnaires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub status_counts: Vec<StatusCount>,
    pub red_risks: usize,
    pub amber_risks: usize,
    pub missing_fields: usize,
}

impl ValidationSummary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        Self {
            total: results.len(),
            status_counts: ValidationStatus::ordered()
                .into_iter()
                .map(|status| StatusCount {
                    status,
                    count: results
                        .iter()
                        .filter(|result| result.status == status)
                        .count(),
                })
                .collect(),
            red_risks: results.iter().map(|result| result.red_risks.len()).sum(),
            amber_risks: results.iter().map(|result| result.amber_risks.len()).sum(),
            missing_fields: results
                .iter()
                .map(|result| result.missing_fields.len())
                .sum(),
        }
    }

    pub fn count(&self, status: ValidationStatus) -> usize {
        self.status_counts
            .iter()
            .find(|entry| entry.status == status)
            .map_or(0, |entry| entry.count)
    }
}

/// Rejections first, then conditional, then approved; ties keep input order.
pub fn rank_by_status(results: &[ValidationResult]) -> Vec<&ValidationResult> {
    let mut ranked: Vec<&ValidationResult> = results.iter().collect();
    ranked.sort_by_key(|result| result.status.severity_rank());
    ranked
}
