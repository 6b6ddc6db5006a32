use serde::{Deserialize, Serialize};

use super::domain::QuestionnaireField;
use super::rules::{AmberRisk, RedRisk};

/// Onboarding outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationStatus {
    Approved,
    Conditional,
    Reject,
}

impl ValidationStatus {
    /// Report ordering: most severe first.
    pub const fn ordered() -> [Self; 3] {
        [Self::Reject, Self::Conditional, Self::Approved]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Conditional => "Conditional",
            Self::Reject => "Reject",
        }
    }

    pub(crate) const fn severity_rank(self) -> u8 {
        match self {
            Self::Reject => 0,
            Self::Conditional => 1,
            Self::Approved => 2,
        }
    }
}

pub(crate) fn resolve_status(
    missing: &[QuestionnaireField],
    red: &[RedRisk],
    amber: &[AmberRisk],
) -> ValidationStatus {
    if !missing.is_empty() || !red.is_empty() {
        return ValidationStatus::Reject;
    }
    if amber.iter().any(|risk| risk.escalate) {
        return ValidationStatus::Reject;
    }
    if !amber.is_empty() {
        return ValidationStatus::Conditional;
    }
    ValidationStatus::Approved
}

pub(crate) fn build_rationale(
    status: ValidationStatus,
    missing: &[QuestionnaireField],
    red: &[RedRisk],
    amber: &[AmberRisk],
) -> String {
    match status {
        ValidationStatus::Reject => {
            let mut reasons = Vec::new();
            if !missing.is_empty() {
                reasons.push(format!("{} mandatory field(s) missing", missing.len()));
            }
            if !red.is_empty() {
                reasons.push(format!("{} critical control failure(s)", red.len()));
            }
            let escalated = amber.iter().filter(|risk| risk.escalate).count();
            if escalated > 0 {
                reasons.push(format!(
                    "{escalated} amber risk(s) escalated due to materiality"
                ));
            }
            format!("Rejected because: {}", reasons.join("; "))
        }
        ValidationStatus::Conditional => format!(
            "Conditional because: {} amber risk(s) require remediation within agreed timeframe",
            amber.len()
        ),
        ValidationStatus::Approved => {
            "Approved: all mandatory controls satisfied and no risks identified".to_string()
        }
    }
}
