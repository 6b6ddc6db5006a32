//! Supplier due-diligence validation.
//!
//! Each questionnaire passes through three independent scans (missing
//! mandatory fields, failed hard controls, soft risks) before a status is
//! resolved. Soft risks escalate to rejection for material and critical
//! outsourcing arrangements.

mod decision;
mod domain;
mod policy;
mod rules;
mod summary;

#[cfg(test)]
mod tests;

pub use decision::ValidationStatus;
pub use domain::{Answer, Materiality, Questionnaire, QuestionnaireField};
pub use policy::{ControlRule, DueDiligencePolicy};
pub use rules::{AmberRisk, RedRisk};
pub use summary::{rank_by_status, StatusCount, ValidationSummary};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use domain::title_case;

const PLACEHOLDER: &str = "—";

/// Outcome of validating one questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub vendor_name: String,
    pub service_type: String,
    pub contact: String,
    pub data_classification: String,
    pub data_residency: String,
    pub outsourcing: String,
    pub materiality: Materiality,
    pub certifications: Vec<String>,
    pub missing_fields: Vec<QuestionnaireField>,
    pub red_risks: Vec<RedRisk>,
    pub amber_risks: Vec<AmberRisk>,
    pub status: ValidationStatus,
    pub rationale: String,
}

impl ValidationResult {
    pub fn escalated_ambers(&self) -> impl Iterator<Item = &AmberRisk> {
        self.amber_risks.iter().filter(|risk| risk.escalate)
    }

    pub fn standard_ambers(&self) -> impl Iterator<Item = &AmberRisk> {
        self.amber_risks.iter().filter(|risk| !risk.escalate)
    }
}

/// Stateless validator applying a due-diligence policy.
#[derive(Debug, Clone, Default)]
pub struct DueDiligenceValidator {
    policy: DueDiligencePolicy,
}

impl DueDiligenceValidator {
    pub fn new(policy: DueDiligencePolicy) -> Self {
        Self { policy }
    }

    pub fn standard() -> Self {
        Self::new(DueDiligencePolicy::standard())
    }

    pub fn policy(&self) -> &DueDiligencePolicy {
        &self.policy
    }

    pub fn validate(&self, questionnaire: &Questionnaire, today: NaiveDate) -> ValidationResult {
        let materiality =
            Materiality::from_answer(questionnaire.answer(QuestionnaireField::OutsourcingType));

        let missing_fields = rules::missing_fields(questionnaire, &self.policy);
        let red_risks = rules::red_risks(questionnaire, &self.policy);
        let amber_risks = rules::amber_risks(questionnaire, &self.policy, materiality, today);

        let status = decision::resolve_status(&missing_fields, &red_risks, &amber_risks);
        let rationale =
            decision::build_rationale(status, &missing_fields, &red_risks, &amber_risks);

        let outsourcing = questionnaire
            .answer(QuestionnaireField::OutsourcingType)
            .and_then(Answer::as_text)
            .map(title_case)
            .unwrap_or_else(|| "Non-Material".to_string());

        let result = ValidationResult {
            vendor_name: questionnaire.display_or(QuestionnaireField::VendorName, "Unknown"),
            service_type: questionnaire.display_or(QuestionnaireField::ServiceType, PLACEHOLDER),
            contact: questionnaire.display_or(QuestionnaireField::ContactName, PLACEHOLDER),
            data_classification: questionnaire
                .display_or(QuestionnaireField::DataClassification, PLACEHOLDER),
            data_residency: questionnaire.display_or(QuestionnaireField::DataResidency, PLACEHOLDER),
            outsourcing,
            materiality,
            certifications: questionnaire.certification_list(),
            missing_fields,
            red_risks,
            amber_risks,
            status,
            rationale,
        };

        debug!(
            vendor = %result.vendor_name,
            status = result.status.label(),
            missing = result.missing_fields.len(),
            red = result.red_risks.len(),
            amber = result.amber_risks.len(),
            "questionnaire validated"
        );
        result
    }

    pub fn validate_all(
        &self,
        questionnaires: &[Questionnaire],
        today: NaiveDate,
    ) -> Vec<ValidationResult> {
        let results: Vec<_> = questionnaires
            .iter()
            .map(|questionnaire| self.validate(questionnaire, today))
            .collect();
        info!(count = results.len(), %today, "due diligence batch validated");
        results
    }
}
