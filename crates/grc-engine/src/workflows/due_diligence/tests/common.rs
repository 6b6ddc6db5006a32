use chrono::{Duration, NaiveDate};

use crate::workflows::due_diligence::{
    Answer, DueDiligenceValidator, Questionnaire, QuestionnaireField, ValidationResult,
};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date")
}

pub(super) fn text(value: &str) -> Option<Answer> {
    Some(Answer::Text(value.to_string()))
}

pub(super) fn days_ago(days: i64) -> Option<Answer> {
    let date = today() - Duration::days(days);
    Some(Answer::Text(date.format("%Y-%m-%d").to_string()))
}

/// Every mandatory field present, every control "yes", recent pen test,
/// one certification and UK residency.
pub(super) fn compliant(outsourcing: &str) -> Questionnaire {
    Questionnaire {
        vendor_name: text("Northwind Payroll"),
        service_type: text("Payroll processing"),
        data_classification: text("Confidential"),
        encryption_at_rest: text("yes"),
        encryption_in_transit: Some(Answer::Flag(true)),
        mfa_enforced: text("Yes"),
        incident_response_plan: text("yes"),
        bcdr_tested: text("yes"),
        penetration_test_date: days_ago(90),
        subprocessors_disclosed: text("yes"),
        data_residency: text("United Kingdom"),
        vulnerability_management: text("yes"),
        access_control_policy: text("yes"),
        contact_name: text("Priya Raman"),
        outsourcing_type: text(outsourcing),
        certifications: Some(Answer::List(vec!["iso_27001".to_string()])),
    }
}

pub(super) fn without(mut questionnaire: Questionnaire, field: QuestionnaireField) -> Questionnaire {
    questionnaire.set(field, None);
    questionnaire
}

pub(super) fn validate(questionnaire: &Questionnaire) -> ValidationResult {
    DueDiligenceValidator::standard().validate(questionnaire, today())
}
