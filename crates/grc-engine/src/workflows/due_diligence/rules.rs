use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{Answer, Materiality, Questionnaire, QuestionnaireField};
use super::policy::DueDiligencePolicy;
use crate::workflows::schedule::parse_iso_date;

const STALE_PEN_TEST_REF: &str = "ISO 27001 A.8.8 / FCA SS2/21";
const MISSING_PEN_TEST_REF: &str = "ISO 27001 A.8.8";
const NO_CERTIFICATIONS_REF: &str = "ISO 27001 A.5.19";
const RESIDENCY_REF: &str = "UK GDPR Art.44 / FCA SS2/21";
const NO_REFERENCE: &str = "—";

/// Critical control failure; always rejects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedRisk {
    pub field: QuestionnaireField,
    pub message: String,
    #[serde(rename = "ref")]
    pub reference: String,
}

/// Soft risk; rejects only when escalated by materiality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmberRisk {
    pub field: QuestionnaireField,
    pub message: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub escalate: bool,
}

impl AmberRisk {
    fn new(field: QuestionnaireField, message: String, reference: &str, escalate: bool) -> Self {
        Self {
            field,
            message,
            reference: reference.to_string(),
            escalate,
        }
    }
}

/// Stage 1: mandatory fields that are absent, null, `""` or `[]`.
pub(crate) fn missing_fields(
    questionnaire: &Questionnaire,
    policy: &DueDiligencePolicy,
) -> Vec<QuestionnaireField> {
    policy
        .mandatory_fields
        .iter()
        .copied()
        .filter(|field| questionnaire.answer(*field).map_or(true, Answer::is_blank))
        .collect()
}

/// Stage 2: hard controls answered negatively.
pub(crate) fn red_risks(questionnaire: &Questionnaire, policy: &DueDiligencePolicy) -> Vec<RedRisk> {
    policy
        .control_rules
        .iter()
        .filter(|rule| {
            questionnaire
                .answer(rule.field)
                .is_some_and(|answer| answer.is_negative(&policy.negative_answers))
        })
        .map(|rule| RedRisk {
            field: rule.field,
            message: rule.message.to_string(),
            reference: rule.reference.to_string(),
        })
        .collect()
}

/// Stage 3: pen-test recency, certification coverage and residency.
pub(crate) fn amber_risks(
    questionnaire: &Questionnaire,
    policy: &DueDiligencePolicy,
    materiality: Materiality,
    today: NaiveDate,
) -> Vec<AmberRisk> {
    let escalate = materiality.escalates();
    let mut risks = Vec::new();

    if let Some(risk) = pen_test_risk(
        questionnaire.answer(QuestionnaireField::PenetrationTestDate),
        policy.pen_test_max_age_days,
        escalate,
        today,
    ) {
        risks.push(risk);
    }

    let certified = questionnaire
        .answer(QuestionnaireField::Certifications)
        .is_some_and(Answer::is_truthy);
    if !certified {
        risks.push(AmberRisk::new(
            QuestionnaireField::Certifications,
            "No certifications held — limited independent assurance".to_string(),
            NO_CERTIFICATIONS_REF,
            false,
        ));
    }

    if let Some(residency) = questionnaire
        .answer(QuestionnaireField::DataResidency)
        .and_then(Answer::as_text)
    {
        let lowered = residency.to_lowercase();
        if policy
            .high_risk_jurisdictions
            .iter()
            .any(|token| lowered.contains(token))
        {
            risks.push(AmberRisk::new(
                QuestionnaireField::DataResidency,
                format!("Data residency in high-risk jurisdiction: {residency}"),
                RESIDENCY_REF,
                escalate,
            ));
        }
    }

    risks
}

fn pen_test_risk(
    answer: Option<&Answer>,
    max_age_days: i64,
    escalate: bool,
    today: NaiveDate,
) -> Option<AmberRisk> {
    let field = QuestionnaireField::PenetrationTestDate;

    let Some(answer) = answer.filter(|answer| answer.is_truthy()) else {
        return Some(AmberRisk::new(
            field,
            "No pen test date provided".to_string(),
            MISSING_PEN_TEST_REF,
            escalate,
        ));
    };

    match answer.as_text().and_then(parse_iso_date) {
        Some(tested_on) => {
            let age = (today - tested_on).num_days();
            (age > max_age_days).then(|| {
                AmberRisk::new(
                    field,
                    format!("Pen test is {age} days old (>12 months)"),
                    STALE_PEN_TEST_REF,
                    escalate,
                )
            })
        }
        None => Some(AmberRisk::new(
            field,
            "Invalid pen test date format".to_string(),
            NO_REFERENCE,
            false,
        )),
    }
}
