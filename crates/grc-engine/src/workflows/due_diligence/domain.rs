use serde::{Deserialize, Serialize};

use crate::workflows::records::EntryValidation;

/// Free-form questionnaire answer. Suppliers answer controls with booleans,
/// "yes"/"no" text, dates, lists or the occasional number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl Answer {
    /// Blank answers count as missing. `false` is an answer, not a gap.
    pub fn is_blank(&self) -> bool {
        match self {
            Answer::Text(text) => text.is_empty(),
            Answer::List(items) => items.is_empty(),
            Answer::Flag(_) | Answer::Number(_) => false,
        }
    }

    /// Whether the answer carries any content at all.
    pub fn is_truthy(&self) -> bool {
        match self {
            Answer::Flag(value) => *value,
            Answer::Number(value) => *value != 0.0,
            Answer::Text(text) => !text.is_empty(),
            Answer::List(items) => !items.is_empty(),
        }
    }

    pub fn is_negative(&self, negative_answers: &[&str]) -> bool {
        match self {
            Answer::Flag(value) => !value,
            Answer::Text(text) => {
                let normalised = text.trim().to_lowercase();
                negative_answers.iter().any(|answer| *answer == normalised)
            }
            Answer::Number(_) | Answer::List(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Answer::Flag(true) => "Yes".to_string(),
            Answer::Flag(false) => "No".to_string(),
            Answer::Number(value) => value.to_string(),
            Answer::Text(text) => text.clone(),
            Answer::List(items) => items.join(", "),
        }
    }
}

/// Every field the due-diligence pipeline reads, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionnaireField {
    VendorName,
    ServiceType,
    DataClassification,
    EncryptionAtRest,
    EncryptionInTransit,
    MfaEnforced,
    IncidentResponsePlan,
    BcdrTested,
    PenetrationTestDate,
    SubprocessorsDisclosed,
    DataResidency,
    VulnerabilityManagement,
    AccessControlPolicy,
    ContactName,
    OutsourcingType,
    Certifications,
}

impl QuestionnaireField {
    pub const fn ordered() -> [Self; 16] {
        [
            Self::VendorName,
            Self::ServiceType,
            Self::DataClassification,
            Self::EncryptionAtRest,
            Self::EncryptionInTransit,
            Self::MfaEnforced,
            Self::IncidentResponsePlan,
            Self::BcdrTested,
            Self::PenetrationTestDate,
            Self::SubprocessorsDisclosed,
            Self::DataResidency,
            Self::VulnerabilityManagement,
            Self::AccessControlPolicy,
            Self::ContactName,
            Self::OutsourcingType,
            Self::Certifications,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::VendorName => "vendor_name",
            Self::ServiceType => "service_type",
            Self::DataClassification => "data_classification",
            Self::EncryptionAtRest => "encryption_at_rest",
            Self::EncryptionInTransit => "encryption_in_transit",
            Self::MfaEnforced => "mfa_enforced",
            Self::IncidentResponsePlan => "incident_response_plan",
            Self::BcdrTested => "bcdr_tested",
            Self::PenetrationTestDate => "penetration_test_date",
            Self::SubprocessorsDisclosed => "subprocessors_disclosed",
            Self::DataResidency => "data_residency",
            Self::VulnerabilityManagement => "vulnerability_management",
            Self::AccessControlPolicy => "access_control_policy",
            Self::ContactName => "contact_name",
            Self::OutsourcingType => "outsourcing_type",
            Self::Certifications => "certifications",
        }
    }

    /// Human label, e.g. `Bcdr Tested` for `bcdr_tested`.
    pub fn label(self) -> String {
        title_case(&self.key().replace('_', " "))
    }
}

/// Supplier due-diligence questionnaire as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub vendor_name: Option<Answer>,
    pub service_type: Option<Answer>,
    pub data_classification: Option<Answer>,
    pub encryption_at_rest: Option<Answer>,
    pub encryption_in_transit: Option<Answer>,
    pub mfa_enforced: Option<Answer>,
    pub incident_response_plan: Option<Answer>,
    pub bcdr_tested: Option<Answer>,
    pub penetration_test_date: Option<Answer>,
    pub subprocessors_disclosed: Option<Answer>,
    pub data_residency: Option<Answer>,
    pub vulnerability_management: Option<Answer>,
    pub access_control_policy: Option<Answer>,
    pub contact_name: Option<Answer>,
    pub outsourcing_type: Option<Answer>,
    pub certifications: Option<Answer>,
}

impl Questionnaire {
    pub fn answer(&self, field: QuestionnaireField) -> Option<&Answer> {
        let answer = match field {
            QuestionnaireField::VendorName => &self.vendor_name,
            QuestionnaireField::ServiceType => &self.service_type,
            QuestionnaireField::DataClassification => &self.data_classification,
            QuestionnaireField::EncryptionAtRest => &self.encryption_at_rest,
            QuestionnaireField::EncryptionInTransit => &self.encryption_in_transit,
            QuestionnaireField::MfaEnforced => &self.mfa_enforced,
            QuestionnaireField::IncidentResponsePlan => &self.incident_response_plan,
            QuestionnaireField::BcdrTested => &self.bcdr_tested,
            QuestionnaireField::PenetrationTestDate => &self.penetration_test_date,
            QuestionnaireField::SubprocessorsDisclosed => &self.subprocessors_disclosed,
            QuestionnaireField::DataResidency => &self.data_residency,
            QuestionnaireField::VulnerabilityManagement => &self.vulnerability_management,
            QuestionnaireField::AccessControlPolicy => &self.access_control_policy,
            QuestionnaireField::ContactName => &self.contact_name,
            QuestionnaireField::OutsourcingType => &self.outsourcing_type,
            QuestionnaireField::Certifications => &self.certifications,
        };
        answer.as_ref()
    }

    pub fn set(&mut self, field: QuestionnaireField, value: Option<Answer>) {
        let slot = match field {
            QuestionnaireField::VendorName => &mut self.vendor_name,
            QuestionnaireField::ServiceType => &mut self.service_type,
            QuestionnaireField::DataClassification => &mut self.data_classification,
            QuestionnaireField::EncryptionAtRest => &mut self.encryption_at_rest,
            QuestionnaireField::EncryptionInTransit => &mut self.encryption_in_transit,
            QuestionnaireField::MfaEnforced => &mut self.mfa_enforced,
            QuestionnaireField::IncidentResponsePlan => &mut self.incident_response_plan,
            QuestionnaireField::BcdrTested => &mut self.bcdr_tested,
            QuestionnaireField::PenetrationTestDate => &mut self.penetration_test_date,
            QuestionnaireField::SubprocessorsDisclosed => &mut self.subprocessors_disclosed,
            QuestionnaireField::DataResidency => &mut self.data_residency,
            QuestionnaireField::VulnerabilityManagement => &mut self.vulnerability_management,
            QuestionnaireField::AccessControlPolicy => &mut self.access_control_policy,
            QuestionnaireField::ContactName => &mut self.contact_name,
            QuestionnaireField::OutsourcingType => &mut self.outsourcing_type,
            QuestionnaireField::Certifications => &mut self.certifications,
        };
        *slot = value;
    }

    /// Rendered answer or `fallback` when absent.
    pub fn display_or(&self, field: QuestionnaireField, fallback: &str) -> String {
        self.answer(field)
            .map(Answer::display)
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn certification_list(&self) -> Vec<String> {
        match &self.certifications {
            Some(Answer::List(items)) => items.clone(),
            Some(Answer::Text(text)) if !text.is_empty() => vec![text.clone()],
            _ => Vec::new(),
        }
    }
}

impl EntryValidation for Questionnaire {}

/// Outsourcing classification governing whether soft risks escalate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Materiality {
    #[default]
    NonMaterial,
    Material,
    Critical,
}

impl Materiality {
    /// Case-insensitive; unknown or non-text classifications are non-material.
    pub fn from_answer(answer: Option<&Answer>) -> Self {
        match answer
            .and_then(Answer::as_text)
            .map(|text| text.trim().to_lowercase())
            .as_deref()
        {
            Some("material") => Self::Material,
            Some("critical") => Self::Critical,
            _ => Self::NonMaterial,
        }
    }

    pub const fn escalates(self) -> bool {
        matches!(self, Self::Material | Self::Critical)
    }
}

/// Capitalise the first letter of every alphabetic run, lowercasing the rest.
pub(crate) fn title_case(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut previous_alphabetic = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_alphabetic {
                output.extend(ch.to_lowercase());
            } else {
                output.extend(ch.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            output.push(ch);
            previous_alphabetic = false;
        }
    }
    output
}
