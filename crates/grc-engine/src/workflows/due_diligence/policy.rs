use serde::Serialize;

use super::domain::QuestionnaireField;

/// Hard control whose negative answer is an immediate red risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlRule {
    pub field: QuestionnaireField,
    pub message: &'static str,
    #[serde(rename = "ref")]
    pub reference: &'static str,
}

impl ControlRule {
    const fn new(
        field: QuestionnaireField,
        message: &'static str,
        reference: &'static str,
    ) -> Self {
        Self {
            field,
            message,
            reference,
        }
    }
}

/// Onboarding requirements applied by the validator.
#[derive(Debug, Clone, Serialize)]
pub struct DueDiligencePolicy {
    pub mandatory_fields: Vec<QuestionnaireField>,
    pub control_rules: Vec<ControlRule>,
    /// Lower-cased text answers that fail a control.
    pub negative_answers: Vec<&'static str>,
    /// Lower-cased substrings marking a residency as high-risk.
    pub high_risk_jurisdictions: Vec<&'static str>,
    pub pen_test_max_age_days: i64,
}

impl DueDiligencePolicy {
    /// ISO 27001:2022 / FCA SS2/21 onboarding baseline.
    pub fn standard() -> Self {
        use QuestionnaireField::*;

        Self {
            mandatory_fields: vec![
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
            ],
            control_rules: vec![
                ControlRule::new(
                    EncryptionAtRest,
                    "No encryption at rest — data exposure risk",
                    "ISO 27001 A.8.24",
                ),
                ControlRule::new(
                    EncryptionInTransit,
                    "No encryption in transit — interception risk",
                    "ISO 27001 A.8.24",
                ),
                ControlRule::new(
                    MfaEnforced,
                    "MFA not enforced — unauthorised access risk",
                    "ISO 27001 A.5.17",
                ),
                ControlRule::new(
                    IncidentResponsePlan,
                    "No incident response plan — regulatory breach risk",
                    "ISO 27001 A.5.26",
                ),
                ControlRule::new(
                    BcdrTested,
                    "BCP/DR not tested — resilience risk",
                    "ISO 27001 A.5.30",
                ),
                ControlRule::new(
                    SubprocessorsDisclosed,
                    "Subprocessors not disclosed — fourth-party risk",
                    "ISO 27001 A.5.19 / UK GDPR Art.28",
                ),
                ControlRule::new(
                    VulnerabilityManagement,
                    "No vulnerability management process — patching risk",
                    "ISO 27001 A.8.8",
                ),
                ControlRule::new(
                    AccessControlPolicy,
                    "No access control policy — privilege escalation risk",
                    "ISO 27001 A.5.15",
                ),
            ],
            negative_answers: vec!["no", "false"],
            high_risk_jurisdictions: vec![
                "china",
                "prc",
                "mainland china",
                "hong kong",
                "russia",
                "russian federation",
                "ru",
                "iran",
                "iran (tehran)",
                "ir",
                "north korea",
                "dprk",
                "kp",
                "belarus",
                "by",
            ],
            pen_test_max_age_days: 365,
        }
    }
}

impl Default for DueDiligencePolicy {
    fn default() -> Self {
        Self::standard()
    }
}
