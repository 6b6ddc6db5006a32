use serde::Serialize;

use super::domain::Direction;

const NO_FRAMEWORK: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogueEntry {
    pub name: &'static str,
    pub framework: &'static str,
    pub direction: Direction,
}

impl CatalogueEntry {
    pub const fn lower(name: &'static str, framework: &'static str) -> Self {
        Self {
            name,
            framework,
            direction: Direction::LowerIsBetter,
        }
    }

    pub const fn higher(name: &'static str, framework: &'static str) -> Self {
        Self {
            name,
            framework,
            direction: Direction::HigherIsBetter,
        }
    }
}

const STANDARD_ENTRIES: [CatalogueEntry; 10] = [
    CatalogueEntry::lower("Regulatory Breach Count", "FCA SYSC 6.1 / ISO 27001 A.5.26"),
    CatalogueEntry::lower("Third-Party High Risk Vendors", "FCA SS2/21 / ISO 27001 A.5.19"),
    CatalogueEntry::lower("Overdue Risk Reviews", "ISO 27001 A.6.1 / FCA SYSC 4"),
    CatalogueEntry::lower("Critical Vulnerabilities Open", "ISO 27001 A.8.8 / NIST CSF"),
    CatalogueEntry::lower("Data Subject Complaints", "UK GDPR Art.57 / ICO"),
    CatalogueEntry::lower("AI Model Incidents", "ISO 42001 / FCA AI Principles"),
    CatalogueEntry::higher("BCP Tests Completed", "ISO 27001 A.5.30 / FCA SYSC 4"),
    CatalogueEntry::higher("Security Awareness Completion", "ISO 27001 A.6.3"),
    CatalogueEntry::lower("Audit Findings Open", "ISO 27001 A.9 / FCA SYSC"),
    CatalogueEntry::lower("Policy Exceptions Active", "ISO 27001 A.5.1"),
];

/// Known key risk indicators with their framework references and default direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCatalogue {
    entries: Vec<CatalogueEntry>,
}

impl MetricCatalogue {
    pub fn new(entries: Vec<CatalogueEntry>) -> Self {
        Self { entries }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_ENTRIES.to_vec())
    }

    pub fn get(&self, name: &str) -> Option<&CatalogueEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Metrics outside the catalogue are lower-is-better.
    pub fn default_direction(&self, name: &str) -> Direction {
        self.get(name)
            .map(|entry| entry.direction)
            .unwrap_or_default()
    }

    pub fn framework(&self, name: &str) -> &'static str {
        self.get(name)
            .map(|entry| entry.framework)
            .unwrap_or(NO_FRAMEWORK)
    }

    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }
}

impl Default for MetricCatalogue {
    fn default() -> Self {
        Self::standard()
    }
}
