use serde::{Deserialize, Serialize};

use super::catalogue::MetricCatalogue;
use super::evaluator::validate_thresholds;
use crate::workflows::records::{EntryValidation, LoadError};

/// Which side of the thresholds is good news.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    HigherIsBetter,
    #[default]
    LowerIsBetter,
}

impl Direction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HigherIsBetter => "higher is better",
            Self::LowerIsBetter => "lower is better",
        }
    }
}

/// Key risk indicator with its appetite and tolerance thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    #[serde(alias = "name")]
    pub metric: String,
    pub current: f64,
    pub appetite: f64,
    pub tolerance: f64,
    #[serde(default)]
    pub unit: String,
    /// Falls back to the catalogue default when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Oldest first; the last entry is the previous period.
    #[serde(default)]
    pub history: Vec<f64>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
}

impl MetricRecord {
    pub fn effective_direction(&self, catalogue: &MetricCatalogue) -> Direction {
        self.direction
            .unwrap_or_else(|| catalogue.default_direction(&self.metric))
    }
}

impl MetricRecord {
    /// Threshold check using the direction `catalogue` would evaluate with.
    pub fn validate_entry_with(&self, catalogue: &MetricCatalogue) -> Result<(), LoadError> {
        let direction = self.effective_direction(catalogue);
        validate_thresholds(direction, self.appetite, self.tolerance).map_err(|source| {
            LoadError::Threshold {
                metric: self.metric.clone(),
                source,
            }
        })
    }
}

/// Generic loaders only know the standard catalogue.
impl EntryValidation for MetricRecord {
    fn validate_entry(&self) -> Result<(), LoadError> {
        self.validate_entry_with(&MetricCatalogue::standard())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RagStatus {
    Red,
    Amber,
    Green,
}

impl RagStatus {
    /// Committee ordering: breaches first.
    pub const fn ordered() -> [Self; 3] {
        [Self::Red, Self::Amber, Self::Green]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Amber => "Amber",
            Self::Green => "Green",
        }
    }

    pub(crate) const fn severity_rank(self) -> u8 {
        match self {
            Self::Red => 0,
            Self::Amber => 1,
            Self::Green => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Worsening,
}

impl Trend {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Worsening => "worsening",
        }
    }
}

/// Appetite position of a metric for the current period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    pub metric: String,
    pub current: f64,
    pub appetite: f64,
    pub tolerance: f64,
    pub unit: String,
    pub direction: Direction,
    pub history: Vec<f64>,
    pub owner: Option<String>,
    pub action: Option<String>,
    pub period: Option<String>,
    pub framework: &'static str,
    pub rag: RagStatus,
    pub breach: bool,
    pub trend: Option<Trend>,
    pub period_change: Option<f64>,
}

/// Threshold ordering that contradicts the metric's direction.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    #[error("Tolerance must be ≥ Appetite for 'lower is better' metrics.")]
    ToleranceBelowAppetite { appetite: f64, tolerance: f64 },
    #[error("For 'higher is better' metrics, Appetite must be ≥ Tolerance.")]
    AppetiteBelowTolerance { appetite: f64, tolerance: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::appetite::CatalogueEntry;

    #[test]
    fn direction_uses_kebab_case() {
        let record: MetricRecord = serde_json::from_str(
            r#"{"metric":"Uptime","current":99.5,"appetite":99.9,"tolerance":99.0,
                "unit":"%","direction":"higher-is-better"}"#,
        )
        .expect("metric parses");
        assert_eq!(record.direction, Some(Direction::HigherIsBetter));
        assert!(record.history.is_empty());
        assert!(record.validate_entry().is_ok());
    }

    #[test]
    fn catalogue_direction_applies_when_omitted() {
        let record: MetricRecord = serde_json::from_str(
            r#"{"metric":"BCP Tests Completed","current":3,"appetite":4,"tolerance":3}"#,
        )
        .expect("metric parses");
        let catalogue = MetricCatalogue::standard();
        assert_eq!(
            record.effective_direction(&catalogue),
            Direction::HigherIsBetter
        );
    }

    #[test]
    fn entry_validation_rejects_inverted_thresholds() {
        let record: MetricRecord = serde_json::from_str(
            r#"{"metric":"Audit Findings Open","current":6,"appetite":8,"tolerance":4}"#,
        )
        .expect("metric parses");
        let error = record.validate_entry().expect_err("tolerance below appetite");
        assert!(matches!(
            error,
            LoadError::Threshold {
                source: ThresholdError::ToleranceBelowAppetite { .. },
                ..
            }
        ));
        assert!(error.to_string().contains("Audit Findings Open"));
    }

    #[test]
    fn validation_follows_custom_catalogue_direction() {
        let catalogue =
            MetricCatalogue::new(vec![CatalogueEntry::higher("Uptime", "ISO 27001 A.8.14")]);

        let inverted: MetricRecord = serde_json::from_str(
            r#"{"metric":"Uptime","current":92,"appetite":90,"tolerance":95}"#,
        )
        .expect("metric parses");
        let error = inverted
            .validate_entry_with(&catalogue)
            .expect_err("appetite below tolerance");
        assert!(matches!(
            error,
            LoadError::Threshold {
                source: ThresholdError::AppetiteBelowTolerance { .. },
                ..
            }
        ));

        let valid: MetricRecord = serde_json::from_str(
            r#"{"metric":"Uptime","current":99.5,"appetite":99.9,"tolerance":99.0}"#,
        )
        .expect("metric parses");
        assert!(valid.validate_entry_with(&catalogue).is_ok());
        assert!(valid.validate_entry().is_err());
    }
}
