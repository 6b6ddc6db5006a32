use std::io::Read;

use tracing::{info, warn};

use super::catalogue::MetricCatalogue;
use super::domain::{MetricRecord, ThresholdError};
use super::evaluator::validate_thresholds;
use crate::workflows::records::{LoadError, RecordSet};

/// Periods retained per metric.
pub const HISTORY_DEPTH: usize = 6;

/// Mutable collection of appetite metrics with per-period history.
#[derive(Debug, Clone, Default)]
pub struct MetricRegister {
    metrics: RecordSet<MetricRecord>,
    catalogue: MetricCatalogue,
}

impl MetricRegister {
    pub fn new(records: Vec<MetricRecord>) -> Self {
        Self::with_catalogue(records, MetricCatalogue::standard())
    }

    /// Register whose direction defaults come from `catalogue`.
    pub fn with_catalogue(records: Vec<MetricRecord>, catalogue: MetricCatalogue) -> Self {
        Self {
            metrics: RecordSet::new(records),
            catalogue,
        }
    }

    pub fn catalogue(&self) -> &MetricCatalogue {
        &self.catalogue
    }

    pub fn records(&self) -> &[MetricRecord] {
        self.metrics.records()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn get(&self, metric: &str) -> Option<&MetricRecord> {
        self.records().iter().find(|record| record.metric == metric)
    }

    /// Replace every metric from a JSON array. Thresholds are checked against
    /// this register's catalogue; any failure keeps the current metrics.
    pub fn load_json<R: Read>(&mut self, reader: R) -> Result<usize, LoadError> {
        match self.parse_validated(reader) {
            Ok(records) => {
                self.metrics.replace(records);
                info!(count = self.metrics.len(), "metric register loaded");
                Ok(self.metrics.len())
            }
            Err(err) => {
                warn!(error = %err, kept = self.metrics.len(), "metric load rejected");
                Err(err)
            }
        }
    }

    pub fn clear(&mut self) {
        self.metrics.clear();
    }

    fn parse_validated<R: Read>(&self, reader: R) -> Result<Vec<MetricRecord>, LoadError> {
        let records: Vec<MetricRecord> = serde_json::from_reader(reader)?;
        for record in &records {
            record.validate_entry_with(&self.catalogue)?;
        }
        Ok(records)
    }

    /// Insert or update a metric for a new period.
    ///
    /// An update moves the stored current value onto the history tail and
    /// re-appends the metric at the end of the register. Thresholds are
    /// checked before anything changes.
    pub fn upsert(&mut self, mut update: MetricRecord) -> Result<&MetricRecord, ThresholdError> {
        let direction = update.effective_direction(&self.catalogue);
        validate_thresholds(direction, update.appetite, update.tolerance)?;

        let records = self.metrics.records_mut();
        let existing = records
            .iter()
            .position(|record| record.metric == update.metric)
            .map(|index| records.remove(index));

        update.history = match existing {
            Some(previous) => {
                let mut history = previous.history;
                history.push(previous.current);
                let overflow = history.len().saturating_sub(HISTORY_DEPTH);
                history.drain(..overflow);
                history
            }
            None => vec![update.current],
        };

        if update.owner.as_deref().map_or(true, str::is_empty) {
            update.owner = Some("—".to_string());
        }
        if update.action.as_deref().map_or(true, str::is_empty) {
            update.action = Some("—".to_string());
        }

        info!(metric = %update.metric, periods = update.history.len(), "metric upserted");
        records.push(update);
        Ok(&records[records.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::appetite::CatalogueEntry;
    use std::io::Cursor;

    fn update(metric: &str, current: f64, appetite: f64, tolerance: f64) -> MetricRecord {
        MetricRecord {
            metric: metric.to_string(),
            current,
            appetite,
            tolerance,
            unit: String::new(),
            direction: None,
            history: Vec::new(),
            owner: None,
            action: None,
            period: Some("Q2 2026".to_string()),
        }
    }

    fn seeded() -> MetricRegister {
        let mut vulns = update("Critical Vulnerabilities Open", 12.0, 5.0, 10.0);
        vulns.history = vec![7.0, 8.0, 9.0, 10.0, 11.0, 11.5];
        MetricRegister::new(vec![
            vulns,
            update("Regulatory Breach Count", 2.0, 1.0, 3.0),
        ])
    }

    #[test]
    fn new_metric_starts_history_with_current() {
        let mut register = MetricRegister::default();
        let stored = register
            .upsert(update("AI Model Incidents", 1.0, 0.0, 2.0))
            .expect("valid thresholds");
        assert_eq!(stored.history, vec![1.0]);
        assert_eq!(stored.owner.as_deref(), Some("—"));
        assert_eq!(stored.action.as_deref(), Some("—"));
    }

    #[test]
    fn update_rolls_previous_value_into_capped_history() {
        let mut register = seeded();
        let stored = register
            .upsert(update("Critical Vulnerabilities Open", 9.0, 5.0, 10.0))
            .expect("valid thresholds");
        assert_eq!(stored.history, vec![8.0, 9.0, 10.0, 11.0, 11.5, 12.0]);
        assert_eq!(stored.current, 9.0);

        let order: Vec<_> = register
            .records()
            .iter()
            .map(|record| record.metric.as_str())
            .collect();
        assert_eq!(
            order,
            vec!["Regulatory Breach Count", "Critical Vulnerabilities Open"]
        );
    }

    #[test]
    fn invalid_thresholds_leave_register_untouched() {
        let mut register = seeded();
        let error = register
            .upsert(update("Regulatory Breach Count", 5.0, 3.0, 1.0))
            .expect_err("tolerance below appetite");
        assert!(matches!(error, ThresholdError::ToleranceBelowAppetite { .. }));

        let breach = register
            .get("Regulatory Breach Count")
            .expect("still present");
        assert_eq!(breach.current, 2.0);
        assert_eq!(register.len(), 2);
    }

    #[test]
    fn higher_is_better_catalogue_metric_validates_inverted_order() {
        let mut register = MetricRegister::default();
        assert!(register
            .upsert(update("BCP Tests Completed", 3.0, 4.0, 3.0))
            .is_ok());
        assert!(register
            .upsert(update("BCP Tests Completed", 3.0, 3.0, 4.0))
            .is_err());
    }

    #[test]
    fn rejected_load_keeps_existing_metrics() {
        let mut register = seeded();
        let result = register.load_json(Cursor::new(
            r#"[{"metric":"Overdue Risk Reviews","current":4,"appetite":5,"tolerance":2}]"#,
        ));
        assert!(matches!(result, Err(LoadError::Threshold { .. })));
        assert_eq!(register.len(), 2);
    }

    #[test]
    fn custom_catalogue_governs_loads_and_upserts() {
        let catalogue = MetricCatalogue::new(vec![CatalogueEntry::higher(
            "Uptime",
            "ISO 27001 A.8.14",
        )]);
        let mut register = MetricRegister::with_catalogue(Vec::new(), catalogue);

        let loaded = register
            .load_json(Cursor::new(
                r#"[{"metric":"Uptime","current":99.5,"appetite":99.9,"tolerance":99.0}]"#,
            ))
            .expect("higher-is-better ordering accepted");
        assert_eq!(loaded, 1);

        let rejected = register.load_json(Cursor::new(
            r#"[{"metric":"Uptime","current":92,"appetite":90,"tolerance":95}]"#,
        ));
        assert!(matches!(
            rejected,
            Err(LoadError::Threshold {
                source: ThresholdError::AppetiteBelowTolerance { .. },
                ..
            })
        ));
        assert_eq!(register.get("Uptime").map(|record| record.appetite), Some(99.9));

        assert!(register.upsert(update("Uptime", 92.0, 90.0, 95.0)).is_err());
    }
}
