use tracing::{debug, info};

use super::catalogue::MetricCatalogue;
use super::domain::{Direction, MetricRecord, MetricResult, RagStatus, ThresholdError, Trend};

pub fn rag(direction: Direction, current: f64, appetite: f64, tolerance: f64) -> RagStatus {
    match direction {
        Direction::HigherIsBetter => {
            if current >= appetite {
                RagStatus::Green
            } else if current >= tolerance {
                RagStatus::Amber
            } else {
                RagStatus::Red
            }
        }
        Direction::LowerIsBetter => {
            if current <= appetite {
                RagStatus::Green
            } else if current <= tolerance {
                RagStatus::Amber
            } else {
                RagStatus::Red
            }
        }
    }
}

/// True exactly when the metric sits outside tolerance.
pub fn breach(direction: Direction, current: f64, tolerance: f64) -> bool {
    match direction {
        Direction::HigherIsBetter => current < tolerance,
        Direction::LowerIsBetter => current > tolerance,
    }
}

/// Compares against the previous period; a flat reading counts as improving.
pub fn trend(direction: Direction, current: f64, history: &[f64]) -> Option<Trend> {
    let last = *history.last()?;
    let improving = match direction {
        Direction::HigherIsBetter => current >= last,
        Direction::LowerIsBetter => current <= last,
    };
    Some(if improving {
        Trend::Improving
    } else {
        Trend::Worsening
    })
}

pub fn period_change(current: f64, history: &[f64]) -> Option<f64> {
    history
        .last()
        .map(|last| ((current - last) * 100.0).round() / 100.0)
}

pub fn validate_thresholds(
    direction: Direction,
    appetite: f64,
    tolerance: f64,
) -> Result<(), ThresholdError> {
    match direction {
        Direction::LowerIsBetter if tolerance < appetite => {
            Err(ThresholdError::ToleranceBelowAppetite {
                appetite,
                tolerance,
            })
        }
        Direction::HigherIsBetter if appetite < tolerance => {
            Err(ThresholdError::AppetiteBelowTolerance {
                appetite,
                tolerance,
            })
        }
        _ => Ok(()),
    }
}

/// Stateless RAG evaluator backed by a metric catalogue.
#[derive(Debug, Clone, Default)]
pub struct AppetiteEvaluator {
    catalogue: MetricCatalogue,
}

impl AppetiteEvaluator {
    pub fn new(catalogue: MetricCatalogue) -> Self {
        Self { catalogue }
    }

    pub fn standard() -> Self {
        Self::new(MetricCatalogue::standard())
    }

    pub fn catalogue(&self) -> &MetricCatalogue {
        &self.catalogue
    }

    pub fn evaluate(&self, record: &MetricRecord) -> MetricResult {
        let direction = record.effective_direction(&self.catalogue);
        let result = MetricResult {
            metric: record.metric.clone(),
            current: record.current,
            appetite: record.appetite,
            tolerance: record.tolerance,
            unit: record.unit.clone(),
            direction,
            history: record.history.clone(),
            owner: record.owner.clone(),
            action: record.action.clone(),
            period: record.period.clone(),
            framework: self.catalogue.framework(&record.metric),
            rag: rag(direction, record.current, record.appetite, record.tolerance),
            breach: breach(direction, record.current, record.tolerance),
            trend: trend(direction, record.current, &record.history),
            period_change: period_change(record.current, &record.history),
        };

        debug!(
            metric = %result.metric,
            rag = result.rag.label(),
            breach = result.breach,
            "metric evaluated"
        );
        result
    }

    pub fn evaluate_all(&self, records: &[MetricRecord]) -> Vec<MetricResult> {
        let results: Vec<_> = records.iter().map(|record| self.evaluate(record)).collect();
        info!(
            count = results.len(),
            breaches = results.iter().filter(|result| result.breach).count(),
            "appetite metrics evaluated"
        );
        results
    }
}
