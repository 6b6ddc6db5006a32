use std::fmt::Write;

use super::domain::MetricResult;

const PLACEHOLDER: &str = "—";

fn change_marker(change: Option<f64>) -> String {
    let Some(change) = change else {
        return String::new();
    };
    let arrow = if change > 0.0 {
        '▲'
    } else if change < 0.0 {
        '▼'
    } else {
        '→'
    };
    format!(" ({arrow}{} vs last period)", change.abs())
}

fn or_placeholder(value: Option<&str>) -> &str {
    value.filter(|text| !text.is_empty()).unwrap_or(PLACEHOLDER)
}

/// Plain-text snapshot of the metric set, one line per metric.
pub fn build_digest(results: &[MetricResult]) -> String {
    let mut digest = String::from("Current Risk Appetite Metrics:");
    for result in results {
        let _ = write!(
            digest,
            "\n- {}: {}{}{} | Appetite: {} | Tolerance: {} | RAG: {} | Trend: {} | Owner: {} | Action: {}",
            result.metric,
            result.current,
            result.unit,
            change_marker(result.period_change),
            result.appetite,
            result.tolerance,
            result.rag.label(),
            result.trend.map_or(PLACEHOLDER, |trend| trend.label()),
            or_placeholder(result.owner.as_deref()),
            or_placeholder(result.action.as_deref()),
        );
    }
    digest
}
