use serde::Serialize;

use super::domain::{MetricResult, RagStatus, Trend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RagCount {
    pub rag: RagStatus,
    pub count: usize,
}

/// Committee view over an evaluated metric set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppetiteSummary {
    pub total: usize,
    pub rag_counts: Vec<RagCount>,
    pub breaches: Vec<String>,
    pub worsening: usize,
}

impl AppetiteSummary {
    pub fn from_results(results: &[MetricResult]) -> Self {
        Self {
            total: results.len(),
            rag_counts: RagStatus::ordered()
                .into_iter()
                .map(|rag| RagCount {
                    rag,
                    count: results.iter().filter(|result| result.rag == rag).count(),
                })
                .collect(),
            breaches: results
                .iter()
                .filter(|result| result.breach)
                .map(|result| result.metric.clone())
                .collect(),
            worsening: results
                .iter()
                .filter(|result| result.trend == Some(Trend::Worsening))
                .count(),
        }
    }

    pub fn count(&self, rag: RagStatus) -> usize {
        self.rag_counts
            .iter()
            .find(|entry| entry.rag == rag)
            .map_or(0, |entry| entry.count)
    }
}

/// Red first, then Amber, then Green; ties keep input order.
pub fn rank_by_rag(results: &[MetricResult]) -> Vec<&MetricResult> {
    let mut ranked: Vec<&MetricResult> = results.iter().collect();
    ranked.sort_by_key(|result| result.rag.severity_rank());
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::appetite::{AppetiteEvaluator, MetricRecord};

    fn metric(name: &str, current: f64, history: Vec<f64>) -> MetricRecord {
        MetricRecord {
            metric: name.to_string(),
            current,
            appetite: 2.0,
            tolerance: 4.0,
            unit: String::new(),
            direction: None,
            history,
            owner: None,
            action: None,
            period: None,
        }
    }

    fn evaluated() -> Vec<MetricResult> {
        AppetiteEvaluator::standard().evaluate_all(&[
            metric("Green One", 1.0, vec![2.0]),
            metric("Red One", 6.0, vec![5.0]),
            metric("Amber One", 3.0, Vec::new()),
            metric("Red Two", 5.0, vec![5.0]),
        ])
    }

    #[test]
    fn summary_counts_in_committee_order() {
        let summary = AppetiteSummary::from_results(&evaluated());
        assert_eq!(summary.total, 4);
        let counts: Vec<_> = summary.rag_counts.iter().map(|entry| entry.count).collect();
        assert_eq!(counts, vec![2, 1, 1]);
        assert_eq!(summary.breaches, vec!["Red One", "Red Two"]);
        assert_eq!(summary.worsening, 1);
        assert_eq!(summary.count(RagStatus::Amber), 1);
    }

    #[test]
    fn ranking_is_stable_within_status() {
        let results = evaluated();
        let ranked: Vec<_> = rank_by_rag(&results)
            .into_iter()
            .map(|result| result.metric.as_str())
            .collect();
        assert_eq!(ranked, vec!["Red One", "Red Two", "Amber One", "Green One"]);
    }
}
