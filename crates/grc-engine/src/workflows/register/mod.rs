//! Risk register import from CSV exports.

mod domain;
mod parser;
mod summary;

pub use domain::RiskRegisterEntry;
pub use summary::{rank_by_score, RegisterSummary};

use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::workflows::records::LoadError;

pub struct RegisterImporter;

impl RegisterImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        today: NaiveDate,
    ) -> Result<Vec<RiskRegisterEntry>, LoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, today)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        today: NaiveDate,
    ) -> Result<Vec<RiskRegisterEntry>, LoadError> {
        let rows = parser::parse_rows(reader).map_err(|err| {
            warn!(error = %err, "risk register import rejected");
            LoadError::from(err)
        })?;

        let entries: Vec<_> = rows
            .into_iter()
            .map(|row| RiskRegisterEntry::from_row(row, today))
            .collect();
        info!(count = entries.len(), %today, "risk register imported");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::schedule::ReviewAlertKind;
    use crate::workflows::tier::RiskTier;
    use std::io::Cursor;

    const HEADER: &str = "risk_id,risk_title,category,risk_owner,likelihood,impact,\
existing_controls,remediation_action,review_date,status,framework_ref\n";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date")
    }

    fn import(rows: &str) -> Vec<RiskRegisterEntry> {
        RegisterImporter::from_reader(Cursor::new(format!("{HEADER}{rows}")), today())
            .expect("import succeeds")
    }

    #[test]
    fn import_scores_and_summarises_rows() {
        let entries = import(
            "R-01,Ransomware,Cyber,CISO,4,5,EDR,Tabletop,2026-03-10,Open,ISO 27001 A.8.7\n\
R-02,Supplier failure,Third Party,CPO,3,3,Exit plans,Dual source,2026-04-01,In Progress,FCA SS2/21\n\
R-03,Model drift,AI,CDO,2,2,Monitoring,Retrain,2026-09-30,open,ISO 42001\n",
        );

        assert_eq!(entries[0].tier, RiskTier::Critical);
        assert_eq!(entries[1].tier, RiskTier::Medium);
        assert_eq!(entries[2].tier, RiskTier::Low);

        let summary = RegisterSummary::from_entries(&entries);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.open, 2);
        assert_eq!(summary.overdue_reviews, 1);
        assert_eq!(summary.due_soon_reviews, 1);
        let alerts: Vec<_> = summary
            .review_alerts
            .iter()
            .map(|alert| (alert.kind, alert.message.as_str()))
            .collect();
        assert_eq!(
            alerts,
            vec![
                (ReviewAlertKind::Overdue, "R-01 overdue by 5 days"),
                (ReviewAlertKind::DueSoon, "R-02 due in 17 days"),
            ]
        );
    }

    #[test]
    fn invalid_ratings_default_to_one() {
        let entries = import("R-04,Legacy,Ops,COO,9,abc,—,—,not-a-date,Closed,—\n");
        assert_eq!((entries[0].likelihood, entries[0].impact), (1, 1));
        assert_eq!(entries[0].score, 1);
        assert_eq!(entries[0].review.days_until, None);
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let entries = import(
            "A,,,,2,3,,,,,\n\
B,,,,5,5,,,,,\n\
C,,,,3,2,,,,,\n",
        );
        let ranked: Vec<_> = rank_by_score(&entries)
            .into_iter()
            .map(|entry| entry.risk_id.as_str())
            .collect();
        assert_eq!(ranked, vec!["B", "A", "C"]);
    }

    #[test]
    fn malformed_csv_is_a_load_error() {
        let result = RegisterImporter::from_reader(
            Cursor::new(format!("{HEADER}R-05,Too,short\n")),
            today(),
        );
        assert!(matches!(result, Err(LoadError::Csv(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = RegisterImporter::from_path("./missing-register.csv", today());
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
