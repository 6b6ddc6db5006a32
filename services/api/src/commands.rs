use chrono::{Local, NaiveDate};
use clap::Args;
use grc_engine::config::AppConfig;
use grc_engine::error::AppError;
use grc_engine::workflows::appetite::{
    committee_briefing, AppetiteEvaluator, AppetiteSummary, MetricRegister, MetricResult,
    RagStatus,
};
use grc_engine::workflows::due_diligence::{
    rank_by_status, DueDiligenceValidator, Questionnaire, ValidationResult, ValidationSummary,
};
use grc_engine::workflows::records::{load_json_path, RecordSet};
use grc_engine::workflows::register::{
    rank_by_score, RegisterImporter, RegisterSummary, RiskRegisterEntry,
};
use grc_engine::workflows::schedule::{parse_date, ReviewAlert, ReviewWindow};
use grc_engine::workflows::tier::TierCount;
use grc_engine::workflows::vendor::standard::AI_DUE_DILIGENCE_QUESTIONS;
use grc_engine::workflows::vendor::{
    rank_by_residual, AssessmentResult, PortfolioSummary, VendorRecord, VendorRiskEngine,
};
use std::fs::File;
use std::path::PathBuf;

use crate::infra::ServiceSummarizer;

#[derive(Args, Debug, Default)]
pub(crate) struct VendorArgs {
    /// Vendor JSON file (defaults to vendors.json in the data directory)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Evaluation date for review windows (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DueDiligenceArgs {
    /// Questionnaire JSON file (defaults to questionnaires.json in the data directory)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Evaluation date for pen test recency (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct AppetiteArgs {
    /// Metric JSON file (defaults to metrics.json in the data directory)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RegisterArgs {
    /// Risk register CSV export (defaults to risk_register.csv in the data directory)
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Evaluation date for review windows (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

fn evaluation_date(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

pub(crate) fn run_vendor_assessment(args: VendorArgs) -> Result<(), AppError> {
    let path = match args.input {
        Some(path) => path,
        None => AppConfig::load()?.data.vendors_path(),
    };
    let today = evaluation_date(args.today);

    let mut vendors = RecordSet::<VendorRecord>::default();
    vendors.replace_from_path(path)?;
    let engine = VendorRiskEngine::standard()?;
    let results = engine.assess_all(vendors.records(), today);

    print_lines(render_vendor_report(&results, today));
    Ok(())
}

pub(crate) fn run_due_diligence_validation(args: DueDiligenceArgs) -> Result<(), AppError> {
    let path = match args.input {
        Some(path) => path,
        None => AppConfig::load()?.data.questionnaires_path(),
    };
    let today = evaluation_date(args.today);

    let questionnaires: Vec<Questionnaire> = load_json_path(path)?;
    let results = DueDiligenceValidator::standard().validate_all(&questionnaires, today);

    print_lines(render_due_diligence_report(&results, today));
    Ok(())
}

pub(crate) fn run_appetite_evaluation(args: AppetiteArgs) -> Result<(), AppError> {
    let path = match args.input {
        Some(path) => path,
        None => AppConfig::load()?.data.metrics_path(),
    };

    let mut register = MetricRegister::default();
    register.load_json(File::open(path)?)?;
    let evaluator = AppetiteEvaluator::new(register.catalogue().clone());
    let results = evaluator.evaluate_all(register.records());
    let briefing = committee_briefing(&ServiceSummarizer::default(), &results);

    print_lines(render_appetite_report(&results, &briefing));
    Ok(())
}

pub(crate) fn run_register_import(args: RegisterArgs) -> Result<(), AppError> {
    let path = match args.csv {
        Some(path) => path,
        None => AppConfig::load()?.data.register_path(),
    };
    let today = evaluation_date(args.today);

    let entries = RegisterImporter::from_path(path, today)?;

    print_lines(render_register_report(&entries, today));
    Ok(())
}

fn review_status(window: &ReviewWindow) -> String {
    match window.days_until {
        Some(days) if window.overdue => format!("overdue by {} days", days.abs()),
        Some(days) if window.due_soon => format!("due in {days} days"),
        Some(days) => format!("in {days} days"),
        None => "no review date".to_string(),
    }
}

fn tier_line(distribution: &[TierCount]) -> String {
    distribution
        .iter()
        .map(|entry| format!("{} {}", entry.tier_label, entry.count))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn push_alerts(lines: &mut Vec<String>, alerts: &[ReviewAlert]) {
    if alerts.is_empty() {
        lines.push("Review alerts: none".to_string());
    } else {
        lines.push("Review alerts".to_string());
        lines.extend(alerts.iter().map(|alert| format!("- {}", alert.message)));
    }
}

pub(crate) fn render_vendor_report(results: &[AssessmentResult], today: NaiveDate) -> Vec<String> {
    let summary = PortfolioSummary::from_results(results);
    let mut lines = vec![
        format!("Vendor risk portfolio (evaluated {today})"),
        format!(
            "- {} vendors | {} critical | {} high | {} overdue reviews | {} AI flags | {} GDPR flags",
            summary.total,
            summary.critical,
            summary.high,
            summary.overdue_reviews,
            summary.ai_flags,
            summary.gdpr_flags
        ),
        format!("- Residual tiers: {}", tier_line(&summary.tier_distribution)),
    ];
    push_alerts(&mut lines, &summary.review_alerts);

    for result in rank_by_residual(results) {
        lines.push(String::new());
        lines.push(format!("{} ({})", result.name, result.service));
        lines.push(format!(
            "  Inherent {} {} | Residual {} {} | Outsourcing {}",
            result.inherent_score,
            result.inherent_tier.label(),
            result.residual_score,
            result.residual_tier.label(),
            result.outsourcing_type
        ));
        lines.push(format!(
            "  Owner {} | Status {} | Review {} ({})",
            result.risk_owner,
            result.status,
            result.review_date,
            review_status(&result.review)
        ));
        if result.flags.any() {
            lines.extend(
                result
                    .flags
                    .descriptions()
                    .into_iter()
                    .map(|flag| format!("  {flag}")),
            );
        } else {
            lines.push("  No governance flags".to_string());
        }

        if result.flags.ai_flag {
            lines.push("  AI due diligence checklist".to_string());
            lines.extend(
                AI_DUE_DILIGENCE_QUESTIONS
                    .iter()
                    .enumerate()
                    .map(|(index, question)| format!("    {}. {question}", index + 1)),
            );
        }

        lines.push("  Evidence required".to_string());
        lines.extend(
            result
                .evidence_required
                .iter()
                .map(|item| format!("    - {item}")),
        );
        lines.push("  Control domains".to_string());
        lines.extend(
            result
                .control_domains
                .iter()
                .map(|domain| format!("    - {} [{}]", domain.domain, domain.reference)),
        );
    }

    lines
}

pub(crate) fn render_due_diligence_report(
    results: &[ValidationResult],
    today: NaiveDate,
) -> Vec<String> {
    let summary = ValidationSummary::from_results(results);
    let counts = summary
        .status_counts
        .iter()
        .map(|entry| format!("{} {}", entry.status.label(), entry.count))
        .collect::<Vec<_>>()
        .join(" | ");
    let mut lines = vec![
        format!("Due diligence validation (evaluated {today})"),
        format!("- {} questionnaires | {counts}", summary.total),
        format!(
            "- {} missing fields | {} red risks | {} amber risks",
            summary.missing_fields, summary.red_risks, summary.amber_risks
        ),
    ];

    for result in rank_by_status(results) {
        lines.push(String::new());
        lines.push(format!(
            "{} [{}] ({}, {} outsourcing)",
            result.vendor_name,
            result.status.label(),
            result.service_type,
            result.outsourcing
        ));
        lines.push(format!("  {}", result.rationale));
        if !result.missing_fields.is_empty() {
            let missing = result
                .missing_fields
                .iter()
                .map(|field| field.label())
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("  Missing: {missing}"));
        }
        lines.extend(
            result
                .red_risks
                .iter()
                .map(|risk| format!("  RED {} [{}]", risk.message, risk.reference)),
        );
        lines.extend(result.amber_risks.iter().map(|risk| {
            let marker = if risk.escalate { "AMBER (escalated)" } else { "AMBER" };
            format!("  {marker} {} [{}]", risk.message, risk.reference)
        }));
    }

    lines
}

pub(crate) fn render_appetite_report(results: &[MetricResult], briefing: &str) -> Vec<String> {
    let summary = AppetiteSummary::from_results(results);
    let mut lines = vec![
        "Risk appetite dashboard".to_string(),
        format!(
            "- {} metrics | Red {} | Amber {} | Green {} | {} worsening",
            summary.total,
            summary.count(RagStatus::Red),
            summary.count(RagStatus::Amber),
            summary.count(RagStatus::Green),
            summary.worsening
        ),
    ];
    if summary.breaches.is_empty() {
        lines.push("- Tolerance breaches: none".to_string());
    } else {
        lines.push(format!(
            "- Tolerance breaches: {}",
            summary.breaches.join(", ")
        ));
    }

    lines.push(String::new());
    for result in results {
        lines.push(format!(
            "[{}] {}: {}{} (appetite {}, tolerance {}, {}) | {}",
            result.rag.label(),
            result.metric,
            result.current,
            result.unit,
            result.appetite,
            result.tolerance,
            result.direction.label(),
            result.framework
        ));
    }

    lines.push(String::new());
    lines.push("Committee briefing".to_string());
    lines.push(briefing.to_string());
    lines
}

pub(crate) fn render_register_report(
    entries: &[RiskRegisterEntry],
    today: NaiveDate,
) -> Vec<String> {
    let summary = RegisterSummary::from_entries(entries);
    let mut lines = vec![
        format!("Risk register (evaluated {today})"),
        format!(
            "- {} risks | {} open | {} overdue reviews | {} due soon",
            summary.total, summary.open, summary.overdue_reviews, summary.due_soon_reviews
        ),
        format!("- Tiers: {}", tier_line(&summary.tier_distribution)),
    ];
    push_alerts(&mut lines, &summary.review_alerts);

    lines.push(String::new());
    for entry in rank_by_score(entries) {
        lines.push(format!(
            "{} {} | {} | L{} x I{} = {} {} | {} | {}",
            entry.risk_id,
            entry.risk_title,
            entry.category,
            entry.likelihood,
            entry.impact,
            entry.score,
            entry.tier.label(),
            entry.status,
            entry.framework_ref
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use grc_engine::workflows::appetite::MetricRecord;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date")
    }

    #[test]
    fn vendor_report_lists_checklist_for_ai_flagged_vendors() {
        let vendor: VendorRecord = serde_json::from_str(
            r#"{"vendor_name":"Chatty AI","ai_usage":"third_party","review_date":"2026-03-20"}"#,
        )
        .expect("vendor parses");
        let engine = VendorRiskEngine::standard().expect("standard model");
        let results = engine.assess_all(&[vendor], today());

        let lines = render_vendor_report(&results, today());
        assert!(lines.iter().any(|line| line == "  AI due diligence checklist"));
        assert!(lines
            .iter()
            .any(|line| line.contains("Review 2026-03-20 (due in 5 days)")));
        assert!(lines.contains(&"- Chatty AI due in 5 days".to_string()));
        assert!(!lines.iter().any(|line| line == "  No governance flags"));
    }

    #[test]
    fn vendor_report_notes_unflagged_vendors() {
        let vendor: VendorRecord =
            serde_json::from_str(r#"{"vendor_name":"Paper Co","hosting_location":"uk"}"#)
                .expect("vendor parses");
        let engine = VendorRiskEngine::standard().expect("standard model");
        let results = engine.assess_all(&[vendor], today());

        let lines = render_vendor_report(&results, today());
        assert!(lines.iter().any(|line| line == "  No governance flags"));
        assert!(!lines.iter().any(|line| line.starts_with("  ⚠")));
    }

    #[test]
    fn due_diligence_report_marks_escalated_ambers() {
        let questionnaire: Questionnaire = serde_json::from_str(
            r#"{"vendor_name":"Edge Ltd","outsourcing_type":"critical","data_residency":"Russia"}"#,
        )
        .expect("questionnaire parses");
        let results = DueDiligenceValidator::standard().validate_all(&[questionnaire], today());

        let lines = render_due_diligence_report(&results, today());
        assert!(lines.iter().any(|line| line.starts_with("Edge Ltd [Reject]")));
        assert!(lines
            .iter()
            .any(|line| line.starts_with("  AMBER (escalated) Data residency")));
    }

    #[test]
    fn appetite_report_names_breaches() {
        let record = MetricRecord {
            metric: "Critical Vulnerabilities Open".to_string(),
            current: 12.0,
            appetite: 5.0,
            tolerance: 10.0,
            unit: String::new(),
            direction: None,
            history: Vec::new(),
            owner: None,
            action: None,
            period: None,
        };
        let results = AppetiteEvaluator::standard().evaluate_all(&[record]);

        let lines = render_appetite_report(&results, "briefing text");
        assert!(lines.contains(&"- Tolerance breaches: Critical Vulnerabilities Open".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("briefing text"));
    }

    #[test]
    fn register_report_ranks_by_score() {
        let csv = "risk_id,risk_title,likelihood,impact\nR-1,Low,1,2\nR-2,High,4,4\n";
        let entries = RegisterImporter::from_reader(csv.as_bytes(), today()).expect("imports");

        let lines = render_register_report(&entries, today());
        let first = lines
            .iter()
            .position(|line| line.starts_with("R-2"))
            .expect("R-2 listed");
        let second = lines
            .iter()
            .position(|line| line.starts_with("R-1"))
            .expect("R-1 listed");
        assert!(first < second);
    }
}
