use chrono::NaiveDate;
use grc_engine::workflows::records::RecordSet;
use grc_engine::workflows::schedule::ReviewAlertKind;
use grc_engine::workflows::tier::RiskTier;
use grc_engine::workflows::vendor::{rank_by_residual, PortfolioSummary, VendorRecord, VendorRiskEngine};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date")
}

fn sample_vendors() -> Vec<VendorRecord> {
    let data = include_bytes!("../../../sample_data/vendors.json");
    let mut vendors = RecordSet::<VendorRecord>::default();
    vendors
        .replace_from_json(&data[..])
        .expect("sample vendors load");
    vendors.records().to_vec()
}

#[test]
fn sample_portfolio_scores_and_flags() {
    let engine = VendorRiskEngine::standard().expect("standard model is consistent");
    let results = engine.assess_all(&sample_vendors(), today());

    let scores: Vec<_> = results
        .iter()
        .map(|result| (result.name.as_str(), result.inherent_score, result.residual_score))
        .collect();
    assert_eq!(
        scores,
        vec![
            ("CloudCore Hosting", 80, 62),
            ("PayStream Ltd", 45, 28),
            ("InsightAI Analytics", 75, 75),
            ("Office Supplies Direct", 10, 7),
            ("Sentinel SOC", 85, 75),
        ]
    );

    let sentinel = &results[4];
    assert_eq!(sentinel.inherent_tier, RiskTier::Critical);
    assert_eq!(sentinel.residual_tier, RiskTier::High);
    assert!(sentinel.flags.critical_jurisdiction);
    assert!(!sentinel.flags.ai_flag);

    let cloud = &results[0];
    assert!(cloud.flags.ai_flag);
    assert!(cloud.flags.gdpr_flag);
    assert_eq!(cloud.outsourcing_type, "Critical / Material");
    assert!(cloud.review.overdue);
}

#[test]
fn sample_portfolio_summary_and_ranking() {
    let engine = VendorRiskEngine::standard().expect("standard model is consistent");
    let results = engine.assess_all(&sample_vendors(), today());
    let summary = PortfolioSummary::from_results(&results);

    assert_eq!(summary.total, 5);
    assert_eq!(summary.critical, 0);
    assert_eq!(summary.high, 3);
    assert_eq!(summary.overdue_reviews, 2);
    assert_eq!(summary.ai_flags, 2);
    assert_eq!(summary.gdpr_flags, 3);

    let alerts: Vec<_> = summary
        .review_alerts
        .iter()
        .map(|alert| (alert.kind, alert.message.as_str()))
        .collect();
    assert_eq!(
        alerts,
        vec![
            (ReviewAlertKind::Overdue, "CloudCore Hosting overdue by 14 days"),
            (ReviewAlertKind::Overdue, "Sentinel SOC overdue by 23 days"),
            (ReviewAlertKind::DueSoon, "PayStream Ltd due in 26 days"),
        ]
    );

    let ranked: Vec<_> = rank_by_residual(&results)
        .into_iter()
        .map(|result| result.name.as_str())
        .collect();
    assert_eq!(
        ranked,
        vec![
            "InsightAI Analytics",
            "Sentinel SOC",
            "CloudCore Hosting",
            "PayStream Ltd",
            "Office Supplies Direct",
        ]
    );
}

#[test]
fn residual_never_exceeds_inherent_for_sample() {
    let engine = VendorRiskEngine::standard().expect("standard model is consistent");
    for result in engine.assess_all(&sample_vendors(), today()) {
        assert!(result.residual_score <= result.inherent_score);
        assert!(result.inherent_score <= 100);
        let mut seen = Vec::new();
        for item in &result.evidence_required {
            assert!(!seen.contains(item), "duplicate evidence for {}", result.name);
            seen.push(*item);
        }
    }
}
