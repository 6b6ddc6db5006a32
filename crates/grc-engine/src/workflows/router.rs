use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AppError;
use crate::workflows::appetite::{
    briefing_from_digest, build_digest, unavailable_briefing, AppetiteEvaluator,
    AppetiteSummary, MetricCatalogue, MetricRecord, MetricResult, NarrativeSummarizer,
};
use crate::workflows::due_diligence::{
    DueDiligenceValidator, Questionnaire, ValidationResult, ValidationSummary,
};
use crate::workflows::records::LoadError;
use crate::workflows::register::{RegisterImporter, RegisterSummary, RiskRegisterEntry};
use crate::workflows::schedule::deserialize_optional_date;
use crate::workflows::vendor::{
    AssessmentResult, ModelError, PortfolioSummary, VendorRecord, VendorRiskEngine,
};

/// Engines shared by every request; all of them are immutable.
pub struct EngineServices<S> {
    pub vendors: VendorRiskEngine,
    pub due_diligence: DueDiligenceValidator,
    pub appetite: AppetiteEvaluator,
    pub summarizer: S,
}

impl<S: NarrativeSummarizer> EngineServices<S> {
    pub fn standard(summarizer: S) -> Result<Self, ModelError> {
        Ok(Self {
            vendors: VendorRiskEngine::standard()?,
            due_diligence: DueDiligenceValidator::standard(),
            appetite: AppetiteEvaluator::standard(),
            summarizer,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct VendorAssessmentRequest {
    pub vendors: Vec<VendorRecord>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct VendorAssessmentResponse {
    pub results: Vec<AssessmentResult>,
    pub summary: PortfolioSummary,
}

#[derive(Debug, Deserialize)]
pub struct DueDiligenceRequest {
    pub questionnaires: Vec<Questionnaire>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct DueDiligenceResponse {
    pub results: Vec<ValidationResult>,
    pub summary: ValidationSummary,
}

#[derive(Debug, Deserialize)]
pub struct AppetiteRequest {
    pub metrics: Vec<MetricRecord>,
}

#[derive(Debug, Serialize)]
pub struct AppetiteResponse {
    pub results: Vec<MetricResult>,
    pub summary: AppetiteSummary,
    pub digest: String,
    pub briefing: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterImportRequest {
    pub csv: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct RegisterImportResponse {
    pub entries: Vec<RiskRegisterEntry>,
    pub summary: RegisterSummary,
}

fn evaluation_date(requested: Option<NaiveDate>) -> NaiveDate {
    requested.unwrap_or_else(|| Local::now().date_naive())
}

/// Router exposing the assessment engines over HTTP.
pub fn engine_router<S>(services: Arc<EngineServices<S>>) -> Router
where
    S: NarrativeSummarizer + 'static,
{
    Router::new()
        .route("/api/v1/vendors/assess", post(assess_vendors_handler::<S>))
        .route(
            "/api/v1/due-diligence/validate",
            post(validate_questionnaires_handler::<S>),
        )
        .route("/api/v1/appetite/evaluate", post(evaluate_appetite_handler::<S>))
        .route("/api/v1/register/import", post(import_register_handler::<S>))
        .with_state(services)
}

pub(crate) async fn assess_vendors_handler<S>(
    State(services): State<Arc<EngineServices<S>>>,
    axum::Json(request): axum::Json<VendorAssessmentRequest>,
) -> Response
where
    S: NarrativeSummarizer + 'static,
{
    let results = services
        .vendors
        .assess_all(&request.vendors, evaluation_date(request.today));
    let summary = PortfolioSummary::from_results(&results);
    let body = VendorAssessmentResponse { results, summary };
    (StatusCode::OK, axum::Json(body)).into_response()
}

pub(crate) async fn validate_questionnaires_handler<S>(
    State(services): State<Arc<EngineServices<S>>>,
    axum::Json(request): axum::Json<DueDiligenceRequest>,
) -> Response
where
    S: NarrativeSummarizer + 'static,
{
    let results = services
        .due_diligence
        .validate_all(&request.questionnaires, evaluation_date(request.today));
    let summary = ValidationSummary::from_results(&results);
    let body = DueDiligenceResponse { results, summary };
    (StatusCode::OK, axum::Json(body)).into_response()
}

pub(crate) async fn evaluate_appetite_handler<S>(
    State(services): State<Arc<EngineServices<S>>>,
    axum::Json(request): axum::Json<AppetiteRequest>,
) -> Response
where
    S: NarrativeSummarizer + 'static,
{
    if let Err(err) = validate_metrics(services.appetite.catalogue(), &request.metrics) {
        warn!(error = %err, "appetite metrics rejected");
        return AppError::from(err).into_response();
    }

    let results = services.appetite.evaluate_all(&request.metrics);
    let digest = build_digest(&results);
    let briefing = briefing_off_runtime(Arc::clone(&services), digest.clone()).await;
    let body = AppetiteResponse {
        summary: AppetiteSummary::from_results(&results),
        digest,
        briefing,
        results,
    };
    (StatusCode::OK, axum::Json(body)).into_response()
}

async fn briefing_off_runtime<S>(services: Arc<EngineServices<S>>, digest: String) -> String
where
    S: NarrativeSummarizer + 'static,
{
    let task =
        tokio::task::spawn_blocking(move || briefing_from_digest(&services.summarizer, &digest));
    match task.await {
        Ok(briefing) => briefing,
        Err(err) => unavailable_briefing(&err),
    }
}

pub(crate) async fn import_register_handler<S>(
    State(_services): State<Arc<EngineServices<S>>>,
    axum::Json(request): axum::Json<RegisterImportRequest>,
) -> Response
where
    S: NarrativeSummarizer + 'static,
{
    let today = evaluation_date(request.today);
    match RegisterImporter::from_reader(request.csv.as_bytes(), today) {
        Ok(entries) => {
            let summary = RegisterSummary::from_entries(&entries);
            let body = RegisterImportResponse { entries, summary };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

fn validate_metrics(catalogue: &MetricCatalogue, metrics: &[MetricRecord]) -> Result<(), LoadError> {
    metrics
        .iter()
        .try_for_each(|record| record.validate_entry_with(catalogue))
}
