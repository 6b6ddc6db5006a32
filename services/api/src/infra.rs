use grc_engine::error::AppError;
use grc_engine::workflows::appetite::UnconfiguredSummarizer;
use grc_engine::workflows::router::EngineServices;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// No language model backend is wired in; briefings degrade to a placeholder.
pub(crate) type ServiceSummarizer = UnconfiguredSummarizer;

pub(crate) fn engine_services() -> Result<EngineServices<ServiceSummarizer>, AppError> {
    Ok(EngineServices::standard(UnconfiguredSummarizer)?)
}
