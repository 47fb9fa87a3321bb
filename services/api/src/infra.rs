use chrono::NaiveDate;
use evalspace::config::CatalogConfig;
use evalspace::evaluations::{CatalogError, ResponseInput, TemplateCatalog};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog from `EVAL_TEMPLATE_PATH`, or the built-in one.
pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<TemplateCatalog, CatalogError> {
    match &config.template_path {
        Some(path) => {
            let catalog = TemplateCatalog::from_path(path, config.weight_policy)?;
            info!(
                path = %path.display(),
                templates = catalog.templates().len(),
                "loaded template catalog"
            );
            Ok(catalog)
        }
        None => Ok(TemplateCatalog::standard()),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Parses `QUESTION=RATING`, e.g. `q-1=4.5`.
pub(crate) fn parse_rating(raw: &str) -> Result<ResponseInput, String> {
    let (question_id, rating) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION=RATING, got '{raw}'"))?;
    let question_id = question_id.trim();
    if question_id.is_empty() {
        return Err(format!("missing question id in '{raw}'"));
    }
    let rating = rating
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("rating for {question_id} must be a number, got '{rating}'"))?;
    Ok(ResponseInput::rated(question_id, rating))
}
