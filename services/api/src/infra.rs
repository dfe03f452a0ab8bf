use metrics_exporter_prometheus::PrometheusHandle;
use method_advisor::recommendation::{CatalogError, EngineKind, MethodCatalog};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the configured catalog, falling back to the bundled one.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<MethodCatalog, CatalogError> {
    let catalog = match path {
        Some(path) => MethodCatalog::from_path(path)?,
        None => MethodCatalog::bundled()?,
    };

    info!(
        methods = catalog.methods().len(),
        source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "bundled".to_string()),
        "methodology catalog loaded"
    );
    Ok(catalog)
}

pub(crate) fn parse_engine(raw: &str) -> Result<EngineKind, String> {
    raw.parse::<EngineKind>().map_err(|err| err.to_string())
}

pub(crate) fn parse_answer_pair(raw: &str) -> Result<(String, String), String> {
    let (factor, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected factor=value, got '{raw}'"))?;
    let factor = factor.trim();
    if factor.is_empty() {
        return Err(format!("missing factor name in '{raw}'"));
    }
    Ok((factor.to_string(), value.trim().to_string()))
}
