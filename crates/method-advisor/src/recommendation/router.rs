use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::domain::{Answers, ScoringResult};
use super::sensitivity::{factor_catalog, FactorDefinition};
use super::service::RecommendationService;
use super::EngineKind;
use crate::error::AppError;

/// Router builder exposing the scoring engines over HTTP.
pub fn recommendation_router(service: Arc<RecommendationService>) -> Router {
    Router::new()
        .route("/api/v1/recommendations", post(recommend_handler))
        .route(
            "/api/v1/recommendations/sensitivity",
            post(sensitivity_handler),
        )
        .route("/api/v1/recommendations/fuzzy", post(fuzzy_handler))
        .route("/api/v1/factors", get(factors_handler))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EngineQuery {
    #[serde(default)]
    pub(crate) engine: Option<String>,
}

/// Flatten a JSON request body into answers.
///
/// Strings pass through, numbers and booleans are rendered as text, and
/// anything else is dropped so the engines simply see the factor as unanswered.
pub fn collect_answers(body: BTreeMap<String, Value>) -> Answers {
    body.into_iter()
        .filter_map(|(factor, value)| match value {
            Value::String(text) => Some((factor, text)),
            Value::Number(number) => Some((factor, number.to_string())),
            Value::Bool(flag) => Some((factor, flag.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
        .collect()
}

fn score_with(
    service: &RecommendationService,
    kind: Option<EngineKind>,
    body: BTreeMap<String, Value>,
) -> ScoringResult {
    let answers = collect_answers(body);
    let result = service.recommend(kind, &answers);
    debug!(
        engine = %result.engine_version,
        answered = answers.len(),
        ranked = result.ranking.len(),
        "scored recommendation request"
    );
    result
}

pub(crate) async fn recommend_handler(
    State(service): State<Arc<RecommendationService>>,
    Query(query): Query<EngineQuery>,
    Json(body): Json<BTreeMap<String, Value>>,
) -> Result<Json<ScoringResult>, AppError> {
    let kind = query
        .engine
        .as_deref()
        .map(str::parse::<EngineKind>)
        .transpose()?;

    Ok(Json(score_with(&service, kind, body)))
}

pub(crate) async fn sensitivity_handler(
    State(service): State<Arc<RecommendationService>>,
    Json(body): Json<BTreeMap<String, Value>>,
) -> Json<ScoringResult> {
    Json(score_with(
        &service,
        Some(EngineKind::SensitivityGateNudge),
        body,
    ))
}

pub(crate) async fn fuzzy_handler(
    State(service): State<Arc<RecommendationService>>,
    Json(body): Json<BTreeMap<String, Value>>,
) -> Json<ScoringResult> {
    Json(score_with(
        &service,
        Some(EngineKind::EntropyWeightedFuzzy),
        body,
    ))
}

pub(crate) async fn factors_handler() -> Json<&'static [FactorDefinition]> {
    Json(factor_catalog())
}
