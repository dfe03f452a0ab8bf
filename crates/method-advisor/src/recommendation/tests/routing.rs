use super::common::*;
use axum::body::{to_bytes, Body};
use axum::extract::{Query, State};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tower::ServiceExt;

use crate::recommendation::router::{collect_answers, recommend_handler, EngineQuery};
use crate::recommendation::{recommendation_router, EngineKind};

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

fn agile_team_body() -> Value {
    serde_json::to_value(agile_team_answers()).expect("answers serialize")
}

#[tokio::test]
async fn default_endpoint_uses_configured_engine() {
    let app = recommendation_router(service(EngineKind::SensitivityGateNudge));

    let response = app
        .oneshot(post_json("/api/v1/recommendations", agile_team_body()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["engineVersion"], "3.0.0");
    assert_eq!(body["ranking"][0]["method"], "Scrum");
    assert!(body["inputsNormalized"].is_object());
    assert!(body["rulesApplied"].as_array().is_some());
}

#[tokio::test]
async fn engine_query_overrides_default() {
    let app = recommendation_router(service(EngineKind::SensitivityGateNudge));

    let response = app
        .oneshot(post_json(
            "/api/v1/recommendations?engine=fuzzy",
            json!({ "project_size": "small" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["engineVersion"], "4.3.0-entropy-weighted-fuzzy");
    assert_eq!(body["rulesApplied"], json!([]));
    assert_eq!(body["ranking"][0]["contributions"][0]["match"], 1.0);
}

#[tokio::test]
async fn unknown_engine_is_a_bad_request() {
    let response = recommend_handler(
        State(service(EngineKind::SensitivityGateNudge)),
        Query(EngineQuery {
            engine: Some("neural".to_string()),
        }),
        Json(BTreeMap::new()),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("neural"));
}

#[tokio::test]
async fn dedicated_routes_pin_their_engine() {
    let app = recommendation_router(service(EngineKind::EntropyWeightedFuzzy));

    let sensitivity = app
        .clone()
        .oneshot(post_json(
            "/api/v1/recommendations/sensitivity",
            serde_json::to_value(governed_team_answers()).expect("answers serialize"),
        ))
        .await
        .expect("router responds");
    let body = json_body(sensitivity).await;
    assert_eq!(body["engineVersion"], "3.0.0");
    let methods: Vec<&str> = body["ranking"]
        .as_array()
        .expect("ranking array")
        .iter()
        .filter_map(|entry| entry["method"].as_str())
        .collect();
    assert!(!methods.contains(&"Scrum"));

    let fuzzy = app
        .oneshot(post_json("/api/v1/recommendations/fuzzy", agile_team_body()))
        .await
        .expect("router responds");
    let body = json_body(fuzzy).await;
    assert_eq!(body["engineVersion"], "4.3.0-entropy-weighted-fuzzy");
}

#[tokio::test]
async fn factors_endpoint_lists_question_catalog() {
    let app = recommendation_router(service(EngineKind::SensitivityGateNudge));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/factors")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let factors = body.as_array().expect("factor array");
    assert_eq!(factors.len(), 12);
    assert_eq!(factors[0]["factor"], "project_size");
    assert_eq!(factors[0]["options"][2]["label"], "Large");
}

#[test]
fn non_string_answers_are_rendered_or_dropped() {
    let body: BTreeMap<String, Value> = serde_json::from_value(json!({
        "planning": "Up-front",
        "project_size": 3,
        "fixed_scope": true,
        "teams": null,
        "goals": ["Speed"],
    }))
    .expect("object deserializes");

    let answers = collect_answers(body);

    assert_eq!(answers.len(), 3);
    assert_eq!(answers["planning"], "Up-front");
    assert_eq!(answers["project_size"], "3");
    assert_eq!(answers["fixed_scope"], "true");
}
