use axum::body::Bytes;
use axum::extract::State;
use axum::response::Json;
use chrono::Local;
use lotto_ensemble::{CombinedResult, EnsembleError};
use lotto_models::{generate_all, render_markdown, DataAnalysis, Perturbation};
use lotto_types::{BiasInput, Candidate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};
use crate::state::{request_rng, AppState};

pub const DEFAULT_PERIOD: &str = "24001";
pub const DEFAULT_LAST_PERIOD: &str = "23365";

// ----- Request / response bodies -----

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PredictRequest {
    pub seed: Option<u64>,
    pub bias: Option<BiasInput>,
    /// Draw a perturbation and use it as bias when no explicit bias is given.
    pub use_perturbation: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct Prediction {
    pub ensemble: CombinedResult,
    pub individual_models: Vec<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perturbation: Option<Perturbation>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportRequest {
    pub current_period: Option<String>,
    pub last_period: Option<String>,
    pub seed: Option<u64>,
}

/// An empty body means "all defaults"; anything else must be valid JSON.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> ServerResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| ServerError::BadRequest(e.to_string()))
}

fn now() -> String {
    Local::now().to_rfc3339()
}

// ----- Handlers -----

pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "lotto-server",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": now(),
    }))
}

pub async fn predict_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<Json<Value>> {
    let request: PredictRequest = parse_body(&body)?;
    let request_id = Uuid::now_v7();
    let mut rng = request_rng(request.seed);

    let game = state.combiner.config().game;
    let individual_models = generate_all(&state.sources, &game, &mut rng);

    let perturbation = match (request.bias, request.use_perturbation) {
        (None, true) => Some(Perturbation::generate(&mut rng)),
        _ => None,
    };
    let bias = request.bias.or_else(|| perturbation.as_ref().map(Perturbation::bias));

    let ensemble = state
        .combiner
        .combine(&individual_models, bias.as_ref(), &mut rng)?;
    tracing::info!(
        %request_id,
        seed = ?request.seed,
        confidence = ensemble.confidence,
        biased = bias.is_some(),
        "prediction served"
    );

    let prediction = Prediction {
        ensemble,
        individual_models,
        perturbation,
    };
    Ok(Json(json!({
        "status": "success",
        "request_id": request_id,
        "prediction": prediction,
        "timestamp": now(),
    })))
}

pub async fn perturbation_handler() -> Json<Value> {
    let perturbation = Perturbation::generate(&mut request_rng(None));
    Json(json!({
        "status": "success",
        "perturbation": perturbation,
        "timestamp": now(),
    }))
}

/// Same reading as [`perturbation_handler`] under the `spiritual_perturbation` key.
pub async fn spiritual_handler() -> Json<Value> {
    let perturbation = Perturbation::generate(&mut request_rng(None));
    Json(json!({
        "status": "success",
        "spiritual_perturbation": perturbation,
        "timestamp": now(),
    }))
}

pub async fn data_analysis_handler(State(state): State<AppState>) -> ServerResult<Json<Value>> {
    let game = state.combiner.config().game;
    let analysis =
        DataAnalysis::simulate(&game, Local::now().naive_local(), &mut request_rng(None))
            .map_err(|e| EnsembleError::Configuration(e.to_string()))?;
    tracing::info!(total_draws = analysis.total_draws, "data analysis served");
    Ok(Json(json!({
        "status": "success",
        "analysis": analysis,
        "timestamp": now(),
    })))
}

pub async fn latest_results_handler(State(state): State<AppState>) -> Json<Value> {
    let draw = state
        .draws
        .latest(Local::now().date_naive(), &mut request_rng(None));
    Json(json!({
        "status": "success",
        "latest_results": draw,
        "timestamp": now(),
    }))
}

pub async fn report_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<Json<Value>> {
    let request: ReportRequest = parse_body(&body)?;
    let period = request
        .current_period
        .unwrap_or_else(|| DEFAULT_PERIOD.to_string());
    let last_period = request
        .last_period
        .unwrap_or_else(|| DEFAULT_LAST_PERIOD.to_string());

    let mut rng = request_rng(request.seed);
    let game = state.combiner.config().game;
    let candidates = generate_all(&state.sources, &game, &mut rng);
    let result = state.combiner.combine(&candidates, None, &mut rng)?;

    let generated_at = Local::now();
    let content = render_markdown(&period, &last_period, &result, generated_at.naive_local());
    tracing::info!(%period, %last_period, "report generated");

    Ok(Json(json!({
        "status": "success",
        "report": {
            "content": content,
            "format": "markdown",
            "period": period,
            "generated_at": generated_at.to_rfc3339(),
        },
        "timestamp": now(),
    })))
}
