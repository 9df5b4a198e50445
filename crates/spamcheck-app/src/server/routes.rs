use crate::interaction::evaluate;
use crate::report::Outcome;
use crate::state::{AppState, Availability};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Health endpoints
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// What the page needs to render itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub loaded: bool,

    /// Load error lines; empty when loaded
    pub errors: Vec<String>,

    pub model: Option<String>,
    pub explains: bool,
    pub features: Option<usize>,
    pub default_text: String,
}

pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let response = match state.availability.as_ref() {
        Availability::Ready(ready) => StatusResponse {
            loaded: true,
            errors: Vec::new(),
            model: Some(ready.classifier.name().to_string()),
            explains: ready.classifier.explains(),
            features: Some(ready.features),
            default_text: state.config.default_text.clone(),
        },
        Availability::Unavailable(failure) => StatusResponse {
            loaded: false,
            errors: failure.messages(),
            model: None,
            explains: false,
            features: None,
            default_text: state.config.default_text.clone(),
        },
    };
    Json(response)
}

// ============================================================================
// Prediction endpoints
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub text: String,
}

pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> impl IntoResponse {
    let outcome = evaluate(&state.availability, &req.text).await;
    let status = match outcome {
        Outcome::Prediction(_) | Outcome::Warning { .. } => StatusCode::OK,
        Outcome::Error { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        Outcome::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(outcome))
}

// ============================================================================
// Metrics endpoint
// ============================================================================

pub async fn render_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            "metrics not initialized\n".to_string(),
        ),
    }
}
