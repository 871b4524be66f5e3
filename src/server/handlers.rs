use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::alloy::Alloy;
use crate::error::AppError;
use crate::insight::{generate_insights, Insight};
use crate::parser::types::WearMetrics;
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    pub alloy_type: String,
    pub timestamp: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    /// Formatted to 4 decimals, e.g. "0.2841".
    pub predicted_cof: String,
    /// Formatted to 4 decimals with unit, e.g. "-1.3125 V".
    pub predicted_ocp: String,
    pub wear_metrics: Option<WearMetrics>,
    pub comments: Vec<Insight>,
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, AppError> {
    let alloy = Alloy::from_canonical(&request.alloy_type).ok_or_else(|| {
        AppError::UnknownAlloy(request.alloy_type.clone(), Alloy::canonical_names())
    })?;

    // A missing model is a degraded-but-serving state; 0.0 marks "no model".
    let cof = match &state.cof {
        Some(artifact) => artifact.model.predict(request.timestamp, alloy)?,
        None => 0.0,
    };
    let ocp = match &state.ocp {
        Some(artifact) => artifact.model.predict(request.timestamp, alloy)?,
        None => 0.0,
    };

    let wear_metrics = state.wear.get(alloy.canonical_name()).copied();
    let comments = generate_insights(
        cof,
        ocp,
        wear_metrics.map(|w| w.max_depth_um),
        &state.thresholds,
    );

    Ok(Json(PredictResponse {
        predicted_cof: format!("{cof:.4}"),
        predicted_ocp: format!("{ocp:.4} V"),
        wear_metrics,
        comments,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub cof_model_loaded: bool,
    pub ocp_model_loaded: bool,
    pub wear_alloys: usize,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cof_model_loaded: state.cof.is_some(),
        ocp_model_loaded: state.ocp.is_some(),
        wear_alloys: state.wear.len(),
    })
}

/// Canonical alloy names, for populating client pickers.
pub async fn alloys() -> Json<Vec<String>> {
    Json(Alloy::canonical_names())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
