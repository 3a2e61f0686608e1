//! Axum route handler for the summary transform.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OptimizeSummaryRequest {
    #[serde(rename = "rawText", alias = "raw_text")]
    pub raw_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OptimizeSummaryResponse {
    #[serde(rename = "optimizedText")]
    pub optimized_text: String,
}

/// POST /api/optimize-summary
///
/// Always answers 200 for a well-formed request; provider failures fall back to the input.
pub async fn handle_optimize_summary(
    State(state): State<AppState>,
    payload: Result<Json<OptimizeSummaryRequest>, JsonRejection>,
) -> Result<Json<OptimizeSummaryResponse>, AppError> {
    let Json(request) = payload?;
    let raw_text = request
        .raw_text
        .ok_or_else(|| AppError::Validation("rawText is required".to_string()))?;

    let optimized_text = state.transformer.optimize(&raw_text).await;

    Ok(Json(OptimizeSummaryResponse { optimized_text }))
}
