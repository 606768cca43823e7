//! Energy analysis endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::analyzer::{
    AnalysisRequest, AnalysisResponse, AnalysisTypeDescriptor, AnalyzerMode, ANALYSIS_TYPE_CATALOG,
};
use crate::error::ApiError;
use crate::server::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalysisTypesResponse {
    pub supported_types: Vec<AnalysisTypeDescriptor>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzerStatusResponse {
    pub mode: AnalyzerMode,
}

/// POST /analyze - Analyze energy data and provide recommendations.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let response = state.analyzer.analyze(request).await?;
    Ok(Json(response))
}

/// GET /analysis-types - List supported analysis types.
pub async fn get_analysis_types() -> Json<AnalysisTypesResponse> {
    Json(AnalysisTypesResponse {
        supported_types: ANALYSIS_TYPE_CATALOG.clone(),
    })
}

/// GET /status - Report whether the proxy is in live or mock mode.
pub async fn get_analyzer_status(State(state): State<Arc<AppState>>) -> Json<AnalyzerStatusResponse> {
    Json(AnalyzerStatusResponse {
        mode: state.analyzer.mode(),
    })
}
