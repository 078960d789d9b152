use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::controllers::telemetry_controller::TelemetryController;
use crate::dto::telemetry_dto::{
    TelemetryBatchRequest, TelemetryBatchResponse, TelemetryRequest, TelemetryResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_telemetry_router() -> Router<AppState> {
    Router::new()
        .route("/", post(ingest_reading))
        .route("/", get(health_check))
        .route("/batch", post(ingest_batch))
}

/// Verificar la clave de API si está configurada
fn check_api_key(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    if let Some(ref expected) = state.config.telemetry_api_key {
        let provided = headers.get("x-api-key").and_then(|v| v.to_str().ok());
        if provided != Some(expected.as_str()) {
            return Err(AppError::Unauthorized("Invalid or missing API key".to_string()));
        }
    }
    Ok(())
}

async fn ingest_reading(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<TelemetryRequest>,
) -> Result<Json<TelemetryResponse>, AppError> {
    check_api_key(&state, &headers)?;

    let controller = TelemetryController::new(state.pool.clone());
    let response = controller.apply_reading(request).await?;
    Ok(Json(response))
}

async fn ingest_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<TelemetryBatchRequest>,
) -> Result<Json<TelemetryBatchResponse>, AppError> {
    check_api_key(&state, &headers)?;

    let controller = TelemetryController::new(state.pool.clone());
    let response = controller.apply_batch(request).await?;
    Ok(Json(response))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "endpoint": "telemetry" }))
}
