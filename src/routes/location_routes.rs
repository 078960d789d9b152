use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::location_controller::LocationController;
use crate::dto::location_dto::{DriverLocationResponse, ReportLocationRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_location_router() -> Router<AppState> {
    Router::new()
        .route("/", post(report_location))
        .route("/:route_id", get(get_locations))
}

async fn report_location(
    State(state): State<AppState>,
    Json(request): Json<ReportLocationRequest>,
) -> Result<Json<DriverLocationResponse>, AppError> {
    let controller = LocationController::new(state.pool.clone());
    let response = controller.report(request).await?;
    Ok(Json(response))
}

async fn get_locations(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<Vec<DriverLocationResponse>>, AppError> {
    let controller = LocationController::new(state.pool.clone());
    let response = controller.get_by_route(route_id).await?;
    Ok(Json(response))
}
