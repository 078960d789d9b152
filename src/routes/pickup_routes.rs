use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::pickup_controller::PickupController;
use crate::dto::route_dto::{CollectPickupRequest, CollectPickupResponse, SkipPickupResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_pickup_router() -> Router<AppState> {
    Router::new()
        .route("/:id/collect", post(collect_pickup))
        .route("/:id/skip", post(skip_pickup))
}

async fn collect_pickup(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CollectPickupRequest>,
) -> Result<Json<CollectPickupResponse>, AppError> {
    let controller = PickupController::new(state.pool.clone());
    let response = controller.collect(id, request).await?;
    Ok(Json(response))
}

async fn skip_pickup(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SkipPickupResponse>, AppError> {
    let controller = PickupController::new(state.pool.clone());
    let response = controller.skip(id).await?;
    Ok(Json(response))
}
