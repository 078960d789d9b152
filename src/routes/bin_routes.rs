use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::bin_controller::BinController;
use crate::dto::bin_dto::{
    ApiResponse, BinResponse, CreateBinRequest, NeedingPickupQuery, PredictedFullResponse,
    UpdateBinRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_bin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_bin))
        .route("/", get(list_bins))
        .route("/needing-pickup", get(needing_pickup))
        .route("/:id", get(get_bin))
        .route("/:id", put(update_bin))
        .route("/:id/predicted-full", get(predicted_full))
}

async fn create_bin(
    State(state): State<AppState>,
    Json(request): Json<CreateBinRequest>,
) -> Result<Json<ApiResponse<BinResponse>>, AppError> {
    let controller = BinController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_bins(
    State(state): State<AppState>,
) -> Result<Json<Vec<BinResponse>>, AppError> {
    let controller = BinController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn needing_pickup(
    State(state): State<AppState>,
    Query(query): Query<NeedingPickupQuery>,
) -> Result<Json<Vec<BinResponse>>, AppError> {
    let controller = BinController::new(state.pool.clone());
    let response = controller.list_needing_pickup(query.threshold).await?;
    Ok(Json(response))
}

async fn get_bin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BinResponse>, AppError> {
    let controller = BinController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_bin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBinRequest>,
) -> Result<Json<ApiResponse<BinResponse>>, AppError> {
    let controller = BinController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn predicted_full(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PredictedFullResponse>, AppError> {
    let controller = BinController::new(state.pool.clone());
    let response = controller.predicted_full(id).await?;
    Ok(Json(response))
}
