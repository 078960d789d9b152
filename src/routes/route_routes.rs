use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::route_controller::RouteController;
use crate::dto::bin_dto::ApiResponse;
use crate::dto::route_dto::{
    CreateRouteRequest, CreateRouteResponse, RouteDetailResponse, RouteListResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_route))
        .route("/", get(list_routes))
        .route("/:id", get(get_route))
        .route("/:id/start", post(start_route))
        .route("/:id/complete", post(complete_route))
}

async fn create_route(
    State(state): State<AppState>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<Json<ApiResponse<CreateRouteResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_routes(
    State(state): State<AppState>,
) -> Result<Json<Vec<RouteListResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteDetailResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.get_detail(id).await?;
    Ok(Json(response))
}

async fn start_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CreateRouteResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.start(id).await?;
    Ok(Json(response))
}

async fn complete_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CreateRouteResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.complete(id).await?;
    Ok(Json(response))
}
