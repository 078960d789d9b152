//! Controller de Routes
//!
//! Creación de rutas (generación de recorrido + inserción atómica con
//! rollback compensatorio) y máquina de estados del ciclo de vida.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::bin_dto::ApiResponse;
use crate::dto::route_dto::{
    CreateRouteRequest, CreateRouteResponse, RouteDetailResponse, RouteListResponse,
    RouteStopResponse,
};
use crate::models::route::RouteStatus;
use crate::repositories::bin_repository::BinRepository;
use crate::repositories::pickup_repository::PickupRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::services::route_generation::{generate_route, BinForRouting};
use crate::utils::errors::AppError;

pub struct RouteController {
    routes: RouteRepository,
    pickups: PickupRepository,
    bins: BinRepository,
}

impl RouteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            routes: RouteRepository::new(pool.clone()),
            pickups: PickupRepository::new(pool.clone()),
            bins: BinRepository::new(pool),
        }
    }

    /// Crear una ruta: ordenar los candidatos por vecino más cercano desde
    /// el depósito, insertar la ruta y sus pickups como unidad lógica. Si
    /// la inserción de pickups falla, la ruta se elimina (acción
    /// compensatoria): nunca queda una ruta sin paradas.
    pub async fn create(
        &self,
        request: CreateRouteRequest,
    ) -> Result<ApiResponse<CreateRouteResponse>, AppError> {
        request.validate()?;

        let found = self.bins.find_by_ids(&request.bin_ids).await?;

        // Reordenar según la selección del dispatcher: el desempate del
        // algoritmo depende del orden de iteración de la entrada
        let mut candidates = Vec::with_capacity(request.bin_ids.len());
        for bin_id in &request.bin_ids {
            let bin = found.iter().find(|b| b.id == *bin_id).ok_or_else(|| {
                AppError::NotFound(format!("Contenedor {} no encontrado", bin_id))
            })?;
            candidates.push(BinForRouting {
                id: bin.id,
                lat: bin.lat,
                lng: bin.lng,
                fill_level: bin.fill_level,
            });
        }

        let stops = generate_route(&candidates, request.depot_lat, request.depot_lng);

        let route = self
            .routes
            .create(request.driver_id, request.scheduled_date)
            .await?;

        if let Err(e) = self
            .pickups
            .insert_for_route(route.id, request.driver_id, &stops)
            .await
        {
            // Rollback: sin pickups no debe sobrevivir la ruta
            log::warn!("⚠️ Fallo insertando pickups de la ruta {}, eliminando ruta", route.id);
            self.routes.delete(route.id).await?;
            return Err(e);
        }

        log::info!(
            "🚛 Ruta {} creada para el conductor {} con {} paradas",
            route.id,
            request.driver_id,
            stops.len()
        );

        Ok(ApiResponse::success_with_message(
            CreateRouteResponse { route_id: route.id },
            "Ruta creada exitosamente".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<RouteListResponse>, AppError> {
        let routes = self.routes.list_recent(20).await?;

        Ok(routes
            .into_iter()
            .map(|r| RouteListResponse {
                id: r.id,
                driver_id: r.driver_id,
                status: r.status,
                scheduled_date: r.scheduled_date,
                created_at: r.created_at,
                total_stops: r.total_stops,
                collected_stops: r.collected_stops,
            })
            .collect())
    }

    pub async fn get_detail(&self, id: Uuid) -> Result<RouteDetailResponse, AppError> {
        let route = self
            .routes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ruta no encontrada".to_string()))?;

        let stops = self.pickups.find_by_route_with_bins(route.id).await?;

        Ok(RouteDetailResponse {
            id: route.id,
            driver_id: route.driver_id,
            status: route.status,
            scheduled_date: route.scheduled_date,
            created_at: route.created_at,
            stops: stops
                .into_iter()
                .map(|s| RouteStopResponse {
                    id: s.id,
                    bin_id: s.bin_id,
                    order_index: s.order_index,
                    status: s.status,
                    collected_at: s.collected_at,
                    fill_level_at_pickup: s.fill_level_at_pickup,
                    photo_url: s.photo_url,
                    address: s.address,
                    lat: s.lat,
                    lng: s.lng,
                    fill_level: s.fill_level,
                })
                .collect(),
        })
    }

    /// Transición pending → in_progress (acción explícita del conductor)
    pub async fn start(&self, id: Uuid) -> Result<ApiResponse<CreateRouteResponse>, AppError> {
        self.transition(id, RouteStatus::InProgress).await?;
        log::info!("▶️ Ruta {} iniciada", id);

        Ok(ApiResponse::success_with_message(
            CreateRouteResponse { route_id: id },
            "Ruta iniciada".to_string(),
        ))
    }

    /// Transición in_progress → completed (acción explícita del conductor).
    /// No se comprueba que queden pickups pendientes: la transición es
    /// permisiva a propósito.
    pub async fn complete(&self, id: Uuid) -> Result<ApiResponse<CreateRouteResponse>, AppError> {
        self.transition(id, RouteStatus::Completed).await?;
        log::info!("🏁 Ruta {} completada", id);

        Ok(ApiResponse::success_with_message(
            CreateRouteResponse { route_id: id },
            "Ruta completada".to_string(),
        ))
    }

    async fn transition(&self, id: Uuid, next: RouteStatus) -> Result<(), AppError> {
        let route = self
            .routes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ruta no encontrada".to_string()))?;

        if !route.status.can_transition_to(next) {
            return Err(AppError::Conflict(format!(
                "Transición de ruta inválida: {:?} -> {:?}",
                route.status, next
            )));
        }

        self.routes.update_status(id, next).await?;
        Ok(())
    }
}
