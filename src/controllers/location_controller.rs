//! Controller de posiciones de conductor
//!
//! El reconciliador en sí es un upsert puro por clave; aquí se verifica
//! antes que el conductor que reporta esté asignado a la ruta.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::location_dto::{DriverLocationResponse, ReportLocationRequest};
use crate::repositories::driver_location_repository::DriverLocationRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::{forbidden_error, AppError};

pub struct LocationController {
    locations: DriverLocationRepository,
    routes: RouteRepository,
}

impl LocationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            locations: DriverLocationRepository::new(pool.clone()),
            routes: RouteRepository::new(pool),
        }
    }

    pub async fn report(
        &self,
        request: ReportLocationRequest,
    ) -> Result<DriverLocationResponse, AppError> {
        request.validate()?;

        let route = self
            .routes
            .find_by_id(request.route_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ruta no encontrada".to_string()))?;

        if route.driver_id != request.driver_id {
            return Err(forbidden_error(
                "report location",
                "driver is not assigned to this route",
            ));
        }

        let location = self
            .locations
            .upsert(request.driver_id, request.route_id, request.lat, request.lng)
            .await?;

        Ok(location.into())
    }

    pub async fn get_by_route(
        &self,
        route_id: Uuid,
    ) -> Result<Vec<DriverLocationResponse>, AppError> {
        let locations = self.locations.find_by_route(route_id).await?;
        Ok(locations.into_iter().map(DriverLocationResponse::from).collect())
    }
}
