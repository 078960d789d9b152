//! Repositorio de DriverLocations
//!
//! Upsert por clave (driver_id, route_id): se sobrescribe la fila
//! anterior, nunca se acumula historial. Idempotente por naturaleza;
//! la única garantía de orden es "gana la última escritura visible".

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver_location::DriverLocation;
use crate::utils::errors::AppError;

pub struct DriverLocationRepository {
    pool: PgPool,
}

impl DriverLocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn upsert(
        &self,
        driver_id: Uuid,
        route_id: Uuid,
        lat: f64,
        lng: f64,
    ) -> Result<DriverLocation, AppError> {
        let location = sqlx::query_as::<_, DriverLocation>(
            r#"
            INSERT INTO driver_locations (driver_id, route_id, lat, lng, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (driver_id, route_id)
            DO UPDATE SET lat = $3, lng = $4, updated_at = $5
            RETURNING *
            "#,
        )
        .bind(driver_id)
        .bind(route_id)
        .bind(lat)
        .bind(lng)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(location)
    }

    /// Últimas posiciones conocidas de los conductores de una ruta
    pub async fn find_by_route(&self, route_id: Uuid) -> Result<Vec<DriverLocation>, AppError> {
        let locations = sqlx::query_as::<_, DriverLocation>(
            "SELECT * FROM driver_locations WHERE route_id = $1 ORDER BY updated_at DESC",
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }
}
