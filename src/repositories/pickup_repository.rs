//! Repositorio de Pickups
//!
//! Inserción de paradas al crear la ruta y transiciones terminales
//! collect/skip. Los pickups nunca se reabren.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::pickup::{Pickup, PickupStatus};
use crate::services::route_generation::RouteStop;
use crate::utils::errors::AppError;

/// Fila de parada con los datos del contenedor para el detalle de ruta
#[derive(Debug, sqlx::FromRow)]
pub struct PickupWithBin {
    pub id: Uuid,
    pub bin_id: Uuid,
    pub order_index: i32,
    pub status: PickupStatus,
    pub collected_at: Option<DateTime<Utc>>,
    pub fill_level_at_pickup: Option<i32>,
    pub photo_url: Option<String>,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub fill_level: i32,
}

pub struct PickupRepository {
    pool: PgPool,
}

impl PickupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar las paradas de una ruta recién generada, en su orden
    pub async fn insert_for_route(
        &self,
        route_id: Uuid,
        driver_id: Uuid,
        stops: &[RouteStop],
    ) -> Result<(), AppError> {
        for stop in stops {
            sqlx::query(
                r#"
                INSERT INTO pickups (id, route_id, bin_id, driver_id, order_index, status, created_at)
                VALUES ($1, $2, $3, $4, $5, 'pending', $6)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(route_id)
            .bind(stop.bin_id)
            .bind(driver_id)
            .bind(stop.order_index)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Pickup>, AppError> {
        let pickup = sqlx::query_as::<_, Pickup>("SELECT * FROM pickups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(pickup)
    }

    /// Paradas de una ruta con sus contenedores, ordenadas por order_index
    pub async fn find_by_route_with_bins(
        &self,
        route_id: Uuid,
    ) -> Result<Vec<PickupWithBin>, AppError> {
        let stops = sqlx::query_as::<_, PickupWithBin>(
            r#"
            SELECT p.id, p.bin_id, p.order_index, p.status, p.collected_at,
                   p.fill_level_at_pickup, p.photo_url,
                   b.address, b.lat, b.lng, b.fill_level
            FROM pickups p
            JOIN bins b ON b.id = p.bin_id
            WHERE p.route_id = $1
            ORDER BY p.order_index ASC
            "#,
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stops)
    }

    pub async fn mark_collected(
        &self,
        id: Uuid,
        collected_at: DateTime<Utc>,
        fill_level_at_pickup: i32,
        photo_url: Option<String>,
    ) -> Result<Pickup, AppError> {
        let pickup = sqlx::query_as::<_, Pickup>(
            r#"
            UPDATE pickups
            SET status = 'collected', collected_at = $2, fill_level_at_pickup = $3, photo_url = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(collected_at)
        .bind(fill_level_at_pickup)
        .bind(photo_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(pickup)
    }

    pub async fn mark_skipped(&self, id: Uuid) -> Result<Pickup, AppError> {
        let pickup = sqlx::query_as::<_, Pickup>(
            "UPDATE pickups SET status = 'skipped' WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(pickup)
    }
}
