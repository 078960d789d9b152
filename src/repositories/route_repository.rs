//! Repositorio de Routes
//!
//! Creación, consulta y transición de estado de rutas. El borrado
//! elimina primero los pickups (la ruta es dueña de sus paradas) y se usa
//! también como acción compensatoria cuando falla la inserción de pickups.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::route::{Route, RouteStatus};
use crate::utils::errors::AppError;

/// Fila de listado con el progreso agregado de las paradas
#[derive(Debug, sqlx::FromRow)]
pub struct RouteWithProgress {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub scheduled_date: NaiveDate,
    pub status: RouteStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub total_stops: i64,
    pub collected_stops: i64,
}

pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        driver_id: Uuid,
        scheduled_date: NaiveDate,
    ) -> Result<Route, AppError> {
        let route = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (id, driver_id, scheduled_date, status, created_at)
            VALUES ($1, $2, $3, 'pending', $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(driver_id)
        .bind(scheduled_date)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(route)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Route>, AppError> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(route)
    }

    pub async fn list_recent(&self, limit: i64) -> Result<Vec<RouteWithProgress>, AppError> {
        let routes = sqlx::query_as::<_, RouteWithProgress>(
            r#"
            SELECT r.id, r.driver_id, r.scheduled_date, r.status, r.created_at,
                   COUNT(p.id) AS total_stops,
                   COUNT(p.id) FILTER (WHERE p.status = 'collected') AS collected_stops
            FROM routes r
            LEFT JOIN pickups p ON p.route_id = r.id
            GROUP BY r.id
            ORDER BY r.scheduled_date DESC, r.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }

    pub async fn update_status(&self, id: Uuid, status: RouteStatus) -> Result<Route, AppError> {
        let route = sqlx::query_as::<_, Route>(
            "UPDATE routes SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(route)
    }

    /// Eliminar la ruta y sus pickups (los pickups primero, por la FK).
    /// También es la acción compensatoria del rollback de creación.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM pickups WHERE route_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
