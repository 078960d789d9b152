//! Repositorio de Bins y sus lecturas de sensor
//!
//! Las lecturas (sensor_readings) pertenecen al contenedor, así que sus
//! operaciones viven aquí: append inmutable y ventana reciente para la
//! predicción de llenado.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::bin::{Bin, BinStatus, WasteType};
use crate::models::sensor_reading::SensorReading;
use crate::utils::errors::{conflict_error, not_found_error, AppError};

pub struct BinRepository {
    pool: PgPool,
}

impl BinRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        address: String,
        lat: f64,
        lng: f64,
        capacity_liters: i32,
        waste_type: WasteType,
        status: BinStatus,
        sensor_id: String,
    ) -> Result<Bin, AppError> {
        // Verificar que el sensor no esté ya registrado
        if self.sensor_id_exists(&sensor_id, None).await? {
            return Err(conflict_error("Bin", "sensor_id", &sensor_id));
        }

        let bin = sqlx::query_as::<_, Bin>(
            r#"
            INSERT INTO bins (id, address, lat, lng, fill_level, battery_level, capacity_liters, waste_type, status, sensor_id, created_at)
            VALUES ($1, $2, $3, $4, 0, 100, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(address)
        .bind(lat)
        .bind(lng)
        .bind(capacity_liters)
        .bind(waste_type)
        .bind(status)
        .bind(sensor_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(bin)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Bin>, AppError> {
        let bin = sqlx::query_as::<_, Bin>("SELECT * FROM bins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(bin)
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Bin>, AppError> {
        let bins = sqlx::query_as::<_, Bin>("SELECT * FROM bins WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(bins)
    }

    pub async fn find_by_sensor_id(&self, sensor_id: &str) -> Result<Option<Bin>, AppError> {
        let bin = sqlx::query_as::<_, Bin>("SELECT * FROM bins WHERE sensor_id = $1")
            .bind(sensor_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(bin)
    }

    pub async fn list(&self) -> Result<Vec<Bin>, AppError> {
        let bins = sqlx::query_as::<_, Bin>("SELECT * FROM bins ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(bins)
    }

    /// Contenedores activos con llenado igual o superior al umbral,
    /// los peores primero (selección de candidatos del dispatcher)
    pub async fn list_needing_pickup(&self, threshold: i32) -> Result<Vec<Bin>, AppError> {
        let bins = sqlx::query_as::<_, Bin>(
            "SELECT * FROM bins WHERE status = 'active' AND fill_level >= $1 ORDER BY fill_level DESC",
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(bins)
    }

    pub async fn sensor_id_exists(
        &self,
        sensor_id: &str,
        exclude_bin: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM bins WHERE sensor_id = $1 AND ($2::uuid IS NULL OR id != $2))",
        )
        .bind(sensor_id)
        .bind(exclude_bin)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        address: Option<String>,
        lat: Option<f64>,
        lng: Option<f64>,
        capacity_liters: Option<i32>,
        waste_type: Option<WasteType>,
        status: Option<BinStatus>,
        sensor_id: Option<String>,
    ) -> Result<Bin, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Bin", &id.to_string()))?;

        if let Some(ref new_sensor) = sensor_id {
            if self.sensor_id_exists(new_sensor, Some(id)).await? {
                return Err(conflict_error("Bin", "sensor_id", new_sensor));
            }
        }

        let bin = sqlx::query_as::<_, Bin>(
            r#"
            UPDATE bins
            SET address = $2, lat = $3, lng = $4, capacity_liters = $5, waste_type = $6, status = $7, sensor_id = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(address.unwrap_or(current.address))
        .bind(lat.unwrap_or(current.lat))
        .bind(lng.unwrap_or(current.lng))
        .bind(capacity_liters.unwrap_or(current.capacity_liters))
        .bind(waste_type.unwrap_or(current.waste_type))
        .bind(status.unwrap_or(current.status))
        .bind(sensor_id.unwrap_or(current.sensor_id))
        .fetch_one(&self.pool)
        .await?;

        Ok(bin)
    }

    /// Aplicar una lectura de telemetría al contenedor.
    ///
    /// Escritura last-write-wins: no hay CAS ni columna de versión frente
    /// al reset de recogida concurrente.
    pub async fn update_telemetry(
        &self,
        id: Uuid,
        fill_level: i32,
        battery_level: i32,
        set_last_pickup: bool,
    ) -> Result<(), AppError> {
        if set_last_pickup {
            sqlx::query(
                "UPDATE bins SET fill_level = $2, battery_level = $3, last_pickup = $4 WHERE id = $1",
            )
            .bind(id)
            .bind(fill_level)
            .bind(battery_level)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        } else {
            sqlx::query("UPDATE bins SET fill_level = $2, battery_level = $3 WHERE id = $1")
                .bind(id)
                .bind(fill_level)
                .bind(battery_level)
                .execute(&self.pool)
                .await?;
        }

        Ok(())
    }

    /// Reset tras la recogida: nivel a 0 y sello de última recogida
    pub async fn reset_after_collection(
        &self,
        id: Uuid,
        collected_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE bins SET fill_level = 0, last_pickup = $2 WHERE id = $1")
            .bind(id)
            .bind(collected_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Registrar una lectura inmutable del sensor
    pub async fn append_reading(
        &self,
        bin_id: Uuid,
        fill_level: i32,
        battery_level: i32,
    ) -> Result<SensorReading, AppError> {
        let reading = sqlx::query_as::<_, SensorReading>(
            r#"
            INSERT INTO sensor_readings (id, bin_id, fill_level, battery_level, timestamp)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(bin_id)
        .bind(fill_level)
        .bind(battery_level)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(reading)
    }

    /// Ventana de lecturas recientes, de más nueva a más antigua
    pub async fn recent_readings(
        &self,
        bin_id: Uuid,
        limit: i64,
    ) -> Result<Vec<SensorReading>, AppError> {
        let readings = sqlx::query_as::<_, SensorReading>(
            "SELECT * FROM sensor_readings WHERE bin_id = $1 ORDER BY timestamp DESC LIMIT $2",
        )
        .bind(bin_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(readings)
    }
}
